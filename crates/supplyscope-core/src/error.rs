//! Error types for SupplyScope

use std::{error::Error as StdError, fmt};

/// Main error type for SupplyScope
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Database error
    Database(String),

    /// The warehouse could not be reached for a snapshot fetch
    WarehouseUnavailable(String),

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Database(msg) => write!(f, "Database error: {msg}"),
            Self::WarehouseUnavailable(msg) => write!(f, "Warehouse unavailable: {msg}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Configuration {
            message: "missing database url".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: missing database url"
        );

        let err = Error::Database("connection refused".to_string());
        assert_eq!(err.to_string(), "Database error: connection refused");

        let err = Error::WarehouseUnavailable("pool timed out".to_string());
        assert_eq!(err.to_string(), "Warehouse unavailable: pool timed out");

        let err = Error::Other("something went wrong".to_string());
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_message_variants() {
        let err = Error::Database("boom".to_string());
        assert!(err.source().is_none());
    }
}
