//! Main entry point for the `SupplyScope` dashboard server

use std::net::SocketAddr;
use supplyscope_core::{Config, Error, Result, init_logging};
use supplyscope_database::Database;
use supplyscope_server::build_router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    // Initialize logging first
    init_logging()?;

    // Load configuration
    let config = Config::load().unwrap_or_else(|err| {
        info!("Failed to load config ({}), using defaults", err);
        Config::default()
    });

    info!(
        "SupplyScope dashboard server v{} starting on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port
    );

    // Initialize warehouse connection
    info!("Connecting to warehouse...");
    let database = match Database::new(&config).await {
        Ok(db) => {
            info!("Warehouse connection established");
            db
        }
        Err(e) => {
            error!("Failed to connect to warehouse: {}", e);
            return Err(e);
        }
    };

    if let Err(e) = database.health_check().await {
        error!("Warehouse health check failed: {}", e);
        return Err(e);
    }
    info!("Warehouse health check passed");

    // Build the application router
    let app = build_router(config.clone(), database.pool().clone())?
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| Error::Configuration {
            message: format!("Invalid server address: {e}"),
        })?;

    let listener = TcpListener::bind(&addr).await?;

    info!("Dashboard: http://{}/", addr);
    info!("Health:    http://{}/health", addr);

    // Start the server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| Error::Other(format!("Server error: {e}")))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
