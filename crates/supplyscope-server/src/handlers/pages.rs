//! Dashboard page

use axum::response::Html;

/// Serve the dashboard page
///
/// The page is a single static HTML document that drives the JSON API and
/// renders charts client-side with vega-embed.
pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../templates/dashboard.html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_page_contains_chart_containers() {
        let Html(body) = dashboard().await;
        assert!(body.contains("vega-embed"));
        assert!(body.contains("/api/filters"));
        assert!(body.contains("heatmap"));
    }
}
