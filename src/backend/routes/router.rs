/**
 * Router Configuration
 *
 * Combines all route groups into a single Axum router and wraps it in the
 * tower layers every request passes through.
 *
 * # Layers (outermost first)
 *
 * 1. `TraceLayer` - one span per request
 * 2. `CorsLayer` - permissive; the web client is served from another origin
 * 3. `TimeoutLayer` - bounds each request by `REQUEST_TIMEOUT_SECS`, answering 408
 */

use std::time::Duration;

use axum::{http::StatusCode, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::backend::routes::admin_routes::configure_admin_routes;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::chat_routes::configure_chat_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let request_timeout = app_state.config.request_timeout;

    let router = configure_api_routes(Router::new());
    let router = configure_chat_routes(router);
    let router = configure_admin_routes(router);

    router
        .with_state(app_state)
        .layer(request_timeout_layer(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Requests running longer than `limit` are answered with 408
fn request_timeout_layer(limit: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_slow_request_is_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route("/fast", get(|| async { "ok" }))
            .layer(request_timeout_layer(Duration::from_millis(50)));
        let server = TestServer::new(app).unwrap();

        assert_eq!(server.get("/slow").await.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(server.get("/fast").await.status_code(), StatusCode::OK);
    }
}
