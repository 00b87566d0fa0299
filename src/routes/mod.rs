//! HTTP route handlers.
//!
//! Health routes are mounted at `/health` and at the `/api/health` alias. All
//! of them force `Cache-Control: no-cache, no-store, must-revalidate` so no
//! intermediary ever serves a stale verdict.
//!
//! Request tracing is enabled via middleware that generates a unique request ID
//! for each incoming request, allowing correlation of all logs within a request.

pub mod health;

use axum::{middleware, routing::get, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_NO_STORE, HEALTH_API_PATH, HEALTH_PATH};
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and cache headers.
pub fn create_router(state: AppState) -> Router {
    // Health checks - never cached, explicit HEAD takes precedence over GET's implicit one
    let health_routes = Router::new()
        .route(HEALTH_PATH, get(health::report).head(health::probe))
        .route(HEALTH_API_PATH, get(health::report).head(health::probe))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ));

    Router::new()
        .merge(health_routes)
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
