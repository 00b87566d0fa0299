//! Health check endpoints for container orchestration.
//!
//! `GET` returns the full JSON health report; `HEAD` returns only the status
//! code so load balancers can poll without parsing a body. Both answer 200
//! when the memory check passes and 503 otherwise, including when telemetry
//! cannot be read.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use http::{
    header::{EXPIRES, PRAGMA},
    StatusCode,
};

use crate::config::{EXPIRES_IMMEDIATELY, PRAGMA_NO_CACHE};
use crate::health::{CheckStatus, Evaluation};
use crate::state::AppState;

fn status_code(healthy: bool) -> StatusCode {
    if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Full health check handler.
///
/// A completed evaluation (healthy or degraded) also carries HTTP/1.0
/// no-cache headers. Cache-Control is applied by the router layer.
pub async fn report(State(state): State<AppState>) -> Response {
    let evaluation = state.reporter.evaluate();
    let status = status_code(evaluation.is_healthy());

    match evaluation {
        Evaluation::Completed(report) => (
            status,
            [(PRAGMA, PRAGMA_NO_CACHE), (EXPIRES, EXPIRES_IMMEDIATELY)],
            Json(report),
        )
            .into_response(),
        Evaluation::Failed(report) => (status, Json(report)).into_response(),
    }
}

/// Lightweight health check handler. No body.
pub async fn probe(State(state): State<AppState>) -> StatusCode {
    match state.reporter.probe() {
        Ok(verdict) => status_code(verdict == CheckStatus::Pass),
        Err(e) => {
            tracing::warn!(error = %e, "Lightweight health probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
