// ============================================================================
// Health Routes
// ============================================================================
//
// Endpoints:
// - GET /health - Liveness check (process is up)
// - GET /health/ready - Readiness check (backend API reachable)
//
// ============================================================================

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::context::AppContext;

/// GET /health
/// Liveness check; answers as long as the process serves requests
pub async fn liveness() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// GET /health/ready
/// Readiness check; pings the backend API through the gateway
pub async fn readiness(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    if ctx.backend.check_health().await {
        (StatusCode::OK, "OK")
    } else {
        tracing::warn!("Readiness check failed: backend unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
    }
}
