//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "rate_limiter": { "status": "ok", "message": "redis" },
///     "resolver": { "status": "ok", "message": "ready" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let rate_limiter = check_rate_limiter(&state).await;
    let resolver = check_resolver(&state);

    let all_healthy = rate_limiter.is_ok() && resolver.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            rate_limiter,
            resolver,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_rate_limiter(state: &AppState) -> CheckStatus {
    let backend = state.rate_limiter.backend();
    if state.rate_limiter.health_check().await {
        CheckStatus::ok(backend)
    } else {
        CheckStatus::error(format!("{} backend unreachable", backend))
    }
}

fn check_resolver(state: &AppState) -> CheckStatus {
    if state.discovery_service.resolver_ready() {
        CheckStatus::ok("ready")
    } else {
        CheckStatus::error("resolver not ready")
    }
}
