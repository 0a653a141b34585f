//! Handler for the subdomain discovery endpoint.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;
use validator::Validate;

use crate::api::dto::discover::DiscoverRequest;
use crate::domain::entities::DiscoveryReport;
use crate::domain::ports::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// Discovers subdomains of the registrable domain behind a URL.
///
/// # Endpoint
///
/// `POST /api/scan/discover`
///
/// # Gates
///
/// Checked in order; the pipeline only starts once all pass.
///
/// 1. Bearer authentication (middleware) → `401`
/// 2. Per-identity scan quota (`discover:{identity}`) → `429` with `Retry-After`
/// 3. Body `{ "url": "<absolute url>" }` → `400`
///
/// # Response
///
/// ```json
/// {
///   "domain": "example.com",
///   "total": 2,
///   "reachable": 1,
///   "subdomains": [
///     { "subdomain": "api.example.com", "url": "https://api.example.com",
///       "reachable": true, "statusCode": 200, "sources": ["crt.sh", "brute-force"] },
///     { "subdomain": "old.example.com", "url": "https://old.example.com",
///       "reachable": false, "sources": ["hackertarget"] }
///   ],
///   "sources": { "crt.sh": 1, "hackertarget": 1, "subdomain.center": 0,
///                "rapiddns": 0, "brute-force": 1 },
///   "scannedAt": "2026-01-01T00:00:00Z",
///   "durationMs": 8123
/// }
/// ```
///
/// # Errors
///
/// Returns `504` if the pass exceeds the configured deadline.
pub async fn discover_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<DiscoverRequest>, JsonRejection>,
) -> Result<Json<DiscoveryReport>, AppError> {
    let decision = state.rate_limiter.check(&identity.discover_key()).await;
    if !decision.allowed {
        let retry_after = decision.retry_after.unwrap_or(Duration::from_secs(1));
        warn!(
            identity = %identity.id,
            retry_after_secs = retry_after.as_secs(),
            "Discovery rate limit exceeded"
        );
        metrics::counter!("discovery_rejected_total", "reason" => "rate_limited").increment(1);
        return Err(AppError::rate_limited(
            "Too many discovery requests",
            retry_after,
        ));
    }

    let host = payload
        .map_err(|rejection| {
            AppError::bad_request(
                "Invalid request body",
                json!({"reason": rejection.body_text()}),
            )
        })
        .and_then(|Json(request)| target_host(request))
        .inspect_err(|_| {
            metrics::counter!("discovery_rejected_total", "reason" => "invalid_input").increment(1);
        })?;

    info!(identity = %identity.id, host = %host, "Discovery requested");

    let report = state.discovery_service.discover(&host).await?;

    Ok(Json(report))
}

/// Validates the request and returns the host of its URL.
fn target_host(request: DiscoverRequest) -> Result<String, AppError> {
    request.validate()?;

    let raw = request
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::bad_request("url is required", json!({"field": "url"})))?;

    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request(
            "url must be an absolute URL",
            json!({"field": "url", "reason": e.to_string()}),
        )
    })?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(AppError::bad_request(
            "url has no host",
            json!({"field": "url"}),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: Option<&str>) -> DiscoverRequest {
        DiscoverRequest {
            url: url.map(String::from),
        }
    }

    #[test]
    fn test_target_host_extracts_host() {
        let host = target_host(request(Some("https://App.Example.com:8443/login?x=1"))).unwrap();
        assert_eq!(host, "app.example.com");
    }

    #[test]
    fn test_target_host_missing_url() {
        assert!(matches!(
            target_host(request(None)),
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            target_host(request(Some("   "))),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_target_host_relative_url() {
        assert!(matches!(
            target_host(request(Some("example.com/path"))),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_target_host_without_host() {
        assert!(matches!(
            target_host(request(Some("mailto:someone@example.com"))),
            Err(AppError::Validation { .. })
        ));
    }
}
