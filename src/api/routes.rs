//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::discover_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /scan/discover` - Passive + brute-force subdomain discovery
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/scan/discover", post(discover_handler))
}
