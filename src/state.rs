use std::sync::Arc;

use crate::application::services::{AuthService, DiscoveryService};
use crate::domain::ports::RateLimiter;

/// Shared handler state: the discovery pipeline plus the request gates in front of it.
#[derive(Clone)]
pub struct AppState {
    pub discovery_service: Arc<DiscoveryService>,
    pub auth_service: Arc<AuthService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    pub fn new(
        discovery_service: Arc<DiscoveryService>,
        auth_service: Arc<AuthService>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            discovery_service,
            auth_service,
            rate_limiter,
        }
    }
}
