//! DTOs for the subdomain discovery endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request to discover subdomains of the domain behind `url`.
///
/// `url` is optional at the type level so a missing field is reported as a validation
/// error rather than a body rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct DiscoverRequest {
    /// Absolute URL whose host selects the root domain.
    #[validate(length(min = 1, max = 2048, message = "url must be 1-2048 characters"))]
    pub url: Option<String>,
}
