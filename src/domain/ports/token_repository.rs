//! Repository trait for API token → identity lookup.

use crate::error::AppError;
use async_trait::async_trait;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub id: String,
}

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Rate-limit key for discovery requests made by this caller.
    pub fn discover_key(&self) -> String {
        format!("discover:{}", self.id)
    }
}

/// Resolves hashed API tokens to caller identities.
///
/// Tokens are never handled in raw form here: callers pass the HMAC-SHA256 hex digest
/// produced by [`crate::application::services::auth_service::hash_token`].
///
/// # Implementations
///
/// - [`crate::infrastructure::auth::StaticTokenRepository`] - tokens from configuration
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns the identity owning `token_hash`, or `None` when unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backing store fails.
    async fn find_identity(&self, token_hash: &str) -> Result<Option<Identity>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_key() {
        assert_eq!(Identity::new("alice").discover_key(), "discover:alice");
    }
}
