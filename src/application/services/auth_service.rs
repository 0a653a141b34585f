//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::ports::{Identity, TokenRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Hashes a raw token with HMAC-SHA256 keyed by `signing_secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. Used both at request time and by the
/// `recon token` CLI when provisioning `API_TOKENS` entries.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before lookup, so the
/// configured token table never contains raw credentials.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token → identity lookup
    /// - `signing_secret` - HMAC key; must match the value used when tokens were hashed
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Resolves a raw bearer token to the calling identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is empty or unknown.
    /// Returns [`AppError::Internal`] if the token store fails.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Empty bearer token"}),
            ));
        }

        let token_hash = hash_token(&self.signing_secret, token);

        self.repository
            .find_identity(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Invalid or revoked token"}))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockTokenRepository;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockTokenRepository::new();

        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);

        mock_repo
            .expect_find_identity()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(Identity::new("alice"))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let identity = service.authenticate(token).await.unwrap();

        assert_eq!(identity.id, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_identity()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_empty_token_skips_lookup() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo.expect_find_identity().never();

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("   ").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_repository_error_propagates() {
        let mut mock_repo = MockTokenRepository::new();
        mock_repo
            .expect_find_identity()
            .returning(|_| Err(AppError::internal("store down", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("token").await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[test]
    fn test_hash_token_consistency() {
        let hash1 = hash_token(&test_secret(), "test-token");
        let hash2 = hash_token(&test_secret(), "test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_token_secret_matters() {
        assert_ne!(hash_token("secret-a", "token"), hash_token("secret-b", "token"));
        assert_ne!(hash_token("secret-a", "token1"), hash_token("secret-a", "token2"));
    }
}
