//! Token table loaded from configuration.

use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::ports::{Identity, TokenRepository};
use crate::error::AppError;

/// In-memory token repository built from `API_TOKENS`.
///
/// Entries have the form `identity:hmac-hex`, comma separated. Only HMAC digests are
/// configured; raw tokens never reach the process environment.
#[derive(Debug, Default)]
pub struct StaticTokenRepository {
    by_hash: HashMap<String, Identity>,
}

impl StaticTokenRepository {
    /// Parses an `API_TOKENS` value.
    ///
    /// # Errors
    ///
    /// Fails on entries without an identity, digests that are not 64 hex characters,
    /// and digests that appear twice.
    pub fn parse(entries: &str) -> Result<Self> {
        let mut by_hash = HashMap::new();

        for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let Some((id, hash)) = entry.split_once(':') else {
                bail!("API_TOKENS entry '{}' must be identity:hash", entry);
            };

            let (id, hash) = (id.trim(), hash.trim().to_lowercase());
            if id.is_empty() {
                bail!("API_TOKENS entry '{}' has an empty identity", entry);
            }
            if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
                bail!("API_TOKENS entry for '{}' is not a 64-character hex digest", id);
            }
            if by_hash.insert(hash, Identity::new(id)).is_some() {
                bail!("API_TOKENS contains a duplicate digest (identity '{}')", id);
            }
        }

        Ok(Self { by_hash })
    }

    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

#[async_trait]
impl TokenRepository for StaticTokenRepository {
    async fn find_identity(&self, token_hash: &str) -> Result<Option<Identity>, AppError> {
        Ok(self.by_hash.get(token_hash).cloned())
    }
}
