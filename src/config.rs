//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Required Variables
//!
//! - `TOKEN_SIGNING_SECRET` - HMAC key for API token digests
//!
//! ## Optional Variables
//!
//! - `API_TOKENS` - `identity:hmac-hex` pairs, comma separated (see `recon token create`)
//! - `REDIS_URL` / `REDIS_HOST` - Redis for shared rate limiting (in-memory otherwise)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//!
//! ## Discovery tuning
//!
//! | Variable | Default |
//! |---|---|
//! | `SCAN_RATE_LIMIT` | 5 requests |
//! | `SCAN_RATE_WINDOW_SECONDS` | 60 |
//! | `DISCOVERY_TIMEOUT_SECONDS` | 120 |
//! | `PASSIVE_CANDIDATE_LIMIT` | 100 |
//! | `DNS_BATCH_SIZE` | 50 |
//! | `DNS_TIMEOUT_SECONDS` | 5 |
//! | `PASSIVE_PROBE_CONCURRENCY` | 20 |
//! | `BRUTE_FORCE_PROBE_CONCURRENCY` | 30 |
//! | `HTTPS_PROBE_TIMEOUT_MS` | 5000 |
//! | `HTTP_PROBE_TIMEOUT_MS` | 4000 |
//! | `CRTSH_TIMEOUT_SECONDS` | 15 |
//! | `SOURCE_TIMEOUT_SECONDS` | 10 |

use anyhow::{Context, Result, bail};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::{DiscoverySettings, ProbeTimeouts};
use crate::infrastructure::sources::SourceTimeouts;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub redis_url: Option<String>,
    /// HMAC key used to hash API tokens before lookup.
    pub token_signing_secret: String,
    /// Raw `API_TOKENS` value, parsed by
    /// [`StaticTokenRepository`](crate::infrastructure::auth::StaticTokenRepository).
    pub api_tokens: String,

    // ── Rate limiting ───────────────────────────────────────────────────────
    pub scan_rate_limit: u32,
    pub scan_rate_window_seconds: u64,

    // ── Discovery pipeline ──────────────────────────────────────────────────
    pub discovery_timeout_seconds: u64,
    pub passive_candidate_limit: usize,
    pub dns_batch_size: usize,
    pub dns_timeout_seconds: u64,
    pub passive_probe_concurrency: usize,
    pub brute_force_probe_concurrency: usize,
    pub https_probe_timeout_ms: u64,
    pub http_probe_timeout_ms: u64,
    pub crtsh_timeout_seconds: u64,
    pub source_timeout_seconds: u64,
}

/// Reads `name` and parses it, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TOKEN_SIGNING_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let token_signing_secret =
            env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

        Ok(Self {
            listen_addr: env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            redis_url: Self::load_redis_url(),
            token_signing_secret,
            api_tokens: env::var("API_TOKENS").unwrap_or_default(),

            scan_rate_limit: env_or("SCAN_RATE_LIMIT", 5),
            scan_rate_window_seconds: env_or("SCAN_RATE_WINDOW_SECONDS", 60),

            discovery_timeout_seconds: env_or("DISCOVERY_TIMEOUT_SECONDS", 120),
            passive_candidate_limit: env_or("PASSIVE_CANDIDATE_LIMIT", 100),
            dns_batch_size: env_or("DNS_BATCH_SIZE", 50),
            dns_timeout_seconds: env_or("DNS_TIMEOUT_SECONDS", 5),
            passive_probe_concurrency: env_or("PASSIVE_PROBE_CONCURRENCY", 20),
            brute_force_probe_concurrency: env_or("BRUTE_FORCE_PROBE_CONCURRENCY", 30),
            https_probe_timeout_ms: env_or("HTTPS_PROBE_TIMEOUT_MS", 5000),
            http_probe_timeout_ms: env_or("HTTP_PROBE_TIMEOUT_MS", 4000),
            crtsh_timeout_seconds: env_or("CRTSH_TIMEOUT_SECONDS", 15),
            source_timeout_seconds: env_or("SOURCE_TIMEOUT_SECONDS", 10),
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        match env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty()) {
            Some(pwd) => Some(format!("redis://:{}@{}:{}/{}", pwd, host, port, db)),
            None => Some(format!("redis://{}:{}/{}", host, port, db)),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown log format, a malformed listen address or Redis
    /// URL, an empty signing secret, or any zero-valued limit, batch size or timeout.
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.token_signing_secret.is_empty() {
            bail!("TOKEN_SIGNING_SECRET must not be empty");
        }

        let positive = [
            ("SCAN_RATE_LIMIT", self.scan_rate_limit as u64),
            ("SCAN_RATE_WINDOW_SECONDS", self.scan_rate_window_seconds),
            ("DISCOVERY_TIMEOUT_SECONDS", self.discovery_timeout_seconds),
            ("PASSIVE_CANDIDATE_LIMIT", self.passive_candidate_limit as u64),
            ("DNS_BATCH_SIZE", self.dns_batch_size as u64),
            ("DNS_TIMEOUT_SECONDS", self.dns_timeout_seconds),
            ("PASSIVE_PROBE_CONCURRENCY", self.passive_probe_concurrency as u64),
            ("BRUTE_FORCE_PROBE_CONCURRENCY", self.brute_force_probe_concurrency as u64),
            ("HTTPS_PROBE_TIMEOUT_MS", self.https_probe_timeout_ms),
            ("HTTP_PROBE_TIMEOUT_MS", self.http_probe_timeout_ms),
            ("CRTSH_TIMEOUT_SECONDS", self.crtsh_timeout_seconds),
            ("SOURCE_TIMEOUT_SECONDS", self.source_timeout_seconds),
        ];
        for (name, value) in positive {
            if value == 0 {
                bail!("{} must be greater than 0", name);
            }
        }

        if self.dns_batch_size > 1000 {
            bail!(
                "DNS_BATCH_SIZE is too large (max: 1000), got {}",
                self.dns_batch_size
            );
        }

        Ok(())
    }

    pub fn scan_rate_window(&self) -> Duration {
        Duration::from_secs(self.scan_rate_window_seconds)
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_secs(self.dns_timeout_seconds)
    }

    /// Pipeline limits for [`DiscoveryService`](crate::application::services::DiscoveryService).
    pub fn discovery_settings(&self) -> DiscoverySettings {
        DiscoverySettings {
            passive_candidate_limit: self.passive_candidate_limit,
            dns_batch_size: self.dns_batch_size,
            passive_probe_concurrency: self.passive_probe_concurrency,
            brute_force_probe_concurrency: self.brute_force_probe_concurrency,
            probe_timeouts: ProbeTimeouts {
                https: Duration::from_millis(self.https_probe_timeout_ms),
                http: Duration::from_millis(self.http_probe_timeout_ms),
            },
            request_timeout: Duration::from_secs(self.discovery_timeout_seconds),
        }
    }

    pub fn source_timeouts(&self) -> SourceTimeouts {
        SourceTimeouts {
            crtsh: Duration::from_secs(self.crtsh_timeout_seconds),
            default: Duration::from_secs(self.source_timeout_seconds),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        match self.redis_url {
            Some(ref redis_url) => {
                tracing::info!("  Redis: {} (rate limiting)", mask_connection_string(redis_url))
            }
            None => tracing::info!("  Redis: disabled (in-memory rate limiting)"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Scan quota: {} per {}s",
            self.scan_rate_limit,
            self.scan_rate_window_seconds
        );
        tracing::info!(
            "  Discovery: deadline {}s, passive cap {}, DNS batch {}, probe concurrency {}/{}",
            self.discovery_timeout_seconds,
            self.passive_candidate_limit,
            self.dns_batch_size,
            self.passive_probe_concurrency,
            self.brute_force_probe_concurrency
        );
    }
}

/// Masks the password in connection strings for logging.
///
/// `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    let Some(start) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[start + 3..];

    match rest.find('@') {
        Some(at_pos) => {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];
            match credentials.rfind(':') {
                Some(colon_pos) => format!(
                    "{}://{}:***{}",
                    &url[..start],
                    &credentials[..colon_pos],
                    host_part
                ),
                None => url.to_string(),
            }
        }
        None => url.to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// Expects `.env` to be already loaded (`dotenvy::dotenv()` in `main.rs`).
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
