//! HTTP server initialization and runtime setup.
//!
//! Wires outbound clients, the discovery service, authentication and the rate limiter
//! into [`AppState`], then runs the Axum server until a shutdown signal arrives.

use crate::application::services::{AuthService, DiscoveryService, DiscoverySettings};
use crate::config::Config;
use crate::domain::ports::RateLimiter;
use crate::infrastructure::auth::StaticTokenRepository;
use crate::infrastructure::dns::HickoryDnsResolver;
use crate::infrastructure::http::ReqwestProber;
use crate::infrastructure::rate_limit::{MemoryRateLimiter, RedisRateLimiter};
use crate::infrastructure::sources::{SourceTimeouts, build_client, default_sources};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Builds the discovery pipeline with production adapters.
///
/// Shared by the HTTP server and the `recon discover` command.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be constructed (TLS backend failure).
pub fn build_discovery_service(
    settings: DiscoverySettings,
    source_timeouts: SourceTimeouts,
    dns_timeout: Duration,
) -> Result<DiscoveryService> {
    let source_client = build_client().context("Failed to build source HTTP client")?;
    let sources = default_sources(source_client, source_timeouts);

    let resolver = Arc::new(HickoryDnsResolver::new(dns_timeout));
    let prober = Arc::new(ReqwestProber::new().context("Failed to build probe HTTP client")?);

    Ok(DiscoveryService::new(sources, resolver, prober, settings))
}

/// Redis-backed limiter when Redis is configured and reachable, in-memory otherwise.
async fn build_rate_limiter(config: &Config) -> Arc<dyn RateLimiter> {
    let memory = || -> Arc<dyn RateLimiter> {
        Arc::new(MemoryRateLimiter::new(
            config.scan_rate_limit,
            config.scan_rate_window(),
        ))
    };

    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Rate limiting in memory (Redis not configured)");
        return memory();
    };

    match RedisRateLimiter::connect(redis_url, config.scan_rate_limit, config.scan_rate_window())
        .await
    {
        Ok(redis) => {
            tracing::info!("Rate limiting enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Rate limiting in memory.", e);
            memory()
        }
    }
}

/// Assembles the shared handler state.
///
/// # Errors
///
/// Returns an error if `API_TOKENS` is malformed or a client cannot be built.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let tokens =
        StaticTokenRepository::parse(&config.api_tokens).context("Invalid API_TOKENS")?;
    if tokens.is_empty() {
        tracing::warn!("No API tokens configured; every discovery request will be rejected");
    } else {
        tracing::info!("Loaded {} API token(s)", tokens.len());
    }

    let auth_service = AuthService::new(Arc::new(tokens), config.token_signing_secret.clone());
    let discovery_service = build_discovery_service(
        config.discovery_settings(),
        config.source_timeouts(),
        config.dns_timeout(),
    )?;
    let rate_limiter = build_rate_limiter(config).await;

    Ok(AppState::new(
        Arc::new(discovery_service),
        Arc::new(auth_service),
        rate_limiter,
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - State assembly fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
