//! # Subdomain Recon
//!
//! A subdomain discovery service built with Axum. Given a URL, it finds subdomains of
//! the registrable domain behind it and reports which ones answer HTTP.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, aggregation and merge rules, port traits
//! - **Application Layer** ([`application`]) - Discovery pipeline and authentication
//! - **Infrastructure Layer** ([`infrastructure`]) - Passive sources, DNS, HTTP probing,
//!   rate limiting, token table
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Pipeline
//!
//! 1. Reduce the input host to its registrable root (`mail.example.co.uk` → `example.co.uk`)
//! 2. Query crt.sh, HackerTarget, subdomain.center and RapidDNS concurrently
//! 3. Clean and deduplicate passive candidates, tagging each with its sources
//! 4. In parallel: DNS-filter and HTTP-probe passive candidates, and brute-force a
//!    built-in dictionary through the same stages
//! 5. Merge, rank (reachable first, then by name) and report per-source counts
//!
//! ## Quick Start
//!
//! ```bash
//! export TOKEN_SIGNING_SECRET="change-me"
//! cargo run --bin recon -- token create --name ci   # prints the API_TOKENS entry
//! export API_TOKENS="ci:<hash>"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, DiscoveryService, DiscoverySettings};
    pub use crate::domain::entities::{
        DiscoveredSubdomain, DiscoveryReport, DiscoverySource, Reachability, RootDomain,
    };
    pub use crate::domain::ports::{
        DnsResolver, HttpProber, Identity, PassiveSource, ProbeError, RateDecision, RateLimiter,
        ResolveError, TokenRepository,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
