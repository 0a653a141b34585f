//! Infrastructure layer for external integrations.
//!
//! This layer implements the port traits defined by the domain layer, providing
//! concrete network-facing implementations.
//!
//! # Modules
//!
//! - [`sources`] - Passive reconnaissance adapters (crt.sh, HackerTarget, subdomain.center, RapidDNS)
//! - [`dns`] - hickory-based A / AAAA resolver
//! - [`http`] - reqwest `HEAD` prober
//! - [`rate_limit`] - In-memory and Redis rate limiters
//! - [`auth`] - Configured API token table

pub mod auth;
pub mod dns;
pub mod http;
pub mod rate_limit;
pub mod sources;
