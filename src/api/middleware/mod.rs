//! HTTP middleware for authentication and observability.
//!
//! Rate limiting is per identity and therefore runs in the discovery handler, after
//! authentication has produced that identity.

pub mod auth;
pub mod tracing;
