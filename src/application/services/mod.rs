//! Business logic services for the application layer.

pub mod auth_service;
pub mod discovery_service;
pub mod probing;

pub use auth_service::AuthService;
pub use discovery_service::{DiscoveryService, DiscoverySettings};
pub use probing::ProbeTimeouts;
