//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain logic by coordinating port calls and enforcing
//! breadth, concurrency and latency limits. Services consume port traits and provide a
//! clean API for HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::discovery_service::DiscoveryService`] - the discovery pipeline
//! - [`services::auth_service::AuthService`] - API token authentication
//! - [`services::probing`] - batched DNS filter and HTTP prober stages

pub mod services;
