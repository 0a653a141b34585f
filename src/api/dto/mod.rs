//! Data Transfer Objects for API requests and responses.
//!
//! The discovery response body is the domain's
//! [`DiscoveryReport`](crate::domain::entities::DiscoveryReport), serialized as is.

pub mod discover;
pub mod health;
