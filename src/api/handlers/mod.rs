//! HTTP request handlers for API endpoints.

pub mod discover;
pub mod health;

pub use discover::discover_handler;
pub use health::health_handler;
