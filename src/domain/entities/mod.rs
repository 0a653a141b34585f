//! Core discovery entities.
//!
//! - [`RootDomain`] - registrable domain a request is scoped to
//! - [`DiscoverySource`] - provenance tag
//! - [`DiscoveredSubdomain`] / [`Reachability`] - per-host result
//! - [`DiscoveryReport`] - final response payload

pub mod report;
pub mod root_domain;
pub mod source;
pub mod subdomain;

pub use report::{DiscoveryReport, SourceCounts};
pub use root_domain::RootDomain;
pub use source::DiscoverySource;
pub use subdomain::{DiscoveredSubdomain, Reachability};
