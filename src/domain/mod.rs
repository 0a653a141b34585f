//! Domain layer: discovery entities, pure pipeline logic and port traits.
//!
//! Nothing here performs I/O. Network access is expressed through the traits in
//! [`ports`] and implemented by `crate::infrastructure`.
//!
//! # Modules
//!
//! - [`entities`] - root domain, sources, discovered subdomains, report
//! - [`aggregator`] - passive candidate cleaning and deduplication
//! - [`wordlist`] - brute-force dictionary and candidate generation
//! - [`merge`] - result merging and ranking
//! - [`ports`] - contracts for sources, resolver, prober, rate limiter, tokens

pub mod aggregator;
pub mod entities;
pub mod merge;
pub mod ports;
pub mod wordlist;
