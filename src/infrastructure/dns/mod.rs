//! DNS resolver adapters.

mod hickory;

pub use hickory::HickoryDnsResolver;
