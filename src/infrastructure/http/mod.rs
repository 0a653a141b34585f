//! Outbound HTTP probing.

mod reqwest_prober;

pub use reqwest_prober::ReqwestProber;
