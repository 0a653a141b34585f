//! Merges passive source output into a deduplicated candidate map.

use super::entities::{DiscoverySource, RootDomain};
use std::collections::HashMap;

/// Insertion-ordered map of cleaned hostname → contributing sources.
///
/// Every key is lowercase, free of `*`, whitespace and `@`, and is either the root domain
/// or one of its subdomains.
#[derive(Debug, Clone)]
pub struct CandidateMap {
    root: RootDomain,
    entries: Vec<(String, Vec<DiscoverySource>)>,
    index: HashMap<String, usize>,
}

impl CandidateMap {
    pub fn new(root: RootDomain) -> Self {
        Self {
            root,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Cleans and records every hostname reported by `source`.
    ///
    /// Returns the number of entries that passed cleaning.
    pub fn ingest<I>(&mut self, source: DiscoverySource, hostnames: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut accepted = 0;

        for raw in hostnames {
            let Some(host) = clean_hostname(&raw, &self.root) else {
                continue;
            };
            accepted += 1;

            match self.index.get(&host) {
                Some(&position) => {
                    let sources = &mut self.entries[position].1;
                    if !sources.contains(&source) {
                        sources.push(source);
                    }
                }
                None => {
                    self.index.insert(host.clone(), self.entries.len());
                    self.entries.push((host, vec![source]));
                }
            }
        }

        accepted
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.index.contains_key(hostname)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn root(&self) -> &RootDomain {
        &self.root
    }

    /// First `limit` entries in insertion order.
    pub fn head(&self, limit: usize) -> &[(String, Vec<DiscoverySource>)] {
        &self.entries[..self.entries.len().min(limit)]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DiscoverySource])> {
        self.entries
            .iter()
            .map(|(host, sources)| (host.as_str(), sources.as_slice()))
    }
}

/// Normalizes one raw passive entry, or rejects it as noise.
fn clean_hostname(raw: &str, root: &RootDomain) -> Option<String> {
    let host = raw.trim().to_lowercase();

    if host.is_empty() || host.contains(['*', '@']) || host.contains(char::is_whitespace) {
        return None;
    }

    root.covers(&host).then_some(host)
}
