//! Merging and ranking of passive and brute-force results.

use super::entities::{DiscoveredSubdomain, DiscoverySource, Reachability};
use std::collections::HashMap;

/// Combines both result sets into a ranked, deduplicated list.
///
/// Passive entries are taken as-is. A brute-force hit on an existing hostname adds the
/// `brute-force` tag and can only upgrade reachability. New brute-force hostnames are
/// inserted with `brute-force` as their only source.
///
/// Output order: reachable entries first, then hostname ascending.
pub fn merge_results(
    passive: Vec<DiscoveredSubdomain>,
    brute_force: Vec<DiscoveredSubdomain>,
) -> Vec<DiscoveredSubdomain> {
    let mut merged: HashMap<String, DiscoveredSubdomain> = HashMap::with_capacity(passive.len());

    for entry in passive {
        merged.insert(entry.subdomain.clone(), entry);
    }

    for entry in brute_force {
        match merged.get_mut(&entry.subdomain) {
            Some(existing) => {
                existing.add_source(DiscoverySource::BruteForce);
                existing.promote(Reachability {
                    reachable: entry.reachable,
                    status_code: entry.status_code,
                });
            }
            None => {
                merged.insert(entry.subdomain.clone(), entry);
            }
        }
    }

    let mut ranked: Vec<DiscoveredSubdomain> = merged.into_values().collect();
    rank(&mut ranked);
    ranked
}

/// Sorts reachable entries first, then by hostname.
pub fn rank(entries: &mut [DiscoveredSubdomain]) {
    entries.sort_by(|a, b| {
        b.reachable
            .cmp(&a.reachable)
            .then_with(|| a.subdomain.cmp(&b.subdomain))
    });
}
