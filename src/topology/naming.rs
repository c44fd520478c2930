//! Deterministic node identity allocation.
//!
//! Sequential naming uses the running global index (`node<i>`, or `vm<i>` in
//! virtual-machine mode). Per-site naming uses a short site name and an index
//! counted separately for every short name, so two groups placed on the same
//! site never produce colliding identities.

use crate::config::Naming;
use std::collections::BTreeMap;

/// Fallback short name when a site identifier is absent or malformed
pub const FALLBACK_SITE_NAME: &str = "site";

/// Derive a short name from a site identifier.
///
/// Takes the second `+`-delimited segment up to its first `.`, so
/// `urn:publicid:IDN+utah.cloudlab.us+authority+cm` becomes `utah`.
pub fn short_site_name(site: Option<&str>) -> String {
    site.and_then(|s| s.split('+').nth(1))
        .and_then(|segment| segment.split('.').next())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_SITE_NAME)
        .to_string()
}

/// Hands out node identities in build order
#[derive(Debug)]
pub struct NodeNamer {
    naming: Naming,
    use_vms: bool,
    next_index: usize,
    per_site: BTreeMap<String, usize>,
}

impl NodeNamer {
    pub fn new(naming: Naming, use_vms: bool) -> Self {
        Self {
            naming,
            use_vms,
            next_index: 0,
            per_site: BTreeMap::new(),
        }
    }

    /// Global index the next node will receive
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Allocate the identity for the next node, advancing the global index
    pub fn allocate(&mut self, site: Option<&str>) -> String {
        let index = self.next_index;
        self.next_index += 1;

        match self.naming {
            Naming::Sequential if self.use_vms => format!("vm{}", index),
            Naming::Sequential => format!("node{}", index),
            Naming::PerSite => {
                let short = short_site_name(site);
                let k = self.per_site.entry(short.clone()).or_insert(0);
                let name = format!("{}-{}", short, k);
                *k += 1;
                name
            }
        }
    }
}
