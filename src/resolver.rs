//! Attribute resolution for individual nodes.
//!
//! For the OS image and hardware type of every node, the first applicable
//! source wins:
//!
//! 1. the per-node override, when per-node mode is enabled for the attribute
//! 2. the group value, unless it is a sentinel
//! 3. the global default, unless it is a sentinel
//! 4. otherwise the attribute is unset
//!
//! A per-node override that is itself a sentinel resolves to unset rather than
//! falling through, and a missing override (list too short) also resolves to
//! unset. Validation rejects short lists before a build ever runs.

use crate::catalog::normalize_token;
use crate::config::{GlobalDefaults, NodeGroupSpec, OverrideConfig};
use crate::topology::naming::NodeNamer;
use crate::topology::types::ResolvedNode;
use log::debug;

/// Per-node override lists that are actually in effect
#[derive(Debug, Clone, Copy, Default)]
pub struct PerNodeOverrides<'a> {
    pub os_images: Option<&'a [String]>,
    pub hardware_types: Option<&'a [String]>,
}

impl<'a> PerNodeOverrides<'a> {
    /// Select the lists whose "same value for all nodes" toggle is off
    pub fn from_config(overrides: &'a OverrideConfig) -> Self {
        Self {
            os_images: (!overrides.same_os).then(|| overrides.os_images.as_slice()),
            hardware_types: (!overrides.same_hardware_type)
                .then(|| overrides.hardware_types.as_slice()),
        }
    }
}

/// Resolve one attribute for the node at global `index`
pub fn resolve_attribute(
    per_node: Option<&[String]>,
    index: usize,
    group: Option<&str>,
    global: Option<&str>,
) -> Option<String> {
    if let Some(list) = per_node {
        return normalize_token(list.get(index).map(String::as_str));
    }
    normalize_token(group).or_else(|| normalize_token(global))
}

/// Resolve every node of `group`, allocating identities from `namer`.
///
/// Storage and VNC are left unset; they are node-wide decisions applied by
/// the builder.
pub fn resolve(
    group: &NodeGroupSpec,
    defaults: &GlobalDefaults,
    overrides: &PerNodeOverrides<'_>,
    namer: &mut NodeNamer,
) -> Vec<ResolvedNode> {
    let site = normalize_token(group.site.as_deref());

    (0..group.node_count())
        .map(|_| {
            let index = namer.next_index();
            let id = namer.allocate(site.as_deref());

            let node = ResolvedNode {
                os_image: resolve_attribute(
                    overrides.os_images,
                    index,
                    group.os_image.as_deref(),
                    defaults.os_image.as_deref(),
                ),
                hardware_type: resolve_attribute(
                    overrides.hardware_types,
                    index,
                    group.hardware_type.as_deref(),
                    defaults.hardware_type.as_deref(),
                ),
                site: site.clone(),
                is_vm: defaults.use_vms,
                wants_vnc: false,
                storage: None,
                interfaces: Vec::new(),
                id,
            };
            debug!(
                "Resolved {} (image: {:?}, hardware: {:?}, site: {:?})",
                node.id, node.os_image, node.hardware_type, node.site
            );
            node
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Naming, TokenList};

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_precedence_group_over_global() {
        assert_eq!(
            resolve_attribute(None, 0, Some("d710"), Some("d430")),
            Some("d710".to_string())
        );
        assert_eq!(
            resolve_attribute(None, 0, None, Some("d430")),
            Some("d430".to_string())
        );
        assert_eq!(resolve_attribute(None, 0, None, None), None);
    }

    #[test]
    fn test_sentinel_falls_through_to_global() {
        assert_eq!(
            resolve_attribute(None, 0, Some("default"), Some("d430")),
            Some("d430".to_string())
        );
        assert_eq!(resolve_attribute(None, 0, Some(""), Some("default")), None);
    }

    #[test]
    fn test_per_node_override_wins() {
        let per_node = list(&["m510", "xl170"]);
        assert_eq!(
            resolve_attribute(Some(&per_node), 1, Some("d710"), Some("d430")),
            Some("xl170".to_string())
        );
    }

    #[test]
    fn test_per_node_sentinel_and_missing_are_unset() {
        let per_node = list(&["default"]);
        assert_eq!(resolve_attribute(Some(&per_node), 0, Some("d710"), Some("d430")), None);
        // Out of range never panics
        assert_eq!(resolve_attribute(Some(&per_node), 5, Some("d710"), Some("d430")), None);
    }

    #[test]
    fn test_from_config_respects_toggles() {
        let mut overrides = OverrideConfig {
            os_images: TokenList::parse("urn:a,urn:b"),
            hardware_types: TokenList::parse("d430"),
            ..OverrideConfig::default()
        };
        let active = PerNodeOverrides::from_config(&overrides);
        assert!(active.os_images.is_none());
        assert!(active.hardware_types.is_none());

        overrides.same_os = false;
        let active = PerNodeOverrides::from_config(&overrides);
        assert_eq!(active.os_images.map(<[String]>::len), Some(2));
        assert!(active.hardware_types.is_none());
    }

    #[test]
    fn test_resolve_group_uses_global_index() {
        let overrides = OverrideConfig {
            same_hardware_type: false,
            hardware_types: TokenList::parse("d430, m510, default"),
            ..OverrideConfig::default()
        };
        let active = PerNodeOverrides::from_config(&overrides);
        let defaults = GlobalDefaults {
            os_image: Some("default".to_string()),
            hardware_type: Some("c220g5".to_string()),
            ..GlobalDefaults::default()
        };
        let mut namer = NodeNamer::new(Naming::Sequential, false);

        let first = resolve(&NodeGroupSpec::with_count(1), &defaults, &active, &mut namer);
        let second = resolve(&NodeGroupSpec::with_count(2), &defaults, &active, &mut namer);

        assert_eq!(first[0].id, "node0");
        assert_eq!(first[0].hardware_type.as_deref(), Some("d430"));
        assert_eq!(second[0].id, "node1");
        assert_eq!(second[0].hardware_type.as_deref(), Some("m510"));
        assert_eq!(second[1].hardware_type, None);
        assert!(second.iter().all(|n| n.os_image.is_none()));
    }

    #[test]
    fn test_resolve_group_site_and_vm() {
        let group = NodeGroupSpec {
            site: Some("urn:publicid:IDN+utah.cloudlab.us+authority+cm".to_string()),
            ..NodeGroupSpec::with_count(2)
        };
        let defaults = GlobalDefaults {
            use_vms: true,
            ..GlobalDefaults::default()
        };
        let mut namer = NodeNamer::new(Naming::PerSite, true);
        let nodes = resolve(&group, &defaults, &PerNodeOverrides::default(), &mut namer);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "utah-0");
        assert_eq!(nodes[1].id, "utah-1");
        assert!(nodes.iter().all(|n| n.is_vm));
        assert!(nodes.iter().all(|n| n.site.as_deref() == group.site.as_deref()));
    }
}
