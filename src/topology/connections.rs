//! Link construction.
//!
//! This file decides what kind of link a set of nodes gets, which link-wide
//! constraints apply to it, and wires a fresh interface on every participant.

use crate::config::{GlobalDefaults, LinkOverrides};
use crate::topology::types::{InterfaceRef, LinkConstraints, LinkKind, LinkSpec, ResolvedNode};
use log::debug;

/// Effective link settings for one link scope (global or per group)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSettings {
    pub link_speed: i64,
    pub best_effort: bool,
    pub same_switch: bool,
}

impl LinkSettings {
    /// Settings scoped by the global defaults only
    pub fn global(defaults: &GlobalDefaults) -> Self {
        Self {
            link_speed: defaults.link_speed,
            best_effort: defaults.best_effort,
            same_switch: defaults.same_switch,
        }
    }

    /// Group overrides layered over the global defaults
    pub fn scoped(defaults: &GlobalDefaults, overrides: &LinkOverrides) -> Self {
        let global = Self::global(defaults);
        Self {
            link_speed: overrides.link_speed.unwrap_or(global.link_speed),
            best_effort: overrides.best_effort.unwrap_or(global.best_effort),
            same_switch: overrides.same_switch.unwrap_or(global.same_switch),
        }
    }

    /// Best effort suppresses any bandwidth request; otherwise a positive
    /// speed becomes the requested bandwidth.
    pub fn constraints(&self) -> LinkConstraints {
        let bandwidth = if self.best_effort {
            None
        } else {
            u64::try_from(self.link_speed).ok().filter(|&kbps| kbps > 0)
        };
        LinkConstraints {
            bandwidth,
            best_effort: self.best_effort,
            single_switch: self.same_switch,
        }
    }
}

/// Connect the nodes at `participants` (indices into `nodes`).
///
/// Returns `None` when the participant count calls for no link; otherwise
/// every participant gets exactly one new interface on the returned link.
pub fn connect(
    nodes: &mut [ResolvedNode],
    participants: &[usize],
    name: &str,
    settings: &LinkSettings,
) -> Option<LinkSpec> {
    let kind = LinkKind::for_participants(participants.len());
    if kind == LinkKind::None {
        debug!("Skipping link {}: {} participant(s)", name, participants.len());
        return None;
    }

    let endpoints = participants
        .iter()
        .map(|&i| {
            let node = &mut nodes[i];
            InterfaceRef {
                interface: node.add_interface(),
                node: node.id.clone(),
            }
        })
        .collect::<Vec<_>>();

    debug!("Created {} {} with {} endpoint(s)", kind, name, endpoints.len());

    Some(LinkSpec {
        name: name.to_string(),
        kind,
        endpoints,
        constraints: settings.constraints(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_node(id: &str) -> ResolvedNode {
        ResolvedNode {
            id: id.to_string(),
            os_image: None,
            hardware_type: None,
            site: None,
            is_vm: false,
            wants_vnc: false,
            storage: None,
            interfaces: Vec::new(),
        }
    }

    #[test]
    fn test_best_effort_suppresses_bandwidth() {
        let settings = LinkSettings {
            link_speed: 10_000_000,
            best_effort: true,
            same_switch: false,
        };
        let constraints = settings.constraints();
        assert!(constraints.best_effort);
        assert_eq!(constraints.bandwidth, None);
    }

    #[test]
    fn test_positive_speed_becomes_bandwidth() {
        let defaults = GlobalDefaults {
            link_speed: 1_000_000,
            same_switch: true,
            ..GlobalDefaults::default()
        };
        let constraints = LinkSettings::global(&defaults).constraints();
        assert_eq!(constraints.bandwidth, Some(1_000_000));
        assert!(constraints.single_switch);
        assert!(!constraints.best_effort);

        let any = LinkSettings::global(&GlobalDefaults::default()).constraints();
        assert_eq!(any, LinkConstraints::default());
    }

    #[test]
    fn test_group_overrides_layer_over_defaults() {
        let defaults = GlobalDefaults {
            link_speed: 1_000_000,
            same_switch: true,
            ..GlobalDefaults::default()
        };
        let overrides = LinkOverrides {
            link_speed: Some(25_000_000),
            best_effort: None,
            same_switch: Some(false),
        };
        let settings = LinkSettings::scoped(&defaults, &overrides);
        assert_eq!(settings.link_speed, 25_000_000);
        assert!(!settings.best_effort);
        assert!(!settings.same_switch);
    }

    #[test]
    fn test_connect_single_participant_creates_nothing() {
        let mut nodes = vec![bare_node("node0")];
        let settings = LinkSettings::global(&GlobalDefaults::default());
        assert!(connect(&mut nodes, &[0], "lan0", &settings).is_none());
        assert!(nodes[0].interfaces.is_empty());
    }

    #[test]
    fn test_connect_wires_one_interface_per_participant() {
        let mut nodes = vec![bare_node("node0"), bare_node("node1"), bare_node("node2")];
        let settings = LinkSettings::global(&GlobalDefaults::default());

        let link = connect(&mut nodes, &[0, 2], "lan0", &settings).unwrap();
        assert_eq!(link.kind, LinkKind::PointToPoint);
        assert_eq!(link.endpoints.len(), 2);
        assert_eq!(link.endpoints[1].to_string(), "node2:eth1");
        assert!(nodes[1].interfaces.is_empty());

        let lan = connect(&mut nodes, &[0, 1, 2], "backbone", &settings).unwrap();
        assert_eq!(lan.kind, LinkKind::SharedLan);
        assert_eq!(lan.endpoints[0].to_string(), "node0:eth2");
        assert_eq!(lan.endpoints[1].to_string(), "node1:eth1");
    }
}
