//! Topology graph type definitions.
//!
//! These are the resolved, backend-neutral structures produced by the
//! builder: nodes with every attribute reduced to a concrete value or
//! `None`, and links referencing the node interfaces they join.

use serde::Serialize;
use std::fmt;

/// Size of an ephemeral storage volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageSize {
    /// All available space on the node
    Max,
    Gigabytes(u32),
}

/// Ephemeral storage volume attached to a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageVolume {
    pub name: String,
    pub size: StorageSize,
    pub mount_point: String,
}

/// A single node instance with every attribute resolved.
///
/// `None` means "omit the attribute and let the backend decide".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedNode {
    pub id: String,
    pub os_image: Option<String>,
    pub hardware_type: Option<String>,
    pub site: Option<String>,
    pub is_vm: bool,
    pub wants_vnc: bool,
    pub storage: Option<StorageVolume>,
    /// Interface names in the order the node joined links
    pub interfaces: Vec<String>,
}

impl ResolvedNode {
    /// Allocate the next interface name on this node (`eth1`, `eth2`, ...)
    pub fn add_interface(&mut self) -> String {
        let name = format!("eth{}", self.interfaces.len() + 1);
        self.interfaces.push(name.clone());
        name
    }
}

/// Connectivity kind, chosen solely from the participant count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    None,
    PointToPoint,
    SharedLan,
}

impl LinkKind {
    /// 1 participant (or fewer) -> None, 2 -> PointToPoint, more -> SharedLan
    pub fn for_participants(count: usize) -> Self {
        match count {
            0 | 1 => LinkKind::None,
            2 => LinkKind::PointToPoint,
            _ => LinkKind::SharedLan,
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::None => write!(f, "none"),
            LinkKind::PointToPoint => write!(f, "link"),
            LinkKind::SharedLan => write!(f, "lan"),
        }
    }
}

/// One end of a link: a named interface on a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRef {
    pub node: String,
    pub interface: String,
}

impl fmt::Display for InterfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node, self.interface)
    }
}

/// Constraints applied to a whole link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkConstraints {
    /// Requested bandwidth in kbps
    pub bandwidth: Option<u64>,
    pub best_effort: bool,
    /// No inter-switch links
    pub single_switch: bool,
}

/// A logical connectivity unit among a set of node interfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSpec {
    pub name: String,
    pub kind: LinkKind,
    pub endpoints: Vec<InterfaceRef>,
    pub constraints: LinkConstraints,
}

impl LinkSpec {
    /// Returns true if `node` has an interface on this link
    pub fn joins(&self, node: &str) -> bool {
        self.endpoints.iter().any(|e| e.node == node)
    }
}

/// The compiled topology: nodes in group-then-index order plus links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopologyGraph {
    pub nodes: Vec<ResolvedNode>,
    pub links: Vec<LinkSpec>,
}

impl TopologyGraph {
    pub fn node(&self, id: &str) -> Option<&ResolvedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn link(&self, name: &str) -> Option<&LinkSpec> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Links a node participates in, in link order
    pub fn links_of<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a LinkSpec> + 'a {
        self.links.iter().filter(move |l| l.joins(node))
    }
}
