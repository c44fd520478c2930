//! Request document type definitions.
//!
//! These structures are the hand-off to whatever renders the provisioning
//! backend's request format. They are serialized as YAML or JSON and carry
//! only descriptor data; no backend-specific markup is produced here.

use serde::Serialize;

/// Root of the request document
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RequestDocument {
    /// Profile description shown to users
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Usage instructions shown once the topology is running
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Nodes in group-then-index order
    pub nodes: Vec<NodeDescriptor>,
    pub links: Vec<LinkDescriptor>,
}

/// How a node is allocated by the backend
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// Bare-metal machine
    RawPc,
    /// Xen virtual machine
    XenVm,
}

/// A single requested node
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NodeDescriptor {
    pub id: String,
    pub kind: NodeKind,
    /// Disk image URN; omitted lets the backend pick its default image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_type: Option<String>,
    /// Component manager (site) the node must be placed on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockstore: Option<BlockstoreDescriptor>,
    pub start_vnc: bool,
}

/// Ephemeral blockstore attached to a node
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BlockstoreDescriptor {
    pub name: String,
    pub mount_point: String,
    /// Size such as "50GB"; "0GB" requests all available space
    pub size: String,
    pub placement: String,
}

/// A requested link or LAN
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LinkDescriptor {
    pub name: String,
    /// "link" for point-to-point, "lan" for shared
    pub kind: String,
    /// Joined interfaces as `node:interface`
    pub interfaces: Vec<String>,
    /// Bandwidth in kbps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<u64>,
    pub best_effort: bool,
    /// Disallow inter-switch links
    pub no_interswitch_links: bool,
}
