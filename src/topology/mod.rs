//! Network topology module.
//!
//! This module turns resolved node groups into a topology graph: node
//! identities, point-to-point links and shared LANs, and the optional
//! backbone joining every node.

pub mod types;
pub mod naming;
pub mod connections;
pub mod builder;

// Re-export key types and functions for easier access
pub use types::{
    InterfaceRef, LinkConstraints, LinkKind, LinkSpec, ResolvedNode, StorageSize, StorageVolume,
    TopologyGraph,
};
pub use naming::{short_site_name, NodeNamer};
pub use connections::{connect, LinkSettings};
pub use builder::build;
