//! # Request Document Module
//!
//! Converts a compiled [`TopologyGraph`] into the descriptor document handed
//! to the request renderer, and writes that document to disk.
//!
//! ## Example Generated Structure
//!
//! ```yaml
//! nodes:
//!   - id: node0
//!     kind: raw-pc
//!     hardware_type: d430
//!     interfaces: [eth1]
//!     start_vnc: false
//!   - id: node1
//!     kind: raw-pc
//!     hardware_type: d430
//!     interfaces: [eth1]
//!     start_vnc: false
//! links:
//!   - name: lan0
//!     kind: link
//!     interfaces: ["node0:eth1", "node1:eth1"]
//!     bandwidth: 1000000
//!     best_effort: false
//!     no_interswitch_links: false
//! ```

pub mod types;

pub use types::{BlockstoreDescriptor, LinkDescriptor, NodeDescriptor, NodeKind, RequestDocument};

use crate::config::GeneralConfig;
use crate::topology::{LinkSpec, ResolvedNode, StorageSize, StorageVolume, TopologyGraph};
use clap::ValueEnum;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::path::Path;

/// Serialization format of the written document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// Pick the format from a file extension, falling back to YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Yaml,
        }
    }
}

impl RequestDocument {
    pub fn from_topology(graph: &TopologyGraph, general: &GeneralConfig) -> Self {
        Self {
            description: general.description.clone(),
            instructions: general.instructions.clone(),
            nodes: graph.nodes.iter().map(NodeDescriptor::from).collect(),
            links: graph.links.iter().map(LinkDescriptor::from).collect(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).wrap_err("Failed to serialize request document to YAML")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("Failed to serialize request document to JSON")
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Yaml => self.to_yaml(),
            OutputFormat::Json => self.to_json(),
        }
    }

    /// Write the document to `path`, creating parent directories as needed
    pub fn write(&self, path: &Path, format: OutputFormat) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        std::fs::write(path, self.render(format)?)
            .wrap_err_with(|| format!("Failed to write request document '{}'", path.display()))?;
        info!("Wrote request document to {:?}", path);
        Ok(())
    }
}

impl From<&ResolvedNode> for NodeDescriptor {
    fn from(node: &ResolvedNode) -> Self {
        Self {
            id: node.id.clone(),
            kind: if node.is_vm { NodeKind::XenVm } else { NodeKind::RawPc },
            disk_image: node.os_image.clone(),
            hardware_type: node.hardware_type.clone(),
            site: node.site.clone(),
            interfaces: node.interfaces.clone(),
            blockstore: node.storage.as_ref().map(BlockstoreDescriptor::from),
            start_vnc: node.wants_vnc,
        }
    }
}

impl From<&StorageVolume> for BlockstoreDescriptor {
    fn from(volume: &StorageVolume) -> Self {
        let size = match volume.size {
            StorageSize::Max => "0GB".to_string(),
            StorageSize::Gigabytes(gb) => format!("{}GB", gb),
        };
        Self {
            name: volume.name.clone(),
            mount_point: volume.mount_point.clone(),
            size,
            placement: "any".to_string(),
        }
    }
}

impl From<&LinkSpec> for LinkDescriptor {
    fn from(link: &LinkSpec) -> Self {
        Self {
            name: link.name.clone(),
            kind: link.kind.to_string(),
            interfaces: link.endpoints.iter().map(ToString::to_string).collect(),
            bandwidth: link.constraints.bandwidth,
            best_effort: link.constraints.best_effort,
            no_interswitch_links: link.constraints.single_switch,
        }
    }
}
