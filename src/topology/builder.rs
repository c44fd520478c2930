//! Topology construction.
//!
//! Walks the node groups in input order, resolves their nodes, forms the
//! group or shared links, layers the optional backbone on top and finally
//! applies the node-wide storage and VNC settings. The builder assumes its
//! input already passed validation and cannot fail.

use crate::config::{Config, Connectivity, StorageConfig};
use crate::resolver::{resolve, PerNodeOverrides};
use crate::topology::connections::{connect, LinkSettings};
use crate::topology::naming::NodeNamer;
use crate::topology::types::{StorageSize, StorageVolume, TopologyGraph};
use log::{debug, info};

/// Name of the link joining every node when a backbone is requested
pub const BACKBONE_LINK: &str = "backbone";
/// Name of the single link in shared connectivity mode
pub const SHARED_LINK: &str = "lan";

/// Build the topology graph for a validated configuration
pub fn build(config: &Config) -> TopologyGraph {
    let defaults = &config.defaults;
    let overrides = PerNodeOverrides::from_config(&config.overrides);
    let mut namer = NodeNamer::new(config.topology.naming, defaults.use_vms);
    let groups = config.node_groups();
    let mut graph = TopologyGraph::default();

    // Node indices of every group that asked for a LAN, with its group index
    let mut lan_groups: Vec<(usize, Vec<usize>)> = Vec::new();

    for (g, group) in groups.iter().enumerate() {
        let first = graph.nodes.len();
        graph.nodes.extend(resolve(group, defaults, &overrides, &mut namer));
        debug!("Group {} resolved to nodes {}..{}", g, first, graph.nodes.len());

        if group.form_lan {
            lan_groups.push((g, (first..graph.nodes.len()).collect()));
        }
    }

    match config.topology.connectivity {
        Connectivity::PerGroup => {
            for (g, participants) in &lan_groups {
                let settings = LinkSettings::scoped(defaults, &groups[*g].link);
                let name = format!("lan{}", g);
                if let Some(link) = connect(&mut graph.nodes, participants, &name, &settings) {
                    graph.links.push(link);
                }
            }
        }
        Connectivity::Shared => {
            let participants: Vec<usize> = lan_groups
                .iter()
                .flat_map(|(_, members)| members.iter().copied())
                .collect();
            let settings = LinkSettings::global(defaults);
            if let Some(link) = connect(&mut graph.nodes, &participants, SHARED_LINK, &settings) {
                graph.links.push(link);
            }
        }
    }

    if config.topology.backbone && graph.nodes.len() > 1 {
        let everyone: Vec<usize> = (0..graph.nodes.len()).collect();
        let settings = LinkSettings::global(defaults);
        if let Some(link) = connect(&mut graph.nodes, &everyone, BACKBONE_LINK, &settings) {
            graph.links.push(link);
        }
    }

    for node in &mut graph.nodes {
        node.storage = storage_volume(&node.id, &defaults.storage);
        node.wants_vnc = defaults.start_vnc;
    }

    info!(
        "Built topology with {} node(s) and {} link(s)",
        graph.nodes.len(),
        graph.links.len()
    );
    graph
}

/// Storage volume for a node, if any storage was requested
fn storage_volume(node_id: &str, storage: &StorageConfig) -> Option<StorageVolume> {
    if !storage.is_requested() {
        return None;
    }
    let size = if storage.max_space {
        StorageSize::Max
    } else {
        StorageSize::Gigabytes(u32::try_from(storage.size_gb).unwrap_or(0))
    };
    Some(StorageVolume {
        name: format!("{}-bs", node_id),
        size,
        mount_point: storage.mount_point.clone(),
    })
}
