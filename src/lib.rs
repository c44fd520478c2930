//! # Topocomp - Topology request compiler
//!
//! This library turns a declarative description of desired compute nodes
//! (grouped by site, OS image, hardware type and LAN membership) into a fully
//! resolved network topology: nodes, interfaces, point-to-point links and
//! shared LANs, ready to be handed to a provisioning request renderer.
//!
//! ## Overview
//!
//! Input arrives as node groups plus global defaults and optional per-node
//! overrides. Compilation is a single deterministic pass:
//!
//! 1. **Validate**: every rule is checked and all violations are collected
//! 2. **Resolve**: each node gets one `(image, hardware, site)` triple
//! 3. **Build**: node identities are allocated and links are wired
//! 4. **Hand off**: the graph becomes a request document (YAML or JSON)
//!
//! ## Architecture
//!
//! - `catalog`: Selectable OS images, hardware types and link speeds
//! - `config`: Type-safe configuration structures and the node group model
//! - `config_loader`: Configuration file loading
//! - `resolver`: Per-node attribute precedence
//! - `utils`: Validation with field paths
//! - `topology`: Node naming, link construction and the topology builder
//! - `request`: Request document descriptors and serialization
//! - `orchestrator`: High-level compile pipeline
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use topocomp::{config_loader, orchestrator, request::OutputFormat};
//! use std::path::Path;
//!
//! let config = config_loader::load_config(Path::new("topology.yaml"))?;
//! let document = orchestrator::generate_request(
//!     &config,
//!     Path::new("request.yaml"),
//!     OutputFormat::Yaml,
//! )?;
//! println!("{} nodes requested", document.nodes.len());
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! defaults:
//!   os_image: "urn:publicid:IDN+emulab.net+image+emulab-ops//UBUNTU22-64-STD"
//!   hardware_type: d430
//!   link_speed: 1000000      # kbps, 0 = any
//!   storage:
//!     size_gb: 50
//!
//! topology:
//!   connectivity: per_group  # or shared
//!   backbone: true
//!   naming: per_site         # or sequential
//!
//! groups:
//!   - count: 3
//!     site: "urn:publicid:IDN+utah.cloudlab.us+authority+cm"
//!   - count: 2
//!     site: "urn:publicid:IDN+wisc.cloudlab.us+authority+cm"
//!     hardware_type: c220g5
//! ```
//!
//! ## Error Handling
//!
//! Validation problems are reported as a list of
//! [`utils::ValidationError`] values, each naming the offending field path.
//! File and serialization failures use `color_eyre` reports.

pub mod catalog;
pub mod config;
pub mod config_loader;
pub mod resolver;
pub mod utils;
pub mod topology;
pub mod request;
pub mod orchestrator;
