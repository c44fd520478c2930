//! Configuration validation utilities.
//!
//! Every rule is checked independently and all violations are collected,
//! so a user sees the complete list of problems in one pass. Each error
//! carries the field path of the offending parameter (e.g.
//! `groups[2].count`) for highlighting in whatever front end gathered it.

use crate::catalog::{self, HARDWARE_TYPES, OS_IMAGES};
use crate::config::{Config, Connectivity, LinkOverrides, StorageConfig};
use std::fmt;

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field_path}: {message}")]
pub struct ValidationError {
    pub message: String,
    pub field_path: String,
}

impl ValidationError {
    pub fn new(field_path: impl fmt::Display, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_path: field_path.to_string(),
        }
    }
}

/// Validate a complete configuration
///
/// Checks for:
/// - At least one node group, and `node_count` not mixed with `groups`
/// - Every group count is at least 1, and no more than `Config::MAX_TOTAL_NODES`
///   nodes are requested in total
/// - Per-node override lists match the total node count
/// - Hardware types name a single type
/// - Storage size within 0-200GB with an absolute mount point
/// - Non-negative link speeds
///
/// # Arguments
/// * `config` - The configuration to validate
///
/// # Returns
/// * Every violation found; an empty list means the configuration is valid
///
/// # Examples
/// ```
/// use topocomp::config_loader::parse_config;
/// use topocomp::utils::validation::validate_config;
///
/// let config = parse_config("node_count: 0").unwrap();
/// let errors = validate_config(&config);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].field_path, "node_count");
/// ```
pub fn validate_config(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(validate_groups(config));
    errors.extend(validate_override_counts(config));
    errors.extend(validate_hardware_types(config));
    errors.extend(validate_storage(&config.defaults.storage));
    errors.extend(validate_link_speeds(config));
    warn_unknown_tokens(config);
    warn_unused_group_links(config);

    if errors.is_empty() {
        log::debug!("Configuration passed validation");
    } else {
        log::debug!("Configuration has {} validation error(s)", errors.len());
    }
    errors
}

/// Validate group presence and counts
pub fn validate_groups(config: &Config) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match (config.node_count, config.groups.is_empty()) {
        (None, true) => {
            errors.push(ValidationError::new("groups", "At least one node group is required"));
        }
        (Some(count), true) => {
            if count < 1 {
                errors.push(ValidationError::new("node_count", "You must choose at least 1 node."));
            } else if exceeds_max(count) {
                errors.push(ValidationError::new("node_count", too_many_nodes(count)));
            }
        }
        (Some(_), false) => {
            errors.push(ValidationError::new(
                "node_count",
                "node_count cannot be combined with groups",
            ));
        }
        (None, false) => {}
    }

    let mut total = 0usize;
    for (i, group) in config.groups.iter().enumerate() {
        let path = format!("groups[{}].count", i);
        if group.count < 1 {
            errors.push(ValidationError::new(
                path,
                format!("Group {} must contain at least 1 node (got {})", i, group.count),
            ));
        } else if exceeds_max(group.count) {
            errors.push(ValidationError::new(path, too_many_nodes(group.count)));
        } else {
            let before = total;
            total = total.saturating_add(group.node_count());
            if before <= Config::MAX_TOTAL_NODES && total > Config::MAX_TOTAL_NODES {
                errors.push(ValidationError::new(
                    path,
                    format!(
                        "Group {} brings the total to {} nodes, more than the maximum of {}",
                        i,
                        total,
                        Config::MAX_TOTAL_NODES
                    ),
                ));
            }
        }
    }

    errors
}

fn exceeds_max(count: i64) -> bool {
    usize::try_from(count).map_or(true, |n| n > Config::MAX_TOTAL_NODES)
}

fn too_many_nodes(count: i64) -> String {
    format!(
        "At most {} nodes may be requested (got {})",
        Config::MAX_TOTAL_NODES,
        count
    )
}

/// Validate that enabled per-node override lists cover every node exactly
pub fn validate_override_counts(config: &Config) -> Vec<ValidationError> {
    let expected = config.total_node_count();
    let overrides = &config.overrides;
    let mut errors = Vec::new();

    let lists = [
        (!overrides.same_os, "os_images", overrides.os_images.len()),
        (!overrides.same_hardware_type, "hardware_types", overrides.hardware_types.len()),
    ];

    for (enabled, name, actual) in lists {
        if enabled && actual != expected {
            errors.push(ValidationError::new(
                format!("overrides.{}", name),
                format!(
                    "{} must contain {} entries (one per node), found {}",
                    name, expected, actual
                ),
            ));
        }
    }

    errors
}

/// Validate that each hardware type names exactly one physical type
pub fn validate_hardware_types(config: &Config) -> Vec<ValidationError> {
    let mut candidates: Vec<(String, &str)> = Vec::new();

    if let Some(hw) = config.defaults.hardware_type.as_deref() {
        candidates.push(("defaults.hardware_type".to_string(), hw));
    }
    for (i, group) in config.groups.iter().enumerate() {
        if let Some(hw) = group.hardware_type.as_deref() {
            candidates.push((format!("groups[{}].hardware_type", i), hw));
        }
    }
    if !config.overrides.same_hardware_type {
        for (k, hw) in config.overrides.hardware_types.as_slice().iter().enumerate() {
            candidates.push((format!("overrides.hardware_types[{}]", k), hw.as_str()));
        }
    }

    candidates
        .into_iter()
        .filter(|(_, hw)| is_multi_type(hw))
        .map(|(path, _)| ValidationError::new(path, "Only a single type is allowed"))
        .collect()
}

fn is_multi_type(hardware_type: &str) -> bool {
    hardware_type.split(',').count() != 1
}

/// Validate ephemeral storage parameters
pub fn validate_storage(storage: &StorageConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if storage.size_gb < 0 || storage.size_gb > StorageConfig::MAX_SIZE_GB {
        errors.push(ValidationError::new(
            "defaults.storage.size_gb",
            format!(
                "Please specify a size between 0 and {}GB (got {})",
                StorageConfig::MAX_SIZE_GB,
                storage.size_gb
            ),
        ));
    }

    if storage.is_requested() && !storage.mount_point.starts_with('/') {
        errors.push(ValidationError::new(
            "defaults.storage.mount_point",
            format!("Mount point '{}' must be an absolute path", storage.mount_point),
        ));
    }

    if storage.max_space && storage.size_gb > 0 {
        log::warn!(
            "Storage max_space is set; the requested size of {}GB will be ignored",
            storage.size_gb
        );
    }

    errors
}

/// Validate global and per-group link speeds
pub fn validate_link_speeds(config: &Config) -> Vec<ValidationError> {
    let mut speeds = vec![("defaults.link_speed".to_string(), config.defaults.link_speed)];
    for (i, group) in config.groups.iter().enumerate() {
        if let Some(speed) = group.link.link_speed {
            speeds.push((format!("groups[{}].link.link_speed", i), speed));
        }
    }

    let mut errors = Vec::new();
    for (path, speed) in speeds {
        if speed < 0 {
            errors.push(ValidationError::new(
                path,
                format!("Link speed cannot be negative (got {})", speed),
            ));
        } else if catalog::link_speed_label(speed).is_none() {
            log::warn!("{}: {} kbps is not one of the standard link speeds", path, speed);
        }
    }
    errors
}

/// Group link blocks only scope per-group links
fn warn_unused_group_links(config: &Config) {
    if config.topology.connectivity != Connectivity::Shared {
        return;
    }
    for (i, group) in config.groups.iter().enumerate() {
        if group.link != LinkOverrides::default() {
            log::warn!(
                "groups[{}].link is ignored with shared connectivity; the shared LAN uses the global defaults",
                i
            );
        }
    }
}

/// Log tokens that are not in the catalogs; custom values are still allowed
fn warn_unknown_tokens(config: &Config) {
    let images = config
        .groups
        .iter()
        .filter_map(|g| g.os_image.as_deref())
        .chain(config.defaults.os_image.as_deref());
    for image in images {
        if !catalog::is_sentinel(image) && catalog::lookup(OS_IMAGES, image).is_none() {
            log::warn!("OS image '{}' is not in the image catalog", image);
        }
    }

    let hardware = config
        .groups
        .iter()
        .filter_map(|g| g.hardware_type.as_deref())
        .chain(config.defaults.hardware_type.as_deref());
    for hw in hardware {
        if !catalog::is_sentinel(hw) && catalog::lookup(HARDWARE_TYPES, hw).is_none() {
            log::warn!("Hardware type '{}' is not in the hardware catalog", hw);
        }
    }
}
