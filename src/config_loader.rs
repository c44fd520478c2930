use crate::config::Config;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info, warn};
use std::fs::File;
use std::path::Path;

/// Load and parse a compiler configuration from a YAML file.
///
/// This only reads the document; structural problems are left to
/// [`crate::utils::validation::validate_config`] so every violation can be
/// reported at once.
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    Ok(normalize_config(config))
}

/// Parse a configuration from an in-memory YAML string
pub fn parse_config(yaml: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(yaml).wrap_err("Failed to parse configuration")?;
    Ok(normalize_config(config))
}

/// Second load phase: settle the group structure once scalars are known.
///
/// The `node_count` shorthand is kept as written so validation can point at
/// it; [`Config::node_groups`] expands it into a single group on demand.
/// Override lists whose toggle is on are never consulted, so a warning is
/// emitted if any were supplied anyway.
fn normalize_config(config: Config) -> Config {
    match (config.node_count, config.groups.is_empty()) {
        (Some(count), true) => debug!("Using node_count shorthand: one group of {}", count),
        (Some(_), false) => {
            warn!("Both node_count and groups are set; node_count will be rejected by validation")
        }
        _ => {}
    }

    if config.overrides.same_os && !config.overrides.os_images.is_empty() {
        warn!("os_images is ignored because same_os is enabled");
    }
    if config.overrides.same_hardware_type && !config.overrides.hardware_types.is_empty() {
        warn!("hardware_types is ignored because same_hardware_type is enabled");
    }

    info!(
        "Loaded {} node group(s) describing {} node(s)",
        config.node_groups().len(),
        config.total_node_count()
    );

    config
}
