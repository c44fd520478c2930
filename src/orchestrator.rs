//! Compilation orchestrator.
//!
//! This module coordinates one compilation run: validate the configuration,
//! build the topology only if validation produced no errors, and hand the
//! result to the request document writer.

use crate::config::Config;
use crate::request::{OutputFormat, RequestDocument};
use crate::topology::{self, TopologyGraph};
use crate::utils::validation::{validate_config, ValidationError};
use log::info;
use std::path::Path;

/// Errors that stop a compilation run
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("configuration has {} validation error(s)", .0.len())]
    Invalid(Vec<ValidationError>),
}

impl CompileError {
    /// Every validation error behind this failure
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            CompileError::Invalid(errors) => errors,
        }
    }
}

/// Validate `config` and build its topology.
///
/// No topology is built when any validation error is found; the full error
/// list is returned instead.
pub fn compile(config: &Config) -> Result<TopologyGraph, CompileError> {
    let errors = validate_config(config);
    if !errors.is_empty() {
        return Err(CompileError::Invalid(errors));
    }
    Ok(topology::build(config))
}

/// Compile `config` into its request document without writing it
pub fn compile_request(config: &Config) -> Result<RequestDocument, CompileError> {
    let graph = compile(config)?;
    Ok(RequestDocument::from_topology(&graph, &config.general))
}

/// Compile `config` and write the request document to `output_path`
pub fn generate_request(
    config: &Config,
    output_path: &Path,
    format: OutputFormat,
) -> color_eyre::eyre::Result<RequestDocument> {
    let document = compile_request(config)?;
    document.write(output_path, format)?;
    info!(
        "Generated request with {} node(s) and {} link(s)",
        document.nodes.len(),
        document.links.len()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_compile_valid_config() {
        let graph = compile(&parse_config("node_count: 4").unwrap()).unwrap();
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.links.len(), 1);
    }

    #[test]
    fn test_compile_rejects_invalid_config() {
        let yaml = r#"
defaults:
  storage:
    size_gb: 250
node_count: 2
"#;
        let err = compile(&parse_config(yaml).unwrap()).unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].field_path, "defaults.storage.size_gb");
        assert_eq!(err.to_string(), "configuration has 1 validation error(s)");
    }

    #[test]
    fn test_generate_request_writes_nothing_on_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.yaml");
        let config = parse_config("node_count: 0").unwrap();

        assert!(generate_request(&config, &path, OutputFormat::Yaml).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_generate_request_writes_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("request.yaml");
        let config = parse_config("node_count: 3").unwrap();

        let doc = generate_request(&config, &path, OutputFormat::Yaml).unwrap();
        assert_eq!(doc.nodes.len(), 3);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("node2:eth1"));
    }
}
