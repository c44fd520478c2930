use clap::Parser;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use topocomp::catalog::{self, CatalogEntry};
use topocomp::config_loader;
use topocomp::orchestrator::{self, CompileError};
use topocomp::request::OutputFormat;

/// Compile a declarative node-group description into a topology request
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology configuration YAML file
    #[arg(short, long, required_unless_present = "list_catalog")]
    config: Option<PathBuf>,

    /// Output path for the request document
    #[arg(short, long, default_value = "request.yaml")]
    output: PathBuf,

    /// Output format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Only validate the configuration, do not write a request
    #[arg(long)]
    check: bool,

    /// Print the image, hardware and link speed catalogs and exit
    #[arg(long)]
    list_catalog: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if args.list_catalog {
        print_catalog();
        return Ok(());
    }

    let config_path = args.config.ok_or_else(|| eyre!("--config is required"))?;
    info!("Configuration file: {:?}", config_path);

    let config = config_loader::load_config(&config_path)?;

    if args.check {
        return match orchestrator::compile(&config) {
            Ok(graph) => {
                info!(
                    "Configuration is valid: {} node(s), {} link(s)",
                    graph.nodes.len(),
                    graph.links.len()
                );
                Ok(())
            }
            Err(e) => Err(report(e)),
        };
    }

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&args.output));
    info!("Output file: {:?} ({:?})", args.output, format);

    match orchestrator::compile_request(&config) {
        Ok(document) => document.write(&args.output, format)?,
        Err(e) => return Err(report(e)),
    }

    info!("Compilation completed successfully");
    Ok(())
}

/// Print every validation error once and turn the failure into a report
fn report(error: CompileError) -> color_eyre::eyre::Error {
    eprint!("{}", error_listing(&error));
    eyre!(error)
}

fn error_listing(error: &CompileError) -> String {
    error
        .errors()
        .iter()
        .map(|e| format!("  {} - {}\n", e.field_path, e.message))
        .collect()
}

fn print_catalog() {
    fn print_entries(title: &str, entries: &[CatalogEntry]) {
        println!("{}:", title);
        for e in entries {
            let token = if e.token.is_empty() { "\"\"" } else { e.token };
            println!("  {:<72} {}", token, e.label);
        }
    }

    print_entries("OS images", catalog::OS_IMAGES);
    print_entries("Hardware types", catalog::HARDWARE_TYPES);
    println!("Link speeds (kbps):");
    for (kbps, label) in catalog::LINK_SPEEDS {
        println!("  {:<72} {}", kbps, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["topocomp", "--config", "topology.yaml"]);

        assert_eq!(args.config, Some(PathBuf::from("topology.yaml")));
        assert_eq!(args.output, PathBuf::from("request.yaml"));
        assert_eq!(args.format, None);
        assert!(!args.check);
    }

    #[test]
    fn test_format_and_check_args() {
        let args = Args::parse_from([
            "topocomp",
            "--config",
            "topology.yaml",
            "--output",
            "out/request.json",
            "--format",
            "json",
            "--check",
        ]);

        assert_eq!(args.format, Some(OutputFormat::Json));
        assert!(args.check);
    }

    #[test]
    fn test_error_listing_has_one_line_per_error() {
        let config = config_loader::parse_config(
            r#"
defaults:
  storage:
    size_gb: 250
groups:
  - count: 0
"#,
        )
        .unwrap();
        let error = orchestrator::compile(&config).unwrap_err();
        let listing = error_listing(&error);

        assert_eq!(listing.lines().count(), 2);
        assert_eq!(listing.matches("defaults.storage.size_gb").count(), 1);
        assert!(listing.contains("  groups[0].count - Group 0 must contain at least 1 node"));
    }

    #[test]
    fn test_config_required_without_list_catalog() {
        assert!(Args::try_parse_from(["topocomp"]).is_err());
        let args = Args::try_parse_from(["topocomp", "--list-catalog"]).unwrap();
        assert!(args.list_catalog);
        assert_eq!(args.config, None);
    }
}
