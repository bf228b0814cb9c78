//! # Operand CLI
//!
//! Command-line utilities for merging specs, comparing channels, and
//! checking discovery documents.

use anyhow::{bail, Context, Result};
use operand_cluster::{resource_exists, resource_namespaced, OperatorSettings, StaticDiscovery};
use operand_core::{compare_channel_version, merge_cr, try_merge_cr};
use std::env;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let output = run(&args)?;
    println!("{output}");

    Ok(())
}

/// Execute one command and return what it prints.
fn run(args: &[String]) -> Result<String> {
    let Some(command) = args.first() else {
        return Ok(help());
    };
    let rest = &args[1..];
    tracing::debug!(%command, args = rest.len(), "Running command");

    match command.as_str() {
        "merge" => {
            let strict = rest.iter().any(|arg| arg == "--strict");
            let paths: Vec<&String> = rest.iter().filter(|arg| *arg != "--strict").collect();
            let [default_path, changed_path] = paths.as_slice() else {
                bail!("Usage: operand merge <default.json> <changed.json> [--strict]");
            };

            let default_cr = read_input(default_path)?;
            let changed_cr = read_input(changed_path)?;
            let merged = if strict {
                try_merge_cr(&default_cr, &changed_cr).context("Failed to merge specs")?
            } else {
                merge_cr(&default_cr, &changed_cr)
            };

            serde_json::to_string_pretty(&merged).context("Failed to encode merged spec")
        }
        "compare" => {
            let [v1, v2] = rest else {
                bail!("Usage: operand compare <v1> <v2>");
            };
            let v1_is_larger = compare_channel_version(v1, v2)
                .with_context(|| format!("Failed to compare {v1} with {v2}"))?;
            Ok(v1_is_larger.to_string())
        }
        "resource-exists" | "resource-namespaced" => {
            let [discovery_path, group_version, kind] = rest else {
                bail!("Usage: operand {command} <discovery.json> <groupVersion> <kind>");
            };
            let bytes = read_input(discovery_path)?;
            let dc = StaticDiscovery::from_json(&bytes)
                .with_context(|| format!("Invalid discovery document {discovery_path}"))?;

            let answer = if command == "resource-exists" {
                resource_exists(&dc, group_version, kind)?
            } else {
                resource_namespaced(&dc, group_version, kind)?
            };
            Ok(answer.to_string())
        }
        "env" => {
            let settings = OperatorSettings::from_env();
            Ok(format!(
                "operator_namespace={}\nwatch_namespace={}\ninstall_scope={}\nisolated_mode={}\noperator_checker_disabled={}",
                settings.operator_namespace,
                settings.watch_namespace,
                settings.install_scope,
                settings.isolated_mode,
                settings.operator_checker_disabled,
            ))
        }
        "help" | "--help" | "-h" => Ok(help()),
        cmd => bail!("Unknown command: {cmd}\n\n{}", help()),
    }
}

fn read_input(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn help() -> String {
    r#"Operand CLI

USAGE:
    operand <COMMAND> [OPTIONS]

COMMANDS:
    merge <default.json> <changed.json> [--strict]
                      Fill gaps in a changed spec from a default spec
    compare <v1> <v2>  Print whether channel v1 is newer than v2
    resource-exists <discovery.json> <groupVersion> <kind>
                      Print whether a kind is served
    resource-namespaced <discovery.json> <groupVersion> <kind>
                      Print whether a kind is namespace-scoped
    env               Show operator settings read from the environment
    help              Show this help message

EXAMPLES:
    operand merge template.json request.json
    operand compare v3.20 v3
"#
    .to_string()
}
