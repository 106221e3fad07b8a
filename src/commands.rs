// src/commands.rs
//! Command handlers for the catalog-verify CLI

use anyhow::{Context, Result, bail};
use catalog_verify::config::{DEFAULT_CONFIG_PATH, STARTER_CONFIG};
use catalog_verify::{
    ConsoleReporter, ConversionInvoker, Harness, HarnessConfig, LogReporter, RunReport,
};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;

/// Overrides and output options for `run`
#[derive(Debug, Default)]
pub struct RunOptions {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub artifact: Option<String>,
    pub timeout: Option<u64>,
    pub no_color: bool,
    pub json: bool,
    pub report: Option<PathBuf>,
}

/// Load the configuration file
///
/// An explicitly named file must exist. Without one, `catalog-verify.toml`
/// in the working directory is used when present and the built-in defaults
/// otherwise.
pub fn load_config(path: Option<&Path>) -> Result<HarnessConfig> {
    if let Some(path) = path {
        return Ok(HarnessConfig::load(path)?);
    }

    let default = Path::new(DEFAULT_CONFIG_PATH);
    if default.exists() {
        Ok(HarnessConfig::load(default)?)
    } else {
        info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
        Ok(HarnessConfig::default())
    }
}

/// Apply command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut HarnessConfig, opts: &RunOptions) {
    if let Some(source) = &opts.source {
        config.source_catalog = source.clone();
    }
    if let Some(destination) = &opts.destination {
        config.destination_catalog = destination.clone();
    }
    if let Some(artifact) = &opts.artifact {
        config.artifact = artifact.clone();
    }
    if let Some(timeout) = opts.timeout {
        config.converter.timeout_secs = Some(timeout);
    }
}

fn use_color(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    fs::write(path, json)
        .with_context(|| format!("Failed to write run report: {}", path.display()))?;
    info!("Run report written to {}", path.display());
    Ok(())
}

/// Verify every application in the source catalog
pub fn cmd_run(mut config: HarnessConfig, opts: RunOptions) -> Result<()> {
    apply_overrides(&mut config, &opts);

    let harness = Harness::new(&config).context("Cannot start verification run")?;
    let invoker = ConversionInvoker::new(&config.converter);

    let report = if opts.json {
        harness.run(&invoker, &mut LogReporter)?
    } else {
        let mut reporter = ConsoleReporter::stdout(use_color(opts.no_color));
        harness.run(&invoker, &mut reporter)?
    };

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    if let Some(path) = &opts.report {
        write_report(&report, path)?;
    }

    Ok(())
}

/// List configured exclusions
pub fn cmd_exclusions(config: &HarnessConfig) -> Result<()> {
    let policy = config.exclusion_policy()?;
    if policy.is_empty() {
        println!("No exclusions configured");
        return Ok(());
    }

    let width = policy.iter().map(|e| e.id.len()).max().unwrap_or(0);
    for entry in policy.iter() {
        println!(
            "{:<width$}  {:<11}  {}",
            entry.id,
            entry.reason,
            entry.rationale,
            width = width
        );
    }
    println!("{} exclusions", policy.len());
    Ok(())
}

/// Write a starter configuration file
pub fn cmd_init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }
    fs::write(output, STARTER_CONFIG)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Wrote starter configuration to {}", output.display());
    Ok(())
}
