// src/cli.rs
//! CLI definitions for catalog-verify
//!
//! Command implementations live in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog-verify")]
#[command(author, version)]
#[command(about = "Run a manifest converter over every app in a catalog and report the results", long_about = None)]
pub struct Cli {
    /// Configuration file (default: catalog-verify.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the converter over every application in the source catalog
    Run {
        /// Source catalog directory (overrides the config file)
        #[arg(long)]
        source: Option<PathBuf>,

        /// Destination catalog directory (overrides the config file)
        #[arg(long)]
        destination: Option<PathBuf>,

        /// Artifact file name the converter writes (overrides the config file)
        #[arg(long)]
        artifact: Option<String>,

        /// Kill the converter after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Print the full run report as JSON instead of per-app lines
        #[arg(long)]
        json: bool,

        /// Also write the JSON run report to this file
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },

    /// List the configured exclusions and their rationale
    Exclusions,

    /// Write a starter configuration file
    InitConfig {
        /// Where to write the configuration
        #[arg(short, long, default_value = "catalog-verify.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::parse_from([
            "catalog-verify",
            "run",
            "--source",
            "umbrel-apps",
            "--timeout",
            "30",
            "--no-color",
            "-c",
            "ci.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        match cli.command {
            Commands::Run {
                source,
                timeout,
                no_color,
                json,
                ..
            } => {
                assert_eq!(source, Some(PathBuf::from("umbrel-apps")));
                assert_eq!(timeout, Some(30));
                assert!(no_color);
                assert!(!json);
            }
            _ => panic!("expected run"),
        }
    }
}
