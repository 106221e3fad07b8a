// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so the report on stdout stays clean
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            source,
            destination,
            artifact,
            timeout,
            no_color,
            json,
            report,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_run(
                config,
                commands::RunOptions {
                    source,
                    destination,
                    artifact,
                    timeout,
                    no_color,
                    json,
                    report,
                },
            )
        }
        Commands::Exclusions => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_exclusions(&config)
        }
        Commands::InitConfig { output, force } => commands::cmd_init_config(&output, force),
    }
}
