// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: configuration file
fn config_arg() -> Arg {
    Arg::new("config")
        .short('c')
        .long("config")
        .value_name("PATH")
        .global(true)
        .help("Configuration file (default: catalog-verify.toml if present)")
}

fn flag(name: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(long).action(ArgAction::SetTrue).help(help)
}

fn build_cli() -> Command {
    Command::new("catalog-verify")
        .version(env!("CARGO_PKG_VERSION"))
        .author("catalog-verify Contributors")
        .about("Run a manifest converter over every app in a catalog and report the results")
        .arg(config_arg())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Log progress to stderr"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("run")
                .about("Run the converter over every application in the source catalog")
                .arg(Arg::new("source").long("source").help("Source catalog directory"))
                .arg(
                    Arg::new("destination")
                        .long("destination")
                        .help("Destination catalog directory"),
                )
                .arg(
                    Arg::new("artifact")
                        .long("artifact")
                        .help("Artifact file name the converter writes"),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_name("SECS")
                        .help("Kill the converter after this many seconds"),
                )
                .arg(flag("no_color", "no-color", "Disable colored output"))
                .arg(flag(
                    "json",
                    "json",
                    "Print the full run report as JSON instead of per-app lines",
                ))
                .arg(
                    Arg::new("report")
                        .long("report")
                        .value_name("PATH")
                        .help("Also write the JSON run report to this file"),
                ),
        )
        .subcommand(
            Command::new("exclusions").about("List the configured exclusions and their rationale"),
        )
        .subcommand(
            Command::new("init-config")
                .about("Write a starter configuration file")
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value("catalog-verify.toml")
                        .help("Where to write the configuration"),
                )
                .arg(flag("force", "force", "Overwrite an existing file")),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Rendered into OUT_DIR
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("catalog-verify.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
