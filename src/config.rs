// src/config.rs

//! Harness configuration
//!
//! Configuration is read from a TOML file. Every field has a default, so an
//! empty file (or no file at all) describes the Umbrel to Citadel setup the
//! harness was first written for, minus the exclusion list.
//!
//! # Example catalog-verify.toml
//!
//! ```toml
//! source_catalog = "umbrel-apps"
//! destination_catalog = "apps"
//! artifact = "app.yml"
//!
//! [converter]
//! program = "cargo"
//! args = ["run", "--all-features", "--"]
//! subcommand = "umbrel-to-citadel"
//! timeout_secs = 600
//!
//! [[exclude]]
//! id = "bitcoin"
//! reason = "native"
//! rationale = "Built-in on Citadel"
//! ```

use crate::error::{Error, Result};
use crate::exclusion::{ExclusionEntry, ExclusionPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "catalog-verify.toml";

/// File name the converter writes into each application directory
pub const DEFAULT_ARTIFACT: &str = "app.yml";

/// Starter configuration written by `init-config`
pub const STARTER_CONFIG: &str = r#"# catalog-verify configuration

# Catalog whose applications are converted (one subdirectory per app)
source_catalog = "umbrel-apps"

# Catalog the converted apps are destined for; only used to tell which
# applications are new to it
destination_catalog = "apps"

# Manifest the converter writes into each application directory
artifact = "app.yml"

[converter]
program = "cargo"
args = ["run", "--all-features", "--"]
subcommand = "umbrel-to-citadel"
# Kill the converter after this many seconds and count the app as failed
# timeout_secs = 600

[[exclude]]
id = "electrs"
reason = "custom"
rationale = "Custom implementation on Citadel"

[[exclude]]
id = "bitcoin"
reason = "native"
rationale = "Built-in on Citadel"

[[exclude]]
id = "lightning"
reason = "native"
rationale = "Built-in on Citadel"

[[exclude]]
id = "core-lightning"
reason = "native"
rationale = "Built-in on Citadel"

[[exclude]]
id = "tailscale"
reason = "unsupported"
rationale = "Very hacky on Umbrel, and available natively on Citadel anyway"
"#;

/// Top-level harness configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Source catalog root
    pub source_catalog: PathBuf,

    /// Destination catalog root (read-only)
    pub destination_catalog: PathBuf,

    /// Artifact file name expected inside each application directory
    pub artifact: String,

    /// How to launch the converter
    pub converter: ConverterConfig,

    /// Applications that are never verified
    #[serde(rename = "exclude")]
    pub exclusions: Vec<ExclusionEntry>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            source_catalog: PathBuf::from("umbrel-apps"),
            destination_catalog: PathBuf::from("apps"),
            artifact: DEFAULT_ARTIFACT.to_string(),
            converter: ConverterConfig::default(),
            exclusions: Vec::new(),
        }
    }
}

/// Converter command line
///
/// The final command is `<program> <args...> [subcommand] <app dir>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Executable to launch
    pub program: String,

    /// Leading arguments, including any build/run mode flags
    pub args: Vec<String>,

    /// Conversion subcommand placed right before the application path
    pub subcommand: Option<String>,

    /// Working directory for the converter (defaults to the harness's)
    pub working_dir: Option<PathBuf>,

    /// Optional deadline per application
    pub timeout_secs: Option<u64>,

    /// Forward the converter's stdout instead of discarding it
    pub passthrough_stdout: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: "cargo".to_string(),
            args: vec![
                "run".to_string(),
                "--all-features".to_string(),
                "--".to_string(),
            ],
            subcommand: Some("umbrel-to-citadel".to_string()),
            working_dir: None,
            timeout_secs: None,
            passthrough_stdout: false,
        }
    }
}

impl ConverterConfig {
    /// Per-application deadline, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl HarnessConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::parse(&content)?;
        debug!(
            "Loaded configuration from {} ({} exclusions)",
            path.display(),
            config.exclusions.len()
        );
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: HarnessConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Catalog existence is not checked here; that happens when a run starts
    /// so that `exclusions` and `init-config` work without catalogs on disk.
    pub fn validate(&self) -> Result<()> {
        if self.artifact.is_empty() {
            return Err(Error::ConfigurationError(
                "artifact file name must not be empty".to_string(),
            ));
        }

        let artifact = Path::new(&self.artifact);
        if artifact.components().count() != 1 || artifact.file_name().is_none() {
            return Err(Error::ConfigurationError(format!(
                "artifact must be a plain file name, got '{}'",
                self.artifact
            )));
        }

        if self.converter.program.trim().is_empty() {
            return Err(Error::ConfigurationError(
                "converter.program must not be empty".to_string(),
            ));
        }

        if matches!(&self.converter.subcommand, Some(sub) if sub.trim().is_empty()) {
            return Err(Error::ConfigurationError(
                "converter.subcommand must not be blank (omit it instead)".to_string(),
            ));
        }

        if self.converter.timeout_secs == Some(0) {
            return Err(Error::ConfigurationError(
                "converter.timeout_secs must be greater than zero".to_string(),
            ));
        }

        self.exclusion_policy().map(|_| ())
    }

    /// Build the exclusion policy described by this configuration
    pub fn exclusion_policy(&self) -> Result<ExclusionPolicy> {
        ExclusionPolicy::new(self.exclusions.iter().cloned())
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
