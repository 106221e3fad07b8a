// tests/common/mod.rs

//! Shared test utilities for integration tests.

#![allow(dead_code)]

use catalog_verify::{ConverterConfig, ExclusionEntry, ExclusionReason, HarnessConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Converter script used by the integration tests.
///
/// Invoked as `sh -c <script> converter convert <app dir>`, so `$2` is the
/// application directory. Behavior is driven by marker files the fixture
/// drops into each application:
/// - `fail`: print a diagnostic and exit 1
/// - `fail-with-artifact`: write app.yml, then exit 2
/// - `no-artifact`: exit 0 without writing anything
/// - `hang`: sleep well past any test timeout
/// - `chatty`: print a line on stdout, then convert normally
/// - otherwise: write app.yml and exit 0
pub const CONVERTER_SCRIPT: &str = r#"
app="$2"
if [ -e "$app/fail" ]; then
    echo "No services found in $(basename "$app")" >&2
    exit 1
fi
if [ -e "$app/fail-with-artifact" ]; then
    echo "version: 4" > "$app/app.yml"
    exit 2
fi
if [ -e "$app/no-artifact" ]; then
    exit 0
fi
if [ -e "$app/hang" ]; then
    exec sleep 30
fi
if [ -e "$app/chatty" ]; then
    echo "converter says hello from $(basename "$app")"
fi
echo "version: 4" > "$app/app.yml"
"#;

/// Scratch source and destination catalogs.
///
/// Keep the struct alive for as long as the catalogs are needed.
pub struct Catalogs {
    pub root: TempDir,
}

impl Catalogs {
    pub fn new() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("umbrel-apps")).unwrap();
        fs::create_dir(root.path().join("apps")).unwrap();
        Self { root }
    }

    pub fn source(&self) -> PathBuf {
        self.root.path().join("umbrel-apps")
    }

    pub fn destination(&self) -> PathBuf {
        self.root.path().join("apps")
    }

    /// Add an application to the source catalog with optional marker files
    pub fn add_app(&self, id: &str, markers: &[&str]) -> PathBuf {
        let dir = self.source().join(id);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("umbrel-app.yml"), format!("id: {}\n", id)).unwrap();
        for marker in markers {
            fs::write(dir.join(marker), "").unwrap();
        }
        dir
    }

    /// Add an application to the destination catalog
    pub fn add_existing(&self, id: &str) {
        fs::create_dir(self.destination().join(id)).unwrap();
    }

    /// Configuration running the marker-driven converter script
    pub fn config(&self, excluded: &[&str]) -> HarnessConfig {
        HarnessConfig {
            source_catalog: self.source(),
            destination_catalog: self.destination(),
            artifact: "app.yml".to_string(),
            converter: script_converter(),
            exclusions: excluded
                .iter()
                .map(|id| ExclusionEntry::new(*id, ExclusionReason::Native, "Built-in"))
                .collect(),
        }
    }

    /// Write `config` as a TOML file and return its path
    pub fn write_config(&self, config: &HarnessConfig) -> PathBuf {
        let path = self.root.path().join("catalog-verify.toml");
        fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        path
    }
}

pub fn script_converter() -> ConverterConfig {
    ConverterConfig {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            CONVERTER_SCRIPT.to_string(),
            "converter".to_string(),
        ],
        subcommand: Some("convert".to_string()),
        working_dir: None,
        timeout_secs: None,
        passthrough_stdout: false,
    }
}

pub fn artifact_exists(app_dir: &Path) -> bool {
    app_dir.join("app.yml").is_file()
}
