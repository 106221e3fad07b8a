// src/error.rs

//! Error types for the verification harness
//!
//! Two layers of errors exist:
//! - [`Error`]: harness-level failures that abort a run before any
//!   application is processed (bad configuration, missing catalogs)
//! - [`ApplicationError`]: failures scoped to a single application. These are
//!   recovered inside the run loop and recorded as a Failed outcome.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Harness-level errors
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Failed to read configuration file {path}: {source}")]
    ConfigReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerializeError(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Per-application failures
///
/// None of these ever escape the per-application boundary; the harness turns
/// each of them into a Failed result and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ApplicationError {
    /// Converter could not be spawned or exited non-zero
    #[error("Converter invocation failed: {0}")]
    InvocationFailure(String),

    /// Converter reported success but left no artifact behind
    #[error("Converter exited successfully but produced no {}", .0.display())]
    ArtifactMissing(PathBuf),

    /// Stale artifact could not be removed before invocation
    #[error("Failed to remove stale artifact: {0}")]
    ResetFailure(String),

    /// Converter exceeded the configured deadline and was killed
    #[error("Converter timed out after {0} seconds")]
    Timeout(u64),
}
