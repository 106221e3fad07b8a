// src/artifact.rs

//! Converted-manifest artifact handling
//!
//! The converter signals success by writing a fixed-named file into the
//! application directory. Any copy left over from a previous run is removed
//! before the converter starts so a stale file can never count as a pass.

use crate::catalog::ApplicationEntry;
use crate::error::ApplicationError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

/// Locates, clears and checks the per-application artifact
#[derive(Debug, Clone)]
pub struct ArtifactResetter {
    file_name: String,
}

impl ArtifactResetter {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Expected artifact path for an application
    pub fn artifact_path(&self, entry: &ApplicationEntry) -> PathBuf {
        entry.file(&self.file_name)
    }

    /// Remove a stale artifact
    ///
    /// Returns whether a file was actually removed. Anything other than
    /// "already absent" is a reset failure for this application.
    pub fn reset(&self, entry: &ApplicationEntry) -> Result<bool, ApplicationError> {
        let path = self.artifact_path(entry);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed stale artifact {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ApplicationError::ResetFailure(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Check if the converter left an artifact behind
    pub fn is_present(&self, entry: &ApplicationEntry) -> bool {
        self.artifact_path(entry).is_file()
    }
}
