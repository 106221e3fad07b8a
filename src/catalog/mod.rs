// src/catalog/mod.rs

//! Catalog access
//!
//! A catalog is a directory with one subdirectory per application. The
//! source catalog is scanned for applications to convert; the destination
//! catalog is only ever read, to tell which applications are new to it.

mod index;
mod scanner;

pub use index::DestinationCatalogIndex;
pub use scanner::CatalogScanner;

use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Version-control metadata directories that never count as applications
pub const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// One application in the source catalog
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApplicationEntry {
    /// Directory name, used as the application identifier
    pub id: String,
    /// Full path of the application directory
    pub path: PathBuf,
}

impl ApplicationEntry {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    /// Path of a file inside the application directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

/// Check if a directory name is version-control metadata
pub fn is_vcs_dir(name: &OsStr) -> bool {
    VCS_DIRS.iter().any(|vcs| name == OsStr::new(vcs))
}

/// Ensure a catalog root exists and is a directory
pub(crate) fn check_catalog_root(root: &Path, role: &str) -> Result<()> {
    if !root.exists() {
        return Err(Error::ConfigurationError(format!(
            "{} catalog not found: {}",
            role,
            root.display()
        )));
    }
    if !root.is_dir() {
        return Err(Error::ConfigurationError(format!(
            "{} catalog is not a directory: {}",
            role,
            root.display()
        )));
    }
    Ok(())
}
