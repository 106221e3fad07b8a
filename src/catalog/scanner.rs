// src/catalog/scanner.rs

//! Source catalog enumeration

use super::{ApplicationEntry, check_catalog_root, is_vcs_dir};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Enumerates applications in a source catalog
#[derive(Debug, Clone)]
pub struct CatalogScanner {
    root: PathBuf,
}

impl CatalogScanner {
    /// Create a scanner, failing if the root is missing or not a directory
    pub fn new(root: &Path) -> Result<Self> {
        check_catalog_root(root, "Source")?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield one entry per application directory
    ///
    /// Entries come in whatever order the filesystem lists them. Files,
    /// version-control metadata and entries that cannot be read are skipped.
    /// Directories with non-UTF8 names are kept under a lossy identifier.
    pub fn entries(&self) -> Result<impl Iterator<Item = ApplicationEntry>> {
        let read_dir = fs::read_dir(&self.root)?;

        Ok(read_dir.filter_map(|dir_entry| {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable catalog entry: {}", e);
                    return None;
                }
            };

            let name = dir_entry.file_name();
            if is_vcs_dir(&name) {
                return None;
            }

            let path = dir_entry.path();
            // Follows symlinks, so a linked application directory still counts
            if !path.is_dir() {
                debug!("Ignoring non-directory {}", path.display());
                return None;
            }

            // The converter still gets the real path; only the id is lossy
            let id = match name.into_string() {
                Ok(id) => id,
                Err(raw) => {
                    warn!("Application directory has a non-UTF8 name: {:?}", raw);
                    raw.to_string_lossy().into_owned()
                }
            };
            Some(ApplicationEntry::new(id, path))
        }))
    }

    /// Collect all entries sorted by identifier
    pub fn scan_sorted(&self) -> Result<Vec<ApplicationEntry>> {
        let mut entries: Vec<ApplicationEntry> = self.entries()?.collect();
        entries.sort();
        debug!(
            "Found {} applications in {}",
            entries.len(),
            self.root.display()
        );
        Ok(entries)
    }
}
