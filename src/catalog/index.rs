// src/catalog/index.rs

//! Destination catalog snapshot for uniqueness checks

use super::{check_catalog_root, is_vcs_dir};
use crate::error::Result;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Set of application identifiers present in the destination catalog
///
/// Built once from a directory listing. Changes made to the destination
/// catalog after construction are not observed.
#[derive(Debug, Clone, Default)]
pub struct DestinationCatalogIndex {
    ids: HashSet<String>,
}

impl DestinationCatalogIndex {
    /// Snapshot the destination catalog
    pub fn load(root: &Path) -> Result<Self> {
        check_catalog_root(root, "Destination")?;

        let mut ids = HashSet::new();
        for dir_entry in fs::read_dir(root)? {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable destination entry: {}", e);
                    continue;
                }
            };

            let name = dir_entry.file_name();
            if is_vcs_dir(&name) || !dir_entry.path().is_dir() {
                continue;
            }
            if let Ok(id) = name.into_string() {
                ids.insert(id);
            }
        }

        debug!(
            "Indexed {} applications in destination catalog {}",
            ids.len(),
            root.display()
        );
        Ok(Self { ids })
    }

    /// Build an index from known identifiers
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if the destination catalog already has this application
    pub fn exists(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
