// src/exclusion.rs

//! Exclusion policy
//!
//! Applications on the exclusion list are never handed to the converter.
//! They still count toward the run total and are reported as Skipped.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why an application is excluded from verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionReason {
    /// The destination platform already ships this application natively
    Native,
    /// The destination platform carries its own custom implementation
    Custom,
    /// Deliberately not supported
    Unsupported,
}

impl ExclusionReason {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Custom => "custom",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One configured exclusion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionEntry {
    /// Application identifier (directory name in the source catalog)
    pub id: String,
    /// Reason category
    pub reason: ExclusionReason,
    /// Free-text explanation
    pub rationale: String,
}

impl ExclusionEntry {
    pub fn new(id: impl Into<String>, reason: ExclusionReason, rationale: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason,
            rationale: rationale.into(),
        }
    }
}

/// Validated, immutable set of exclusions keyed by application identifier
#[derive(Debug, Clone, Default)]
pub struct ExclusionPolicy {
    entries: BTreeMap<String, ExclusionEntry>,
}

impl ExclusionPolicy {
    /// Build a policy, rejecting blank and duplicate identifiers
    pub fn new(entries: impl IntoIterator<Item = ExclusionEntry>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.id.trim().is_empty() {
                return Err(Error::ConfigurationError(
                    "exclusion entry with an empty id".to_string(),
                ));
            }
            if entry.id.contains('/') || entry.id.contains('\\') {
                return Err(Error::ConfigurationError(format!(
                    "exclusion id '{}' must be a directory name, not a path",
                    entry.id
                )));
            }
            if map.contains_key(&entry.id) {
                return Err(Error::ConfigurationError(format!(
                    "application '{}' is excluded more than once",
                    entry.id
                )));
            }
            map.insert(entry.id.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    /// Check if an application is excluded
    pub fn is_excluded(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Look up the exclusion for an application
    pub fn get(&self, id: &str) -> Option<&ExclusionEntry> {
        self.entries.get(id)
    }

    /// All exclusions, ordered by identifier
    pub fn iter(&self) -> impl Iterator<Item = &ExclusionEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
