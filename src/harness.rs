// src/harness.rs

//! The verification run loop
//!
//! For every application in the source catalog, in identifier order:
//!
//! 1. Excluded applications are recorded as Skipped and never touched
//! 2. Any stale artifact is removed
//! 3. The converter runs
//! 4. The outcome is classified and annotated with uniqueness
//! 5. The result is reported and counted
//!
//! Per-application problems become Failed results. Only configuration
//! problems detected before the loop starts end a run early.

use crate::aggregate::{RunAggregator, RunSummary};
use crate::artifact::ArtifactResetter;
use crate::catalog::{ApplicationEntry, CatalogScanner, DestinationCatalogIndex};
use crate::config::HarnessConfig;
use crate::error::Result;
use crate::exclusion::ExclusionPolicy;
use crate::invoker::Convert;
use crate::outcome::{ConversionResult, classify};
use crate::report::Reporter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Everything a finished run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub source_catalog: PathBuf,
    pub summary: RunSummary,
    pub results: Vec<ConversionResult>,
}

/// Verification harness bound to one pair of catalogs
#[derive(Debug)]
pub struct Harness {
    scanner: CatalogScanner,
    policy: ExclusionPolicy,
    resetter: ArtifactResetter,
    index: DestinationCatalogIndex,
}

impl Harness {
    /// Validate the catalogs and snapshot the destination catalog
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        let scanner = CatalogScanner::new(&config.source_catalog)?;
        let index = DestinationCatalogIndex::load(&config.destination_catalog)?;
        Ok(Self::from_parts(
            scanner,
            config.exclusion_policy()?,
            ArtifactResetter::new(config.artifact.clone()),
            index,
        ))
    }

    /// Assemble a harness from already-built components
    pub fn from_parts(
        scanner: CatalogScanner,
        policy: ExclusionPolicy,
        resetter: ArtifactResetter,
        index: DestinationCatalogIndex,
    ) -> Self {
        Self {
            scanner,
            policy,
            resetter,
            index,
        }
    }

    pub fn policy(&self) -> &ExclusionPolicy {
        &self.policy
    }

    /// Run the converter over the whole source catalog
    pub fn run<C>(&self, converter: &C, reporter: &mut dyn Reporter) -> Result<RunReport>
    where
        C: Convert + ?Sized,
    {
        let started_at = Utc::now();
        let entries = self.scanner.scan_sorted()?;
        self.warn_unmatched_exclusions(&entries);

        info!(
            "Verifying {} applications from {}",
            entries.len(),
            self.scanner.root().display()
        );

        let mut aggregator = RunAggregator::new();
        let mut results = Vec::with_capacity(entries.len());

        for entry in &entries {
            let result = self.process(entry, converter);
            if let Err(e) = reporter.application(&result) {
                warn!("Failed to report result for {}: {}", entry.id, e);
            }
            aggregator.record(&result);
            results.push(result);
        }

        let summary = aggregator.summarize();
        debug_assert!(summary.is_consistent());
        if let Err(e) = reporter.summary(&summary) {
            warn!("Failed to report run summary: {}", e);
        }

        Ok(RunReport {
            started_at,
            source_catalog: self.scanner.root().to_path_buf(),
            summary,
            results,
        })
    }

    /// Reset, convert and classify a single application
    pub fn process<C>(&self, entry: &ApplicationEntry, converter: &C) -> ConversionResult
    where
        C: Convert + ?Sized,
    {
        if let Some(exclusion) = self.policy.get(&entry.id) {
            debug!(
                "Skipping {} ({}: {})",
                entry.id, exclusion.reason, exclusion.rationale
            );
            return ConversionResult::skipped(&entry.id);
        }

        let unique = !self.index.exists(&entry.id);

        if let Err(e) = self.resetter.reset(entry) {
            return ConversionResult::failed(&entry.id, e, unique);
        }

        let invocation = converter.convert(entry);
        let artifact = self.resetter.artifact_path(entry);
        let present = self.resetter.is_present(entry);
        let verdict = classify(&invocation, &artifact, present);

        if verdict.is_ok() {
            if let Some(stderr) = invocation.stderr() {
                debug!("{} converted with diagnostics: {}", entry.id, stderr);
            }
        }

        ConversionResult::from_verdict(&entry.id, verdict, unique)
    }

    fn warn_unmatched_exclusions(&self, entries: &[ApplicationEntry]) {
        let present: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        for exclusion in self.policy.iter() {
            if !present.contains(exclusion.id.as_str()) {
                warn!(
                    "Excluded application '{}' is not in the source catalog",
                    exclusion.id
                );
            }
        }
    }
}
