// src/aggregate.rs

//! Run statistics

use crate::outcome::{ConversionResult, Outcome};
use serde::Serialize;

/// Counters for a run
///
/// At the end of a run `passed + failed + skipped == total`, and each unique
/// sub-count is bounded by its parent counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Passed applications absent from the destination catalog
    pub passed_unique: usize,
    /// Failed applications absent from the destination catalog
    pub failed_unique: usize,
}

impl RunSummary {
    /// Share of the total as a percentage, rounded to two decimals
    ///
    /// An empty run reports 0 for everything.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let raw = count as f64 * 100.0 / self.total as f64;
        (raw * 100.0).round() / 100.0
    }

    pub fn passed_percent(&self) -> f64 {
        self.percent(self.passed)
    }

    pub fn failed_percent(&self) -> f64 {
        self.percent(self.failed)
    }

    pub fn skipped_percent(&self) -> f64 {
        self.percent(self.skipped)
    }

    /// Check the counter invariants
    pub fn is_consistent(&self) -> bool {
        self.passed + self.failed + self.skipped == self.total
            && self.passed_unique <= self.passed
            && self.failed_unique <= self.failed
    }

    /// Human-readable summary lines
    pub fn lines(&self) -> Vec<String> {
        if self.total == 0 {
            return vec!["No applications found".to_string()];
        }
        vec![
            format!(
                "Passed: {}/{} ({}%), {} unique",
                self.passed,
                self.total,
                self.passed_percent(),
                self.passed_unique
            ),
            format!(
                "Failed: {}/{} ({}%), {} unique",
                self.failed,
                self.total,
                self.failed_percent(),
                self.failed_unique
            ),
            format!(
                "Skipped: {}/{} ({}%)",
                self.skipped,
                self.total,
                self.skipped_percent()
            ),
        ]
    }
}

/// Accumulates results as they arrive
#[derive(Debug, Default)]
pub struct RunAggregator {
    summary: RunSummary,
}

impl RunAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified application
    pub fn record(&mut self, result: &ConversionResult) {
        let s = &mut self.summary;
        s.total += 1;
        match result.outcome {
            Outcome::Passed => {
                s.passed += 1;
                if result.unique {
                    s.passed_unique += 1;
                }
            }
            Outcome::Failed => {
                s.failed += 1;
                if result.unique {
                    s.failed_unique += 1;
                }
            }
            Outcome::Skipped => s.skipped += 1,
        }
    }

    /// Current totals; calling this does not change any state
    pub fn summarize(&self) -> RunSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;

    fn failure() -> ApplicationError {
        ApplicationError::InvocationFailure("exited with status 1".to_string())
    }

    #[test]
    fn test_record_counts() {
        let mut agg = RunAggregator::new();
        agg.record(&ConversionResult::passed("a", true));
        agg.record(&ConversionResult::passed("b", false));
        agg.record(&ConversionResult::failed("c", failure(), true));
        agg.record(&ConversionResult::skipped("d"));
        agg.record(&ConversionResult::skipped("e"));

        let summary = agg.summarize();
        assert_eq!(
            summary,
            RunSummary {
                total: 5,
                passed: 2,
                failed: 1,
                skipped: 2,
                passed_unique: 1,
                failed_unique: 1,
            }
        );
        assert!(summary.is_consistent());
        assert_eq!(summary.passed_percent(), 40.0);
        assert_eq!(summary.failed_percent(), 20.0);
        assert_eq!(summary.skipped_percent(), 40.0);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let mut agg = RunAggregator::new();
        agg.record(&ConversionResult::passed("a", true));
        let first = agg.summarize();
        let second = agg.summarize();
        assert_eq!(first, second);
        assert_eq!(second.total, 1);
    }

    #[test]
    fn test_empty_run() {
        let summary = RunAggregator::new().summarize();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.passed_percent(), 0.0);
        assert_eq!(summary.skipped_percent(), 0.0);
        assert!(summary.is_consistent());
        assert_eq!(summary.lines(), vec!["No applications found"]);
    }

    #[test]
    fn test_percent_rounding() {
        let summary = RunSummary {
            total: 3,
            passed: 1,
            failed: 2,
            ..Default::default()
        };
        assert_eq!(summary.passed_percent(), 33.33);
        assert_eq!(summary.failed_percent(), 66.67);
    }

    #[test]
    fn test_lines() {
        let summary = RunSummary {
            total: 5,
            passed: 2,
            failed: 1,
            skipped: 2,
            passed_unique: 2,
            failed_unique: 0,
        };
        assert_eq!(
            summary.lines(),
            vec![
                "Passed: 2/5 (40%), 2 unique",
                "Failed: 1/5 (20%), 0 unique",
                "Skipped: 2/5 (40%)",
            ]
        );
    }
}
