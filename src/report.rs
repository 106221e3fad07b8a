// src/report.rs

//! Run reporting
//!
//! Classification never prints anything itself. Results are handed to a
//! [`Reporter`], which decides how they are presented:
//! - `ConsoleReporter`: one tagged line per application, optionally colored
//! - `LogReporter`: the same information through tracing
//! - `SilentReporter`: no output, for JSON mode and tests

use crate::aggregate::RunSummary;
use crate::outcome::{ConversionResult, Outcome};
use std::io::{self, Write};
use tracing::{info, warn};

/// Receives results as the run progresses
pub trait Reporter {
    /// Called once per application, in processing order
    fn application(&mut self, result: &ConversionResult) -> io::Result<()>;

    /// Called once after the last application
    fn summary(&mut self, summary: &RunSummary) -> io::Result<()>;
}

/// Plain or ANSI-colored line output
pub struct ConsoleReporter<W: Write> {
    out: W,
    color: bool,
}

impl ConsoleReporter<io::Stdout> {
    /// Report to standard output
    pub fn stdout(color: bool) -> Self {
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn tag(&self, outcome: Outcome) -> String {
        if !self.color {
            return format!("[{}]", outcome.label());
        }
        let code = match outcome {
            Outcome::Passed => "32",
            Outcome::Failed => "31",
            Outcome::Skipped => "33",
        };
        format!("\x1b[{}m[{}]\x1b[0m", code, outcome.label())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn application(&mut self, result: &ConversionResult) -> io::Result<()> {
        let tag = self.tag(result.outcome);
        writeln!(self.out, "{} {}", tag, result.id)?;
        if let Some(error) = &result.error {
            for line in error.to_string().lines() {
                writeln!(self.out, "    {}", line)?;
            }
        }
        Ok(())
    }

    fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        for line in summary.lines() {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }
}

/// Reports through tracing at info level, failures at warn
#[derive(Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn application(&mut self, result: &ConversionResult) -> io::Result<()> {
        match &result.error {
            Some(error) => warn!(app = %result.id, unique = result.unique, "{}: {}", result.outcome, error),
            None => info!(app = %result.id, unique = result.unique, "{}", result.outcome),
        }
        Ok(())
    }

    fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        for line in summary.lines() {
            info!("{}", line);
        }
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn application(&mut self, _result: &ConversionResult) -> io::Result<()> {
        Ok(())
    }

    fn summary(&mut self, _summary: &RunSummary) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;

    fn render(color: bool, results: &[ConversionResult], summary: &RunSummary) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new(), color);
        for result in results {
            reporter.application(result).unwrap();
        }
        reporter.summary(summary).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let results = vec![
            ConversionResult::passed("mempool", true),
            ConversionResult::failed(
                "nextcloud",
                ApplicationError::InvocationFailure(
                    "exited with status 1\nNo services found".to_string(),
                ),
                false,
            ),
            ConversionResult::skipped("bitcoin"),
        ];
        let summary = RunSummary {
            total: 3,
            passed: 1,
            failed: 1,
            skipped: 1,
            passed_unique: 1,
            failed_unique: 0,
        };

        let output = render(false, &results, &summary);
        let expected = "\
[PASSED] mempool
[FAILED] nextcloud
    Converter invocation failed: exited with status 1
    No services found
[SKIPPED] bitcoin
Passed: 1/3 (33.33%), 1 unique
Failed: 1/3 (33.33%), 0 unique
Skipped: 1/3 (33.33%)
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_colored_tags() {
        let output = render(
            true,
            &[
                ConversionResult::passed("a", true),
                ConversionResult::skipped("b"),
            ],
            &RunSummary::default(),
        );
        assert!(output.contains("\x1b[32m[PASSED]\x1b[0m a"));
        assert!(output.contains("\x1b[33m[SKIPPED]\x1b[0m b"));
        assert!(output.ends_with("No applications found\n"));
    }

    #[test]
    fn test_silent_and_log_reporters_accept_everything() {
        let result = ConversionResult::passed("a", true);
        let summary = RunSummary::default();

        let mut silent = SilentReporter;
        silent.application(&result).unwrap();
        silent.summary(&summary).unwrap();

        let mut log = LogReporter;
        log.application(&result).unwrap();
        log.summary(&summary).unwrap();
    }
}
