// src/outcome.rs

//! Outcome classification
//!
//! # Precedence: exit status first
//!
//! A converter run is judged on two independent signals, checked in order:
//!
//! 1. The exit status. A non-zero exit, a spawn failure or a timeout is an
//!    unconditional failure. An artifact found afterwards does not change
//!    that, since it may be partial.
//! 2. The artifact. A converter that exits zero but leaves no artifact
//!    behind has failed as well.
//!
//! Only a zero exit together with a present artifact is a pass. Skipped is
//! decided before the converter is ever run and never comes out of
//! [`classify`].

use crate::error::ApplicationError;
use crate::invoker::Invocation;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Per-application verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
}

impl Outcome {
    /// Tag used in console output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Classified result for one application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    /// Application identifier
    pub id: String,
    pub outcome: Outcome,
    /// Why the application failed, for Failed outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApplicationError>,
    /// True if the destination catalog does not have this application yet
    pub unique: bool,
}

impl ConversionResult {
    pub fn passed(id: impl Into<String>, unique: bool) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Passed,
            error: None,
            unique,
        }
    }

    pub fn failed(id: impl Into<String>, error: ApplicationError, unique: bool) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Failed,
            error: Some(error),
            unique,
        }
    }

    /// Excluded applications are never annotated as unique
    pub fn skipped(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            outcome: Outcome::Skipped,
            error: None,
            unique: false,
        }
    }

    /// Build a result from a classification verdict
    pub fn from_verdict(
        id: impl Into<String>,
        verdict: Result<(), ApplicationError>,
        unique: bool,
    ) -> Self {
        match verdict {
            Ok(()) => Self::passed(id, unique),
            Err(error) => Self::failed(id, error, unique),
        }
    }
}

/// Classify a finished converter run
///
/// `Ok(())` is a pass; an error describes why the application failed. Pure
/// function of the invocation result and whether the artifact exists.
pub fn classify(
    invocation: &Invocation,
    artifact: &Path,
    artifact_present: bool,
) -> Result<(), ApplicationError> {
    match invocation {
        Invocation::Succeeded { .. } if artifact_present => Ok(()),
        Invocation::Succeeded { .. } => {
            Err(ApplicationError::ArtifactMissing(artifact.to_path_buf()))
        }
        Invocation::Failed { code, stderr } => {
            let status = match code {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            };
            let stderr = stderr.trim();
            let detail = if stderr.is_empty() {
                status
            } else {
                format!("{}\n{}", status, stderr)
            };
            Err(ApplicationError::InvocationFailure(detail))
        }
        Invocation::SpawnFailed(reason) => {
            Err(ApplicationError::InvocationFailure(reason.clone()))
        }
        Invocation::TimedOut { timeout, .. } => Err(ApplicationError::Timeout(timeout.as_secs())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    fn ok() -> Invocation {
        Invocation::Succeeded {
            stderr: String::new(),
        }
    }

    fn artifact() -> PathBuf {
        PathBuf::from("/catalog/mempool/app.yml")
    }

    #[test]
    fn test_success_with_artifact_passes() {
        assert_eq!(classify(&ok(), &artifact(), true), Ok(()));
    }

    #[test]
    fn test_success_without_artifact_fails() {
        assert_eq!(
            classify(&ok(), &artifact(), false),
            Err(ApplicationError::ArtifactMissing(artifact()))
        );
    }

    #[test]
    fn test_nonzero_exit_with_artifact_still_fails() {
        let invocation = Invocation::Failed {
            code: Some(2),
            stderr: "Unsupported key in docker-compose.yml\n".to_string(),
        };
        let err = classify(&invocation, &artifact(), true).unwrap_err();
        assert_eq!(
            err,
            ApplicationError::InvocationFailure(
                "exited with status 2\nUnsupported key in docker-compose.yml".to_string()
            )
        );
    }

    #[test]
    fn test_nonzero_exit_without_artifact_fails() {
        let invocation = Invocation::Failed {
            code: Some(101),
            stderr: String::new(),
        };
        assert_eq!(
            classify(&invocation, &artifact(), false),
            Err(ApplicationError::InvocationFailure(
                "exited with status 101".to_string()
            ))
        );
    }

    #[test]
    fn test_signal_termination_fails() {
        let invocation = Invocation::Failed {
            code: None,
            stderr: String::new(),
        };
        let err = classify(&invocation, &artifact(), true).unwrap_err();
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_spawn_failure_fails() {
        let invocation = Invocation::SpawnFailed("failed to spawn 'cargo': not found".to_string());
        assert!(matches!(
            classify(&invocation, &artifact(), true),
            Err(ApplicationError::InvocationFailure(_))
        ));
    }

    #[test]
    fn test_timeout_fails_with_distinct_error() {
        let invocation = Invocation::TimedOut {
            timeout: Duration::from_secs(600),
            stderr: String::new(),
        };
        assert_eq!(
            classify(&invocation, &artifact(), true),
            Err(ApplicationError::Timeout(600))
        );
    }

    #[test]
    fn test_result_constructors() {
        let passed = ConversionResult::from_verdict("mempool", Ok(()), true);
        assert_eq!(passed.outcome, Outcome::Passed);
        assert!(passed.unique);
        assert!(passed.error.is_none());

        let failed = ConversionResult::from_verdict(
            "mempool",
            Err(ApplicationError::Timeout(5)),
            false,
        );
        assert_eq!(failed.outcome, Outcome::Failed);
        assert!(!failed.unique);

        let skipped = ConversionResult::skipped("bitcoin");
        assert_eq!(skipped.outcome, Outcome::Skipped);
        assert!(!skipped.unique);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Outcome::Passed.to_string(), "PASSED");
        assert_eq!(Outcome::Failed.label(), "FAILED");
        assert_eq!(Outcome::Skipped.label(), "SKIPPED");
    }
}
