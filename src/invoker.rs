// src/invoker.rs

//! Converter invocation
//!
//! The converter is an opaque external program run once per application:
//!
//! ```text
//! <program> <args...> [subcommand] <application dir>
//! ```
//!
//! Its exit status is always checked explicitly. A converter that exits
//! non-zero is a failure even if it never printed anything, and a converter
//! that cannot be started at all is reported the same way rather than
//! bringing the harness down.

use crate::catalog::ApplicationEntry;
use crate::config::ConverterConfig;
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// How a single converter invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Exited with status zero
    Succeeded { stderr: String },
    /// Exited non-zero, or was terminated by a signal (`code` is `None`)
    Failed { code: Option<i32>, stderr: String },
    /// Could not be started
    SpawnFailed(String),
    /// Killed after exceeding the deadline
    TimedOut { timeout: Duration, stderr: String },
}

impl Invocation {
    /// Check if the converter reported success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Diagnostic text written to the error stream, if any
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Succeeded { stderr }
            | Self::Failed { stderr, .. }
            | Self::TimedOut { stderr, .. } => {
                let trimmed = stderr.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            Self::SpawnFailed(_) => None,
        }
    }
}

/// Anything that can run a conversion for one application
///
/// Implemented by [`ConversionInvoker`] for real subprocesses and by plain
/// closures, which makes the run loop easy to drive from tests.
pub trait Convert {
    fn convert(&self, entry: &ApplicationEntry) -> Invocation;
}

impl<F> Convert for F
where
    F: Fn(&ApplicationEntry) -> Invocation,
{
    fn convert(&self, entry: &ApplicationEntry) -> Invocation {
        self(entry)
    }
}

/// Runs the external converter as a blocking subprocess
#[derive(Debug, Clone)]
pub struct ConversionInvoker {
    program: String,
    args: Vec<String>,
    subcommand: Option<String>,
    working_dir: Option<PathBuf>,
    timeout: Option<Duration>,
    passthrough_stdout: bool,
}

impl ConversionInvoker {
    /// Create an invoker from the converter configuration
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            subcommand: config.subcommand.clone(),
            working_dir: config.working_dir.clone(),
            timeout: config.timeout(),
            passthrough_stdout: config.passthrough_stdout,
        }
    }

    /// Set custom timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full argument list passed to the program for an application
    pub fn arguments(&self, entry: &ApplicationEntry) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.args.iter().map(OsString::from).collect();
        if let Some(sub) = &self.subcommand {
            args.push(sub.into());
        }
        args.push(entry.path.clone().into_os_string());
        args
    }

    fn command(&self, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .stdout(if self.passthrough_stdout {
                Stdio::inherit()
            } else {
                Stdio::null()
            });
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl Convert for ConversionInvoker {
    fn convert(&self, entry: &ApplicationEntry) -> Invocation {
        let args = self.arguments(entry);
        debug!("Running {} {:?}", self.program, args);

        let started = Instant::now();
        let mut child = match self.command(&args).spawn() {
            Ok(child) => child,
            Err(e) => {
                return Invocation::SpawnFailed(format!(
                    "failed to spawn '{}': {}",
                    self.program, e
                ));
            }
        };

        // Drain stderr on a separate thread so a chatty converter cannot
        // block on a full pipe while we wait for it
        let (tx, rx) = mpsc::channel();
        match child.stderr.take() {
            Some(mut pipe) => {
                thread::spawn(move || {
                    let mut buf = Vec::new();
                    let _ = pipe.read_to_end(&mut buf);
                    let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
                });
            }
            None => drop(tx),
        }

        let status = match self.timeout {
            Some(timeout) => match child.wait_timeout(timeout) {
                Ok(Some(status)) => status,
                Ok(None) => {
                    warn!(
                        "{} did not finish within {} seconds, killing it",
                        entry.id,
                        timeout.as_secs()
                    );
                    let _ = child.kill();
                    let _ = child.wait();
                    // Grandchildren may still hold the pipe open, so the
                    // reader is left to finish on its own
                    return Invocation::TimedOut {
                        timeout,
                        stderr: String::new(),
                    };
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Invocation::Failed {
                        code: None,
                        stderr: format!("failed to wait for converter: {}", e),
                    };
                }
            },
            None => match child.wait() {
                Ok(status) => status,
                Err(e) => {
                    return Invocation::Failed {
                        code: None,
                        stderr: format!("failed to wait for converter: {}", e),
                    };
                }
            },
        };

        // A background process left behind by the converter can keep the
        // pipe open after it exits, so the deadline covers the drain too
        let stderr = match self.timeout {
            Some(timeout) => {
                let remaining = timeout.saturating_sub(started.elapsed());
                match rx.recv_timeout(remaining) {
                    Ok(stderr) => stderr,
                    Err(RecvTimeoutError::Timeout) => {
                        warn!(
                            "{} exited but its error output stayed open, not waiting for it",
                            entry.id
                        );
                        String::new()
                    }
                    Err(RecvTimeoutError::Disconnected) => String::new(),
                }
            }
            None => rx.recv().unwrap_or_default(),
        };

        if status.success() {
            Invocation::Succeeded { stderr }
        } else {
            Invocation::Failed {
                code: status.code(),
                stderr,
            }
        }
    }
}
