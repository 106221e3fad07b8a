// src/lib.rs

//! catalog-verify
//!
//! Batch verification harness for app manifest converters. The converter is
//! run once for every application in a source catalog and judged by its exit
//! status and the manifest it leaves behind. Results are aggregated into
//! pass/fail/skip counts, with a separate count of applications that do not
//! exist in the destination catalog yet.
//!
//! # Architecture
//!
//! - `catalog`: source catalog scanning and the destination catalog index
//! - `exclusion`: configured applications that are never verified
//! - `artifact`: stale artifact removal and presence checks
//! - `invoker`: converter subprocess handling
//! - `outcome`: exit-status-first classification
//! - `aggregate`: run counters and percentages
//! - `report`: presentation, decoupled from classification
//! - `harness`: the sequential run loop tying it all together

pub mod aggregate;
pub mod artifact;
pub mod catalog;
pub mod config;
mod error;
pub mod exclusion;
pub mod harness;
pub mod invoker;
pub mod outcome;
pub mod report;

pub use aggregate::{RunAggregator, RunSummary};
pub use artifact::ArtifactResetter;
pub use catalog::{ApplicationEntry, CatalogScanner, DestinationCatalogIndex};
pub use config::{ConverterConfig, HarnessConfig};
pub use error::{ApplicationError, Error, Result};
pub use exclusion::{ExclusionEntry, ExclusionPolicy, ExclusionReason};
pub use harness::{Harness, RunReport};
pub use invoker::{Convert, ConversionInvoker, Invocation};
pub use outcome::{ConversionResult, Outcome, classify};
pub use report::{ConsoleReporter, LogReporter, Reporter, SilentReporter};
