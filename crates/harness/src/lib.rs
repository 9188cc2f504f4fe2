//! Cross-language Fibonacci benchmark harness
//!
//! Reads a TOML manifest describing how to build and run each language's
//! benchmark entry, times every entry over a number of runs after warmup,
//! verifies each printed result line, and ranks the entries.
//!
//! # Architecture
//!
//! - `Manifest` - benchmark settings and language entries from TOML
//! - `Runner` - builds entries and times their executions
//! - `Report` - ranks results and renders them as a table or JSON

pub mod error;
pub mod manifest;
pub mod report;
pub mod runner;

pub use error::HarnessError;
pub use manifest::{BenchmarkSettings, DEFAULT_MANIFEST, LanguageEntry, Manifest};
pub use report::{OutputFormat, Report, ReportRow};
pub use runner::{BuildOutcome, LanguageResult, Runner, Status};
