//! # Sarx Public API
//!
//! Streaming SARIF importer. Extracts findings from arbitrarily large
//! static-analysis reports in bounded memory: one cheap pass collects
//! per-run reference data and the byte region of the `results` array, a
//! second bounded pass replays just that region and resolves each result
//! against the collected data.
//!
//! ```no_run
//! use sarx::{Finding, Sarx};
//!
//! # fn main() -> Result<(), sarx::ImportError> {
//! let document = std::fs::read("report.sarif")?;
//! let mut findings: Vec<Finding> = Vec::new();
//! let mut sink = |finding: Finding| findings.push(finding);
//! let stats = Sarx::importer()
//!     .engine_type("SARIF")
//!     .import(&document, &mut sink)?;
//! println!("{} findings from {} runs", stats.findings, stats.runs);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod builder;

pub use builder::ImportBuilder;

// Re-export the engine surface callers interact with.
pub use sarx_engine::{
    AttributeValue, Finding, FindingSink, ImportError, ImportResult, ImportStats, Priority,
    ScanInfo, ScanSource,
};

/// Main entry point providing static builder methods.
pub struct Sarx;

impl Sarx {
    /// Create a new import builder with default settings.
    #[must_use]
    pub fn importer() -> ImportBuilder {
        ImportBuilder::new()
    }
}

/// Create a new import builder with default settings.
///
/// Shorthand for [`Sarx::importer`].
#[must_use]
pub fn importer() -> ImportBuilder {
    ImportBuilder::new()
}
