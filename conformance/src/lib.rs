//! Swizzle conformance suite.
//!
//! Validates a directory of generated declaration files against the accessor
//! model. Every file must be present, well formed, consistent, complete, in
//! declaration order, and identical to what the generator would write today.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = swizzle_conformance::run_all(Path::new("include/Mathter/Vector/SwizzleInc"))
//!     .expect("Failed to run conformance");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

use std::path::Path;

use swizzle_codegen::layout::file_path;
use swizzle_model::Dimension;
use tracing::debug;
use validators::declarations::LineGrammar;

pub use report::{CheckResult, ConformanceReport, Severity};

/// Runs all conformance validators over `dir` and returns the aggregated
/// report.
///
/// Validators are run in this order:
/// 1. Directory inventory (one file per dimension, no strays)
/// 2. Per dimension: grammar, consistency, completeness, freshness
///
/// # Errors
///
/// Returns an error only if a file system operation fails.
pub fn run_all(dir: &Path) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let grammar = LineGrammar::new()?;

    report.extend(validators::inventory::validate(dir)?);

    for dimension in Dimension::ALL {
        let path = file_path(dir, dimension);
        debug!(path = %path.display(), "validating declarations");
        report.extend(validators::declarations::validate(&path, dimension, &grammar)?);
    }

    Ok(report)
}
