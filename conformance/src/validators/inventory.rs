//! Directory inventory validator.
//!
//! Verifies that the output directory holds exactly one declaration file per
//! dimension: `Swizzle1.hpp.inc` to `Swizzle4.hpp.inc`. Files that follow the
//! naming scheme under any other name (`Swizzle5`, `Swizzle01`) are reported;
//! other files are ignored.

use std::path::Path;

use anyhow::{Context, Result};
use swizzle_codegen::layout::{dimension_of, file_name, file_path, follows_scheme};
use swizzle_model::Dimension;
use walkdir::WalkDir;

use crate::report::{CheckResult, ConformanceReport};

const VALIDATOR: &str = "declarations/inventory";

/// Validates the file inventory of `dir`.
///
/// # Errors
///
/// Returns an error if `dir` exists but cannot be listed.
pub fn validate(dir: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let subject = dir.display().to_string();

    if !dir.is_dir() {
        report.push(CheckResult::fail(
            VALIDATOR,
            subject,
            "output directory not found",
        ));
        return Ok(report);
    }

    let missing: Vec<String> = Dimension::ALL
        .iter()
        .filter(|&&d| !file_path(dir, d).is_file())
        .map(|&d| file_name(d))
        .collect();

    if missing.is_empty() {
        report.push(CheckResult::pass(
            VALIDATOR,
            subject.clone(),
            format!("all {} declaration files present", Dimension::ALL.len()),
        ));
    } else {
        report.push(
            CheckResult::fail(
                VALIDATOR,
                subject.clone(),
                format!("{} declaration file(s) missing", missing.len()),
            )
            .with_details(missing),
        );
    }

    let mut unexpected = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy();
        if follows_scheme(&name) && dimension_of(&name).is_none() {
            unexpected.push(name.into_owned());
        }
    }
    unexpected.sort();

    if !unexpected.is_empty() {
        report.push(
            CheckResult::fail(
                VALIDATOR,
                subject,
                "files follow the naming scheme but name no dimension",
            )
            .with_details(unexpected),
        );
    }

    Ok(report)
}
