//! Generated declaration file validator.
//!
//! Validates one `Swizzle{d}.hpp.inc` file against the accessor model of its
//! dimension. Ensures line grammar, index/name consistency, completeness and
//! ordering, and byte-for-byte freshness against a new render.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use swizzle_codegen::render;
use swizzle_model::{enumerate_dimension, Alphabet, Dimension};

use crate::report::{CheckResult, ConformanceReport};

const GRAMMAR: &str = "declarations/grammar";
const CONSISTENCY: &str = "declarations/consistency";
const COMPLETENESS: &str = "declarations/completeness";
const FRESHNESS: &str = "declarations/freshness";

/// Offending lines listed per failed check.
const MAX_DETAILS: usize = 10;

/// `Swizzle<T, Dim, Packed, 2, 0, 1> zxy;`
const LINE_PATTERN: &str = r"^Swizzle<T, Dim, Packed((?:, [0-9]+)+)> ([A-Za-z]+);$";

/// Compiled declaration line grammar, built once per conformance run.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    pattern: Regex,
}

impl LineGrammar {
    /// Compiles the declaration line pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern fails to compile.
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(LINE_PATTERN).context("Invalid declaration pattern")?;
        Ok(Self { pattern })
    }

    /// Splits `line` into accessor name and indices, or `None` if it does not
    /// follow the template.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<(String, Vec<usize>)> {
        let caps = self.pattern.captures(line)?;
        let indices = caps
            .get(1)?
            .as_str()
            .split(", ")
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<usize>, _>>()
            .ok()?;
        Some((caps.get(2)?.as_str().to_string(), indices))
    }
}

/// A declaration line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeclaration {
    /// 1-based line number.
    pub line: usize,
    /// Accessor name.
    pub name: String,
    /// Component indices as written.
    pub indices: Vec<usize>,
}

/// Validates the declaration file at `path` for `dimension`.
///
/// A missing file produces no results; the inventory validator reports it.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn validate(
    path: &Path,
    dimension: Dimension,
    grammar: &LineGrammar,
) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    if !path.is_file() {
        return Ok(report);
    }

    let subject = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let parsed = validate_grammar(grammar, &content, &subject, &mut report);
    validate_consistency(&parsed, dimension, &subject, &mut report);
    validate_completeness(&parsed, dimension, &subject, &mut report);
    validate_freshness(&content, dimension, &subject, &mut report);

    Ok(report)
}

/// Parses every line; lines that do not match the template are reported and
/// skipped. A single trailing newline does not count as an empty line; the
/// freshness check reports it.
fn validate_grammar(
    grammar: &LineGrammar,
    content: &str,
    subject: &str,
    report: &mut ConformanceReport,
) -> Vec<ParsedDeclaration> {
    let body = content.strip_suffix('\n').unwrap_or(content);
    let mut parsed = Vec::new();
    let mut malformed = Vec::new();

    for (i, line) in body.split('\n').enumerate() {
        match grammar.parse(line) {
            Some((name, indices)) => parsed.push(ParsedDeclaration {
                line: i + 1,
                name,
                indices,
            }),
            None => malformed.push(format!("line {}: {line:?}", i + 1)),
        }
    }

    if malformed.is_empty() {
        report.push(CheckResult::pass(
            GRAMMAR,
            subject,
            format!("{} declarations well formed", parsed.len()),
        ));
    } else {
        let count = malformed.len();
        malformed.truncate(MAX_DETAILS);
        report.push(
            CheckResult::fail(GRAMMAR, subject, format!("{count} malformed line(s)"))
                .with_details(malformed),
        );
    }
    parsed
}

/// Checks that every index is in range and names the symbol beside it.
fn validate_consistency(
    parsed: &[ParsedDeclaration],
    dimension: Dimension,
    subject: &str,
    report: &mut ConformanceReport,
) {
    let alphabet = dimension.alphabet();
    let mut mismatched: Vec<String> = parsed
        .iter()
        .filter(|d| !is_consistent(&alphabet, d))
        .map(|d| format!("line {}: {} {:?}", d.line, d.name, d.indices))
        .collect();

    if mismatched.is_empty() {
        report.push(CheckResult::pass(
            CONSISTENCY,
            subject,
            "indices match accessor names",
        ));
    } else {
        let count = mismatched.len();
        mismatched.truncate(MAX_DETAILS);
        report.push(
            CheckResult::fail(
                CONSISTENCY,
                subject,
                format!("{count} declaration(s) with indices that do not match the name"),
            )
            .with_details(mismatched),
        );
    }
}

fn is_consistent(alphabet: &Alphabet, declaration: &ParsedDeclaration) -> bool {
    declaration.name.chars().count() == declaration.indices.len()
        && declaration
            .name
            .chars()
            .zip(&declaration.indices)
            .all(|(symbol, &index)| alphabet.symbol(index) == Some(symbol))
}

/// Checks count, duplicates, missing accessors, and declaration order.
fn validate_completeness(
    parsed: &[ParsedDeclaration],
    dimension: Dimension,
    subject: &str,
    report: &mut ConformanceReport,
) {
    let expected = enumerate_dimension(dimension);
    let mut problems = Vec::new();

    let mut seen = HashSet::new();
    for d in parsed {
        if !seen.insert(d.name.as_str()) {
            problems.push(format!("line {}: duplicate accessor {}", d.line, d.name));
        }
    }

    let missing: Vec<&str> = expected
        .iter()
        .map(|a| a.name())
        .filter(|name| !seen.contains(name))
        .collect();
    if !missing.is_empty() {
        problems.push(format!(
            "{} accessor(s) missing, first: {}",
            missing.len(),
            missing[0]
        ));
    }

    if parsed.len() != expected.len() {
        problems.push(format!(
            "expected {} declarations, found {}",
            expected.len(),
            parsed.len()
        ));
    }

    let divergence = parsed
        .iter()
        .zip(&expected)
        .find(|(found, want)| found.name != want.name());
    if let Some((found, want)) = divergence {
        problems.push(format!(
            "line {}: out of order, expected {} but found {}",
            found.line,
            want.name(),
            found.name
        ));
    }

    if problems.is_empty() {
        report.push(CheckResult::pass(
            COMPLETENESS,
            subject,
            format!("all {} accessors present in order", expected.len()),
        ));
    } else {
        problems.truncate(MAX_DETAILS);
        report.push(
            CheckResult::fail(
                COMPLETENESS,
                subject,
                format!("accessor set for dimension {dimension} is incomplete or out of order"),
            )
            .with_details(problems),
        );
    }
}

/// Compares the file with a fresh render. A difference that is only a
/// trailing newline is a warning.
fn validate_freshness(
    content: &str,
    dimension: Dimension,
    subject: &str,
    report: &mut ConformanceReport,
) {
    let fresh = render(dimension);
    if content == fresh {
        report.push(CheckResult::pass(FRESHNESS, subject, "matches a fresh render"));
    } else if content.strip_suffix('\n') == Some(fresh.as_str()) {
        report.push(CheckResult::warn(
            FRESHNESS,
            subject,
            "differs from a fresh render only by a trailing newline",
        ));
    } else {
        report.push(CheckResult::fail(
            FRESHNESS,
            subject,
            "differs from a fresh render; regenerate with swizzle-gen",
        ));
    }
}
