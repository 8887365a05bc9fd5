//! `swizzle-conformance`: Validates a directory of generated swizzle
//! declaration files.
//!
//! Checks the file inventory, then for each dimension the line grammar,
//! index/name consistency, completeness and order, and freshness against a
//! new render.
//!
//! **Usage:**
//! ```
//! swizzle-conformance [--dir <path>]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use swizzle_codegen::layout::DEFAULT_OUT_DIR;
use swizzle_conformance::{run_all, Severity};

/// Run the swizzle conformance suite.
#[derive(Parser)]
#[command(
    name = "swizzle-conformance",
    about = "Validate generated swizzle declaration files"
)]
struct Args {
    /// Directory holding the generated files.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    dir: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let report = run_all(&args.dir)?;

    println!("Swizzle Conformance Report");
    println!("==========================");
    println!();

    for result in &report.results {
        println!(
            "[{}] {} {}: {}",
            result.severity.label(),
            result.validator,
            result.subject,
            result.message
        );
        for detail in &result.details {
            println!("       {}", detail);
        }
    }

    let passed = report.count(Severity::Pass);
    let warned = report.count(Severity::Warning);
    let failed = report.count(Severity::Failure);

    println!();
    println!(
        "Summary: {} passed, {} warnings, {} failed",
        passed, warned, failed
    );

    if failed > 0 {
        eprintln!("Conformance FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
