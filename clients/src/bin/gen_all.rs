//! `swizzle-gen-all`: Writes the declaration file of every vector dimension.
//!
//! **Outputs:**
//! - `<out>/Swizzle1.hpp.inc` to `<out>/Swizzle4.hpp.inc`
//!
//! **Usage:**
//! ```
//! swizzle-gen-all [--out <path>] [--json]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use swizzle_codegen::layout::DEFAULT_OUT_DIR;

/// Generate the swizzle declaration files for dimensions 1 to 4.
#[derive(Parser)]
#[command(
    name = "swizzle-gen-all",
    about = "Generate swizzle declaration files for every vector dimension"
)]
struct Args {
    /// Output directory for the generated files.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    out: PathBuf,

    /// Print the generation report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let report = swizzle_codegen::generate_all(&args.out)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize generation report")?;
        println!("{json}");
        return Ok(());
    }

    println!(
        "Generated {} swizzle declarations in {} files",
        report.declaration_count,
        report.files.len()
    );
    for file in &report.files {
        println!(
            "  dimension {}: {} ({} lines)",
            file.dimension,
            file.path.display(),
            file.line_count
        );
    }

    println!("Generation complete.");
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
