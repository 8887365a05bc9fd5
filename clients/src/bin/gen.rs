//! `swizzle-gen`: Writes the swizzle accessor declarations of one vector
//! dimension to a file.
//!
//! The destination is created if absent and replaced if present. With
//! `--check` nothing is written; the command exits non-zero unless the
//! destination already matches a fresh render.
//!
//! **Usage:**
//! ```
//! swizzle-gen <DIMENSION> <DESTINATION> [--check]
//! ```

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
use swizzle_codegen::{check, generate, Freshness};
use swizzle_model::Dimension;

/// Generate swizzle accessor declarations for one vector dimension.
#[derive(Parser)]
#[command(
    name = "swizzle-gen",
    about = "Generate swizzle accessor declarations for one vector dimension"
)]
struct Args {
    /// Vector dimension: 1, 2, 3 or 4.
    dimension: u32,

    /// File to write the declarations to.
    destination: PathBuf,

    /// Compare the destination with a fresh render instead of writing it.
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let dimension = Dimension::try_from(args.dimension)?;

    if args.check {
        let freshness = check(dimension, &args.destination)?;
        match freshness {
            Freshness::UpToDate => {
                println!("{} is up to date.", args.destination.display());
                return Ok(());
            }
            Freshness::Stale => {
                eprintln!(
                    "{} is stale; rerun swizzle-gen {} {}",
                    args.destination.display(),
                    dimension,
                    args.destination.display()
                );
            }
            Freshness::Missing => {
                eprintln!("{} does not exist.", args.destination.display());
            }
        }
        process::exit(1);
    }

    let report = generate(dimension, &args.destination)?;

    println!(
        "Generated {} swizzle declarations for dimension {}",
        report.declaration_count, dimension
    );
    for file in &report.files {
        let counts: Vec<String> = file
            .arity_counts
            .iter()
            .enumerate()
            .map(|(i, count)| format!("arity {}: {}", i + 1, count))
            .collect();
        println!("  {} ({})", file.path.display(), counts.join(", "));
    }

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
