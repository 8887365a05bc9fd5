//! Swizzle code generator.
//!
//! Renders one `Swizzle<T, Dim, Packed, ...> name;` declaration per accessor of
//! a vector dimension and writes them to the file the vector storage includes.
//! Arity-1 accessors come first, then arity 2, 3 and 4, each block in counting
//! order.
//!
//! ```no_run
//! use std::path::Path;
//! use swizzle_model::Dimension;
//!
//! let report = swizzle_codegen::generate(Dimension::Three, Path::new("out.txt"))?;
//! assert_eq!(report.declaration_count, 120);
//! # Ok::<(), swizzle_codegen::CodegenError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod emit;
pub mod layout;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use swizzle_model::{Dimension, ModelError};
use thiserror::Error;
use tracing::{debug, warn};

pub use emit::{render_declarations, Rendered};

/// Errors raised while generating declaration files.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The requested dimension or arity is not supported.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The destination could not be created or replaced.
    #[error("cannot write {}: {source}", .path.display())]
    DestinationUnwritable {
        /// Destination that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An existing destination could not be read back for comparison.
    #[error("cannot read {}: {source}", .path.display())]
    DestinationUnreadable {
        /// Destination that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// One generated file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Path the declarations were written to.
    pub path: PathBuf,
    /// Vector dimension.
    pub dimension: u32,
    /// Declaration count per arity, arity 1 first.
    pub arity_counts: Vec<usize>,
    /// Lines written.
    pub line_count: usize,
}

/// Report of what was generated.
#[derive(Debug, Default, Clone, Serialize)]
pub struct GenerationReport {
    /// Declarations written across all files.
    pub declaration_count: usize,
    /// Files written, in generation order.
    pub files: Vec<FileReport>,
}

impl GenerationReport {
    fn record(&mut self, path: &Path, rendered: &Rendered) {
        self.declaration_count += rendered.line_count();
        self.files.push(FileReport {
            path: path.to_path_buf(),
            dimension: rendered.dimension.get(),
            arity_counts: rendered.arity_counts.clone(),
            line_count: rendered.line_count(),
        });
    }
}

/// How a destination compares to a fresh render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The destination is byte-identical to the fresh render.
    UpToDate,
    /// The destination exists but differs.
    Stale,
    /// The destination does not exist.
    Missing,
}

/// Renders the declarations for `dimension` as file content.
#[must_use]
pub fn render(dimension: Dimension) -> String {
    render_declarations(dimension).content
}

/// Generates the declarations for `dimension` and replaces `destination` with
/// them.
///
/// # Errors
///
/// Returns [`CodegenError::DestinationUnwritable`] if the destination cannot be
/// written. The destination then keeps its previous content, or stays absent.
pub fn generate(
    dimension: Dimension,
    destination: &Path,
) -> Result<GenerationReport, CodegenError> {
    let rendered = render_declarations(dimension);
    emit::write_file(destination, &rendered.content)?;

    let mut report = GenerationReport::default();
    report.record(destination, &rendered);
    Ok(report)
}

/// Generates the declaration file of every dimension into `out_dir`, creating
/// the directory if needed. Files are named by [`layout::file_name`].
///
/// # Errors
///
/// Returns [`CodegenError::DestinationUnwritable`] if the directory or any
/// file cannot be written. Files written before the failure are kept.
pub fn generate_all(out_dir: &Path) -> Result<GenerationReport, CodegenError> {
    fs::create_dir_all(out_dir).map_err(|source| CodegenError::DestinationUnwritable {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut report = GenerationReport::default();
    for dimension in Dimension::ALL {
        let path = layout::file_path(out_dir, dimension);
        let rendered = render_declarations(dimension);
        emit::write_file(&path, &rendered.content)?;
        report.record(&path, &rendered);
    }
    Ok(report)
}

/// Compares `destination` with a fresh render for `dimension` without writing.
///
/// # Errors
///
/// Returns [`CodegenError::DestinationUnreadable`] if the destination exists
/// but cannot be read.
pub fn check(dimension: Dimension, destination: &Path) -> Result<Freshness, CodegenError> {
    let current = match fs::read(destination) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %destination.display(), "destination missing");
            return Ok(Freshness::Missing);
        }
        Err(source) => {
            return Err(CodegenError::DestinationUnreadable {
                path: destination.to_path_buf(),
                source,
            })
        }
    };

    if current == render(dimension).as_bytes() {
        Ok(Freshness::UpToDate)
    } else {
        warn!(
            path = %destination.display(),
            dimension = dimension.get(),
            "destination is stale"
        );
        Ok(Freshness::Stale)
    }
}
