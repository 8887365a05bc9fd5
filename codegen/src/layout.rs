//! Output file layout for batch generation.
//!
//! The vector storage of dimension `d` includes `Swizzle{d}.hpp.inc` from a
//! single directory.

use std::path::{Path, PathBuf};

use swizzle_model::Dimension;

/// Default output directory, relative to the library root.
pub const DEFAULT_OUT_DIR: &str = "include/Mathter/Vector/SwizzleInc";

const FILE_PREFIX: &str = "Swizzle";

/// Extension shared by every generated file.
pub const FILE_SUFFIX: &str = ".hpp.inc";

/// File name for `dimension`, e.g. `Swizzle3.hpp.inc`.
#[must_use]
pub fn file_name(dimension: Dimension) -> String {
    format!("{FILE_PREFIX}{dimension}{FILE_SUFFIX}")
}

/// Full path of the file for `dimension` under `out_dir`.
#[must_use]
pub fn file_path(out_dir: &Path, dimension: Dimension) -> PathBuf {
    out_dir.join(file_name(dimension))
}

/// Returns `true` if `name` has the `Swizzle{n}.hpp.inc` shape for some run
/// of decimal digits `n`, whether or not `n` names a dimension.
#[must_use]
pub fn follows_scheme(name: &str) -> bool {
    name.strip_prefix(FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Returns the dimension whose file is named exactly `name`.
#[must_use]
pub fn dimension_of(name: &str) -> Option<Dimension> {
    Dimension::ALL.into_iter().find(|&d| file_name(d) == name)
}
