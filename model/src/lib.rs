//! Swizzle accessor model.
//!
//! The `swizzle-model` crate describes the swizzle accessors of a vector type
//! with 1 to 4 components: the component alphabet of each dimension and the
//! enumeration of every accessor (`x`, `xy`, `zxy`, `wwxy`, ...) together with
//! the component indices it selects.
//!
//! # Entry Point
//!
//! ```
//! use swizzle_model::{enumerate, Arity, Dimension};
//!
//! let pairs = enumerate(&Dimension::Two.alphabet(), Arity::new(2)?);
//! let names: Vec<&str> = pairs.iter().map(|a| a.name()).collect();
//! assert_eq!(names, ["xx", "xy", "yx", "yy"]);
//! # Ok::<(), swizzle_model::ModelError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod enumerate;
pub mod model;

pub use enumerate::{enumerate, enumerate_dimension};
pub use model::{Accessor, Alphabet, Arity, Dimension, ModelError, MAX_SYMBOLS};
