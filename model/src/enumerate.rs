//! Accessor enumeration.
//!
//! Accessor `k` of a given arity is `k` written as an `arity`-digit numeral in
//! base `alphabet.len()`, most significant digit first, with each digit mapped
//! to the alphabet symbol at that position. Counting `k` upward from zero
//! therefore yields accessors in ascending order: `xx, xy, yx, yy`.

use tracing::debug;

use crate::model::{Accessor, Alphabet, Arity, Dimension};

/// Returns every accessor of `arity` over `alphabet`, in counting order.
///
/// The result holds exactly `alphabet.len().pow(arity)` distinct accessors.
#[must_use]
pub fn enumerate(alphabet: &Alphabet, arity: Arity) -> Vec<Accessor> {
    let base = alphabet.len();
    let width = arity.get() as usize;
    let total = base.pow(arity.get());

    let accessors: Vec<Accessor> = (0..total)
        .map(|code| accessor_for_code(alphabet, width, code))
        .collect();

    debug!(
        base,
        arity = arity.get(),
        count = accessors.len(),
        "enumerated accessor block"
    );
    accessors
}

/// Returns the accessors of every arity for `dimension`, arity-1 block first.
#[must_use]
pub fn enumerate_dimension(dimension: Dimension) -> Vec<Accessor> {
    let alphabet = dimension.alphabet();
    Arity::ALL
        .iter()
        .flat_map(|&arity| enumerate(&alphabet, arity))
        .collect()
}

/// Decodes `code` into its `width` base-`alphabet.len()` digits.
///
/// Digits come out least significant first; each one is written in front of
/// the digits already extracted, so the most significant digit lands at
/// position zero of both the name and the index sequence.
fn accessor_for_code(alphabet: &Alphabet, width: usize, code: usize) -> Accessor {
    let base = alphabet.len();
    let mut indices = vec![0usize; width];
    let mut remaining = code;

    for digit in indices.iter_mut().rev() {
        *digit = remaining % base;
        remaining /= base;
    }

    let name = indices
        .iter()
        .filter_map(|&index| alphabet.symbol(index))
        .collect();

    Accessor { name, indices }
}
