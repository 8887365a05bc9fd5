//! Core swizzle model types.
//!
//! A [`Dimension`] selects a fixed [`Alphabet`] of component symbols. The
//! enumerator turns an alphabet and an [`Arity`] into [`Accessor`]s, each of
//! which pairs a symbol sequence (`zxy`) with the matching component indices
//! (`2, 0, 1`).

use std::fmt;

use thiserror::Error;

/// Largest number of symbols a custom [`Alphabet`] may carry.
pub const MAX_SYMBOLS: usize = 16;

/// Component symbols in canonical order. The first `n` of them form the
/// alphabet of dimension `n`.
const COMPONENT_SYMBOLS: [char; 4] = ['x', 'y', 'z', 'w'];

/// Errors raised while constructing model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The dimension is not one of 1, 2, 3, 4.
    #[error("invalid dimension {0}: expected one of 1, 2, 3, 4")]
    InvalidDimension(u32),
    /// The arity is outside `1..=4`.
    #[error("invalid arity {0}: expected a value between 1 and {max}", max = Arity::MAX)]
    InvalidArity(u32),
    /// An alphabet needs at least one symbol.
    #[error("alphabet must contain at least one symbol")]
    EmptyAlphabet,
    /// A symbol appears twice in an alphabet.
    #[error("symbol '{0}' appears more than once in the alphabet")]
    DuplicateSymbol(char),
    /// The alphabet exceeds [`MAX_SYMBOLS`].
    #[error("alphabet has {0} symbols; at most {max} are supported", max = MAX_SYMBOLS)]
    TooManySymbols(usize),
}

/// Spatial dimension of the host vector type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    /// `x`
    One = 1,
    /// `x, y`
    Two = 2,
    /// `x, y, z`
    Three = 3,
    /// `x, y, z, w`
    Four = 4,
}

impl Dimension {
    /// All dimensions in ascending order.
    pub const ALL: [Dimension; 4] = [
        Dimension::One,
        Dimension::Two,
        Dimension::Three,
        Dimension::Four,
    ];

    /// Returns the dimension as an integer.
    #[must_use]
    pub fn get(self) -> u32 {
        self as u32
    }

    /// Returns the alphabet for this dimension: `x`, `y`, `z`, `w` truncated
    /// to the dimension.
    #[must_use]
    pub fn alphabet(self) -> Alphabet {
        Alphabet {
            symbols: COMPONENT_SYMBOLS[..self as usize].to_vec(),
        }
    }

    /// Number of declarations this dimension produces across all arities:
    /// the sum of `dim^k` for `k` in `1..=4`.
    #[must_use]
    pub fn declaration_count(self) -> usize {
        let base = self as usize;
        Arity::ALL.iter().map(|a| base.pow(a.get())).sum()
    }
}

impl TryFrom<u32> for Dimension {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Dimension::One),
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            4 => Ok(Dimension::Four),
            other => Err(ModelError::InvalidDimension(other)),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Number of components an accessor selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arity(u32);

impl Arity {
    /// Largest supported arity.
    pub const MAX: u32 = 4;

    /// Every arity the generator emits, in emission order.
    pub const ALL: [Arity; 4] = [Arity(1), Arity(2), Arity(3), Arity(4)];

    /// Creates an arity.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArity`] unless `1 <= value <= 4`.
    pub fn new(value: u32) -> Result<Self, ModelError> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidArity(value))
        }
    }

    /// Returns the arity as an integer.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered set of distinct component symbols. A symbol's index in the
/// alphabet is its component index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Builds a custom alphabet, e.g. `r, g, b, a`.
    ///
    /// # Errors
    ///
    /// Returns an error if `symbols` is empty, holds a duplicate, or has more
    /// than [`MAX_SYMBOLS`] entries.
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Result<Self, ModelError> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(ModelError::EmptyAlphabet);
        }
        if symbols.len() > MAX_SYMBOLS {
            return Err(ModelError::TooManySymbols(symbols.len()));
        }
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(ModelError::DuplicateSymbol(*symbol));
            }
        }
        Ok(Self { symbols })
    }

    /// Number of symbols, which is also the enumeration base.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; construction rejects empty alphabets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in component order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Symbol at component `index`.
    #[must_use]
    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    /// Component index of `symbol`.
    #[must_use]
    pub fn position(&self, symbol: char) -> Option<usize> {
        self.symbols.iter().position(|&s| s == symbol)
    }
}

/// A single swizzle accessor such as `zxy` → `[2, 0, 1]`.
///
/// `indices[i]` is always the alphabet position of the `i`-th character of
/// `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accessor {
    pub(crate) name: String,
    pub(crate) indices: Vec<usize>,
}

impl Accessor {
    /// The accessor name, e.g. `"zxy"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Component indices in name order.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of selected components.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.indices.len()
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
