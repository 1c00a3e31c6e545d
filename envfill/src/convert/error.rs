//! Conversion failures raised by [`EnvValue`](super::EnvValue) implementations.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

use crate::BoxError;

/// Why a raw string could not be stored into a destination slot.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// Not one of the accepted boolean spellings.
    #[error("invalid boolean {value:?}")]
    Bool {
        /// Rejected input.
        value: String,
    },

    /// Integer syntax error or overflow for the declared width.
    #[error("invalid integer {value:?}: {source}")]
    Int {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        source: ParseIntError,
    },

    /// Floating-point syntax error.
    #[error("invalid float {value:?}: {source}")]
    Float {
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        source: ParseFloatError,
    },

    /// Not a valid duration literal.
    #[error("invalid duration {value:?}")]
    Duration {
        /// Rejected input.
        value: String,
    },

    /// A `FromStr`-backed type rejected the input.
    #[error("invalid {kind} {value:?}: {source}")]
    Parse {
        /// Human-readable name of the target type.
        kind: &'static str,
        /// Rejected input.
        value: String,
        /// Parser diagnostic.
        source: BoxError,
    },

    /// Fewer comma-separated pieces than the fixed-size array holds.
    #[error("array needs {expected} elements, got {actual}")]
    ArrayLength {
        /// Array length.
        expected: usize,
        /// Pieces supplied.
        actual: usize,
    },

    /// A map piece without `=`.
    #[error("invalid map value {value:?}: expected key=value")]
    MapEntry {
        /// The offending piece.
        value: String,
    },

    /// A custom decoder returned an error.
    #[error("decode failed: {0}")]
    Decode(#[source] BoxError),

    /// A decode-capable type exposes no decoder.
    #[error("unsupported type `{type_name}`: it is neither primitive nor exposes a supported decoder")]
    Unsupported {
        /// Name of the offending type.
        type_name: &'static str,
    },
}
