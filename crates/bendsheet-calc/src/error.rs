//! Error types for bend calculations.

use bendsheet_math::MathError;
use thiserror::Error;

/// Errors that can occur during bend calculation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// A straight element collapsed to zero length; it cannot define a
    /// bend plane.
    #[error("line {number} has zero length - cannot calculate bend plane")]
    ZeroLengthLine {
        /// 1-based number of the offending straight.
        number: usize,
    },

    /// Fewer adjacent straight vectors than the arc/boundary
    /// configuration requires.
    #[error(
        "insufficient vectors ({vectors}) for {arcs} arc(s) - \
         expected at least {required}"
    )]
    InsufficientGeometry {
        /// Straight vectors available.
        vectors: usize,
        /// Arcs in the path.
        arcs: usize,
        /// Vectors the configuration requires.
        required: usize,
    },

    /// A tooling parameter that must be non-negative was negative.
    #[error("tooling parameter {field} must not be negative")]
    InvalidTooling {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A degenerate vector reached an angle computation.
    #[error(transparent)]
    Math(#[from] MathError),
}

/// Result type for calculation operations.
pub type Result<T> = std::result::Result<T, CalcError>;
