//! Error types for primitive geometry.

use thiserror::Error;

/// Errors raised when a primitive's parameters cannot describe a usable shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    /// A vector that must have a direction (an axis, normal or edge) has zero length.
    #[error("degenerate {shape}: {what} has zero length")]
    Degenerate {
        shape: &'static str,
        what: &'static str,
    },

    /// A scalar size (radius or half-extent) is not positive.
    #[error("invalid {shape}: {what} must be positive, got {value}")]
    NonPositive {
        shape: &'static str,
        what: &'static str,
        value: f64,
    },
}

impl GeomError {
    pub(crate) fn degenerate(shape: &'static str, what: &'static str) -> GeomError {
        GeomError::Degenerate { shape, what }
    }

    pub(crate) fn non_positive(shape: &'static str, what: &'static str, value: f64) -> GeomError {
        GeomError::NonPositive { shape, what, value }
    }
}
