//! Data-dependent arithmetic failures.

use thiserror::Error;

/// Errors that depend on the values being operated on.
///
/// Unsupported operation/ring pairs are not represented here; they abort
/// through [`crate::fatal::not_implemented`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArithError {
    /// A non-unit was inverted.
    #[error("element is not invertible in {0}")]
    NotInvertible(String),

    /// The divisor was zero.
    #[error("division by zero in {0}")]
    DivisionByZero(String),

    /// The divisor does not divide the dividend.
    #[error("division is not exact in {0}")]
    InexactDivision(String),
}

/// Result alias for fallible ring operations.
pub type Result<T> = std::result::Result<T, ArithError>;
