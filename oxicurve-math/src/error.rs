//! Error types for interpolation and root counting.

use num_rational::BigRational;
use thiserror::Error;

/// Errors raised by the core algorithms.
///
/// All of them are deterministic functions of the input: the same call with
/// the same arguments always fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Malformed input (empty node list, duplicate times, degenerate line, ...).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Division by the zero polynomial or a zero divided-difference denominator.
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),
    /// The polynomial vanishes at one of the bounds of a Sturm query.
    #[error("polynomial vanishes at interval endpoint {0}")]
    EndpointIsRoot(BigRational),
    /// The lower bound of a Sturm query is not strictly below the upper bound.
    #[error("invalid interval: lower bound {lower} is not below upper bound {upper}")]
    InvalidInterval {
        /// Lower bound as given.
        lower: BigRational,
        /// Upper bound as given.
        upper: BigRational,
    },
    /// Evaluation or intersection counting requested before interpolation.
    #[error("curve has not been interpolated")]
    NotInterpolated,
}

/// Result type for the core algorithms.
pub type MathResult<T> = Result<T, MathError>;

impl MathError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        MathError::InvalidInput(msg.into())
    }
}
