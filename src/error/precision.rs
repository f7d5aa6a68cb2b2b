//! This module contains errors pertaining to the recognised set of
//! floating-point operations.

use thiserror::Error;

/// Errors raised when the trace names an operation outside of the fixed set
/// that the precision utilities know how to evaluate.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("Unsupported floating-point binary operator `{_0}`")]
    UnsupportedOperator(String),

    #[error("Unsupported math library call `{_0}`")]
    UnsupportedFunction(String),
}

/// The result type for methods that may have precision errors.
pub type Result<T> = std::result::Result<T, Error>;
