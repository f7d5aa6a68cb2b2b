//! This module contains the primary error type for the library's interface.
//! It also re-exports the more specific error types that are
//! subsystem-specific.
//!
//! Every error in this library describes a trace or memory image that violates
//! the expectations of the analysis. None of them are recoverable: an analysis
//! run either completes for its root or returns the first violation it found.

pub mod analysis;
pub mod container;
pub mod memory;
pub mod precision;

use thiserror::Error;

/// The interface result type for the library.
///
/// Any function considered to be part of the public interface of the library
/// should return this result type. Subsystems should return the more-specific
/// child error types as appropriate.
pub type Result<T> = std::result::Result<T, Errors>;

/// The interface error type for the library.
///
/// All errors returned from the library interface (and hence encountered by the
/// clients of the library) should be members of this enum.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// Errors from the construction of the blame graph.
    #[error(transparent)]
    Analysis(#[from] analysis::Error),

    /// Errors from byte-level access to shadow values.
    #[error(transparent)]
    Memory(#[from] memory::Error),

}

/// Make it possible to attach locations to these errors.
impl container::Locatable for Error {
    type Located = LocatedError;

    fn locate(self, location: u64) -> Self::Located {
        container::Located {
            location,
            payload: self,
        }
    }
}

/// A library error with an associated program location.
pub type LocatedError = container::Located<Error>;

/// A container of errors that may occur in the library.
pub type Errors = container::Errors<LocatedError>;

/// Re-wraps a located subsystem error around the more general payload.
macro_rules! rewrap_located {
    ($subsystem:ident) => {
        impl From<$subsystem::LocatedError> for LocatedError {
            fn from(value: $subsystem::LocatedError) -> Self {
                let location = value.location;
                let payload = Error::from(value.payload);
                Self { location, payload }
            }
        }

        impl From<$subsystem::LocatedError> for Errors {
            fn from(value: $subsystem::LocatedError) -> Self {
                let re_wrapped: LocatedError = value.into();
                re_wrapped.into()
            }
        }
    };
}

rewrap_located!(analysis);
rewrap_located!(memory);
