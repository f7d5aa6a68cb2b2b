//! This module contains errors pertaining to byte-level access of shadow
//! values.

use thiserror::Error;

use crate::{
    error::container,
    shadow::{RegionId, ValueKind},
};

/// Errors that occur when reading or writing through a composite shadow value.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("A value of kind {kind} does not refer to a run of shadow values")]
    NotComposite { kind: ValueKind },

    #[error("Region {region} is not owned by this heap")]
    DanglingRegion { region: RegionId },

    #[error("Access of {requested} bytes at element {index} exceeds the {available} bytes available")]
    OutOfBounds {
        index:     usize,
        requested: usize,
        available: usize,
    },

    #[error("Values of kind {kind} cannot be read as a scalar")]
    UnsupportedReadKind { kind: ValueKind },
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

/// A memory error with the source line of the accessed value.
pub type LocatedError = container::Located<Error>;

/// The result type for methods that may have memory errors.
pub type Result<T> = std::result::Result<T, Error>;
