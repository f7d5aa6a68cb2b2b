//! This module contains errors pertaining to the construction of the blame
//! graph from an execution trace.

use thiserror::Error;

use crate::{error::container, precision::Tier};

/// Errors that occur while the [`crate::engine::BlameGraphEngine`] consumes a
/// trace.
///
/// All of these indicate that the trace handed to the engine was not produced
/// by a well-behaved recorder, and hence analysis of the current root cannot
/// continue.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("No trace entry exists for this dynamic program counter")]
    MissingTraceEntry,

    #[error("The trace entry for this dynamic program counter contains no records")]
    EmptyRecordGroup,

    #[error("A `{instruction}` instruction requires {expected} trace records but {found} were found")]
    MalformedRecord {
        instruction: String,
        expected:    usize,
        found:       usize,
    },

    #[error("The result record of this entry belongs to dynamic program counter {found}")]
    MismatchedDpc { found: u64 },

    #[error("Instructions of kind `{name}` cannot be analysed")]
    UnsupportedInstruction { name: String },

    #[error("The result value {value:e} is not truncated to the {tier} tier")]
    ResultNotAtTier { value: f64, tier: Tier },

    #[error("The blame graph exceeded the limit of {limit} nodes")]
    GraphSizeExceeded { limit: usize },

    #[error("The root of the blame graph was not constructed")]
    RootNotConstructed,
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

/// An analysis error with an associated dynamic program counter.
pub type LocatedError = container::Located<Error>;

/// The result type for methods that may have analysis errors.
pub type Result<T> = std::result::Result<T, LocatedError>;
