//! This library implements a precision blame analysis over execution traces of
//! floating-point programs. For a chosen result it discovers which operations
//! of the program need double precision to reproduce that result, and which
//! operands are to blame when single precision is not enough.
//!
//! Note that this library does not instrument programs itself. It consumes
//! traces recorded by an instrumentation layer, which reports the value of
//! every relevant operand as computed at each of several precision tiers.
//!
//! # How it Works
//!
//! From a very high level, the analysis is performed as follows:
//!
//! 1. A [`trace::Trace`] is ingested, mapping each dynamic program counter to
//!    the records of the instruction instance at that point.
//! 2. Starting from a root [`graph::BlameNodeId`], the
//!    [`engine::BlameGraphEngine`] searches for the precision tiers at which
//!    the operands of each instruction reproduce its result.
//! 3. Every operand that needs more than single precision at the tier that
//!    works is blamed, and becomes a node of the blame graph to be explained
//!    in turn.
//! 4. The graph is summarised per source location into a
//!    [`graph::PrecisionReport`], or rendered in the DOT language.
//!
//! # Basic Usage
//!
//! For the most basic usage of the library, it is sufficient to construct an
//! `Analyzer` and call the `.analyze` method.
//!
//! ```
//! use precision_blame as pb;
//! use precision_blame::{
//!     engine,
//!     graph::{BlameNodeId, Location},
//!     precision::{BinaryOperator, Tier},
//!     trace::{Instruction, ShadowObject, TierValues, Trace},
//! };
//!
//! let third = 1.0 / 3.0;
//! let load = Instruction::Other("load".into());
//! let trace = Trace::from_groups(vec![vec![
//!     ShadowObject::new(
//!         3,
//!         14,
//!         0,
//!         Instruction::Binary(BinaryOperator::Multiply),
//!         TierValues::uniform(third * 2.0),
//!     ),
//!     ShadowObject::new(1, 12, 0, load.clone(), TierValues::uniform(third)),
//!     ShadowObject::new(2, 13, 0, load, TierValues::uniform(2.0)),
//! ]])
//! .unwrap();
//!
//! let report = pb::new(trace, BlameNodeId::new(3, Tier::Double), engine::Config::default())
//!     .analyze()
//!     .unwrap();
//!
//! let highlighting = report.get(Location::new(0, 14)).unwrap();
//! assert!(highlighting.result);
//! ```

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod analyzer;
pub mod constant;
pub mod engine;
pub mod error;
pub mod graph;
pub mod observer;
pub mod precision;
pub mod shadow;
pub mod trace;

// Re-exports to provide the library interface.
pub use analyzer::new;
pub use graph::PrecisionReport;
