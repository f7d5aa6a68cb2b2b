//! This module contains the boundary between the blame analysis and whatever
//! recorded the execution of the monitored program.
//!
//! The analysis never looks at the monitored program itself. Instead it
//! consumes a [`Trace`]: for every dynamic program counter (DPC) of interest, a
//! short group of records describing the instruction instance at that point.
//! The first record of a group describes the result of the instruction, and
//! the remaining records describe its operands in order.

pub mod object;

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use derivative::Derivative;
use serde::{Deserialize, Deserializer, Serialize};

pub use self::object::{ShadowObject, TierValues};
use crate::{
    error::{
        analysis::{Error, Result},
        container::Locatable,
    },
    precision::{BinaryOperator, MathFunction, Tier},
};

/// The kind of a dynamic instruction instance as recorded in a trace.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Instruction {
    /// A floating-point binary arithmetic instruction.
    Binary(BinaryOperator),

    /// A call to a unary function from the math library.
    Call(MathFunction),

    /// Any other instruction, named as it was recorded.
    ///
    /// These can appear in a trace but cannot be analysed.
    Other(String),
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Binary(op) => write!(f, "{op}"),
            Self::Call(function) => write!(f, "call {function}"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A record of one value involved in a dynamic instruction instance.
///
/// Implementors provide the value as it was computed at each precision tier,
/// along with the location of the instruction that produced it.
pub trait TraceRecord {
    /// Gets the dynamic program counter of the instruction instance.
    fn dpc(&self) -> u64;

    /// Gets the static program counter, which is the source line.
    fn pc(&self) -> u64;

    /// Gets the identifier of the source file.
    fn file_id(&self) -> u64;

    /// Gets the value as it was computed at `tier`.
    fn value(&self, tier: Tier) -> f64;

    /// Gets the kind of the instruction instance.
    fn instruction(&self) -> Instruction;
}

/// An execution trace, mapping each dynamic program counter to the group of
/// records for the instruction instance there.
#[derive(Derivative)]
#[derivative(
    Clone(bound = "R: Clone"),
    Debug(bound = "R: std::fmt::Debug"),
    Default(bound = "")
)]
pub struct Trace<R> {
    entries: BTreeMap<u64, Vec<R>>,
}

impl<R> Trace<R>
where
    R: TraceRecord,
{
    /// Constructs a new, empty, trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a trace from the provided record `groups`, keying each group
    /// by the DPC of its first record.
    ///
    /// A later group for the same DPC replaces any earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if any group is empty, located at the position of that
    /// group in `groups`.
    pub fn from_groups(groups: impl IntoIterator<Item = Vec<R>>) -> Result<Self> {
        let mut trace = Self::new();
        for (position, group) in groups.into_iter().enumerate() {
            trace.push_group(group).locate(position as u64)?;
        }

        Ok(trace)
    }

    /// Adds the record `group` to the trace under the DPC of its first record,
    /// returning that DPC.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `group` is empty.
    pub fn push_group(&mut self, group: Vec<R>) -> std::result::Result<u64, Error> {
        let dpc = group.first().ok_or(Error::EmptyRecordGroup)?.dpc();
        self.entries.insert(dpc, group);

        Ok(dpc)
    }

    /// Adds the record `group` to the trace under `dpc`, returning the group
    /// previously stored there, if any.
    pub fn insert(&mut self, dpc: u64, group: Vec<R>) -> Option<Vec<R>> {
        self.entries.insert(dpc, group)
    }

    /// Gets the record group for `dpc`, if it exists.
    #[must_use]
    pub fn get(&self, dpc: u64) -> Option<&[R]> {
        self.entries.get(&dpc).map(Vec::as_slice)
    }

    /// Checks if the trace has an entry for `dpc`.
    #[must_use]
    pub fn contains(&self, dpc: u64) -> bool {
        self.entries.contains_key(&dpc)
    }

    /// Iterates over the entries of the trace in order of DPC.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[R])> {
        self.entries.iter().map(|(dpc, group)| (*dpc, group.as_slice()))
    }

    /// Gets the number of entries in the trace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the trace has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A trace deserializes from a list of record groups.
impl<'de, R> Deserialize<'de> for Trace<R>
where
    R: TraceRecord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let groups = Vec::<Vec<R>>::deserialize(deserializer)?;
        Self::from_groups(groups).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::analysis::Error,
        precision::{BinaryOperator, MathFunction},
        trace::{Instruction, ShadowObject, TierValues, Trace},
    };

    fn record(dpc: u64, instruction: Instruction) -> ShadowObject {
        ShadowObject::new(dpc, dpc, 0, instruction, TierValues::uniform(1.0))
    }

    #[test]
    fn keys_groups_by_their_first_record() -> anyhow::Result<()> {
        let add = Instruction::Binary(BinaryOperator::Add);
        let trace = Trace::from_groups(vec![
            vec![record(5, add.clone()), record(3, add.clone()), record(4, add)],
            vec![
                record(3, Instruction::Call(MathFunction::Sqrt)),
                record(1, Instruction::Other("load".into())),
            ],
        ])?;

        assert_eq!(trace.len(), 2);
        assert_eq!(trace.get(5).map(<[_]>::len), Some(3));
        assert_eq!(trace.get(3).map(<[_]>::len), Some(2));
        assert!(!trace.contains(4));

        let dpcs: Vec<u64> = trace.iter().map(|(dpc, _)| dpc).collect();
        assert_eq!(dpcs, vec![3, 5]);

        Ok(())
    }

    #[test]
    fn rejects_empty_groups_at_their_position() {
        let groups = vec![vec![record(1, Instruction::Other("ret".into()))], vec![]];
        let err = Trace::from_groups(groups).unwrap_err();

        assert_eq!(err.location, 1);
        assert_eq!(err.payload, Error::EmptyRecordGroup);
    }

    #[test]
    fn renders_instructions_by_name() {
        assert_eq!(Instruction::Binary(BinaryOperator::Divide).to_string(), "fdiv");
        assert_eq!(Instruction::Call(MathFunction::Cos).to_string(), "call cos");
        assert_eq!(Instruction::Other("phi".into()).to_string(), "phi");
    }
}
