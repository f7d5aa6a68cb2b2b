//! This module contains the data that makes up the blame graph.
//!
//! A node of the graph is a dynamic instruction instance analysed at a
//! particular precision tier. Its outgoing edges are grouped into candidate
//! [`Explanation`]s, each naming the operands that would have to be computed at
//! more than minimal precision for the instruction to reproduce its result.

pub mod dot;
pub mod report;

use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter},
    ops::{BitOr, BitOrAssign},
};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub use self::report::PrecisionReport;
use crate::precision::Tier;

/// The identity of a blame node: a dynamic program counter analysed at a
/// precision tier.
///
/// Identifiers are ordered by DPC first and tier (in search order) second.
#[derive(
    Copy, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct BlameNodeId {
    pub dpc:  u64,
    pub tier: Tier,
}

impl BlameNodeId {
    #[must_use]
    pub fn new(dpc: u64, tier: Tier) -> Self {
        Self { dpc, tier }
    }
}

/// Displays the identifier as `dpc@bits`.
impl Display for BlameNodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.dpc, self.tier)
    }
}

/// One candidate explanation of how a node's result could be reproduced.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Explanation {
    /// The operands that need more than minimal precision, at the tier they
    /// need. There are at most two of them.
    pub blamed: SmallVec<[BlameNodeId; 2]>,

    /// Whether the operator itself, evaluated in single precision, fails to
    /// reproduce the result.
    pub operator_needs_precision: bool,
}

impl Explanation {
    #[must_use]
    pub fn new(blamed: impl IntoIterator<Item = BlameNodeId>, operator_needs_precision: bool) -> Self {
        let blamed = blamed.into_iter().collect();
        Self {
            blamed,
            operator_needs_precision,
        }
    }
}

/// A node in the blame graph.
#[derive(Clone, Debug, PartialEq)]
pub struct BlameNode {
    id:           BlameNodeId,
    pc:           u64,
    file_id:      u64,
    highlight:    bool,
    explanations: Vec<Explanation>,
}

impl BlameNode {
    /// Constructs a node for `id` with no explanations.
    #[must_use]
    pub fn new(id: BlameNodeId, pc: u64, file_id: u64, highlight: bool) -> Self {
        let explanations = Vec::new();
        Self {
            id,
            pc,
            file_id,
            highlight,
            explanations,
        }
    }

    #[must_use]
    pub fn id(&self) -> BlameNodeId {
        self.id
    }

    #[must_use]
    pub fn dpc(&self) -> u64 {
        self.id.dpc
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.id.tier
    }

    /// Gets the source line of the instruction.
    #[must_use]
    pub fn pc(&self) -> u64 {
        self.pc
    }

    #[must_use]
    pub fn file_id(&self) -> u64 {
        self.file_id
    }

    /// Gets the source location of the instruction.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.file_id, self.pc)
    }

    /// Checks whether the result of the node cannot be represented losslessly
    /// in single precision.
    #[must_use]
    pub fn highlight(&self) -> bool {
        self.highlight
    }

    #[must_use]
    pub fn explanations(&self) -> &[Explanation] {
        &self.explanations
    }

    /// Appends `explanation` to the candidate explanations of the node.
    pub fn add_explanation(&mut self, explanation: Explanation) {
        self.explanations.push(explanation);
    }

    /// Iterates over the blamed operands of each explanation, in the order the
    /// explanations were found.
    pub fn edges(&self) -> impl Iterator<Item = &[BlameNodeId]> {
        self.explanations.iter().map(|e| e.blamed.as_slice())
    }

    /// Iterates over the operator flags of each explanation, parallel to
    /// [`Self::edges`].
    pub fn edge_attributes(&self) -> impl Iterator<Item = bool> + '_ {
        self.explanations.iter().map(|e| e.operator_needs_precision)
    }

    /// Gets every node blamed by any explanation of this node.
    #[must_use]
    pub fn blamed_ids(&self) -> BTreeSet<BlameNodeId> {
        self.edges().flatten().copied().collect()
    }

    /// Gets the highlighting this node contributes to its location in a
    /// report, which considers only the first explanation.
    #[must_use]
    pub fn highlighting(&self) -> Highlighting {
        let operator = self.explanations.first().is_some_and(|e| e.operator_needs_precision);
        Highlighting::new(self.highlight, operator)
    }
}

/// A location in the source of the monitored program.
#[derive(
    Copy, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub file_id: u64,
    pub line:    u64,
}

impl Location {
    #[must_use]
    pub fn new(file_id: u64, line: u64) -> Self {
        Self { file_id, line }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "File: {}, Line {}", self.file_id, self.line)
    }
}

/// Which parts of the computation at a location need double precision.
///
/// Highlighting is accumulated across every node that maps to a location with
/// [`BitOr`].
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Highlighting {
    /// The computed result needs double precision.
    pub result: bool,

    /// The operator needs double precision.
    pub operator: bool,
}

impl Highlighting {
    #[must_use]
    pub fn new(result: bool, operator: bool) -> Self {
        Self { result, operator }
    }

    /// Checks if either part needs double precision.
    #[must_use]
    pub fn needs_attention(&self) -> bool {
        self.result || self.operator
    }
}

impl BitOr for Highlighting {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::new(self.result || rhs.result, self.operator || rhs.operator)
    }
}

impl BitOrAssign for Highlighting {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

#[cfg(test)]
mod test {
    use crate::{
        graph::{BlameNode, BlameNodeId, Explanation, Highlighting},
        precision::Tier,
    };

    #[test]
    fn orders_ids_by_dpc_then_search_order() {
        let mut ids = vec![
            BlameNodeId::new(2, Tier::Float),
            BlameNodeId::new(1, Tier::Double),
            BlameNodeId::new(1, Tier::Bits19),
            BlameNodeId::new(1, Tier::Float),
        ];
        ids.sort();

        let rendered: Vec<String> = ids.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["1@23", "1@19", "1@52", "2@23"]);
    }

    #[test]
    fn edges_and_attributes_stay_parallel() {
        let mut node = BlameNode::new(BlameNodeId::new(5, Tier::Double), 12, 0, true);
        node.add_explanation(Explanation::new([BlameNodeId::new(3, Tier::Bits27)], false));
        node.add_explanation(Explanation::new(
            [BlameNodeId::new(3, Tier::Double), BlameNodeId::new(4, Tier::Bits19)],
            true,
        ));

        assert_eq!(node.edges().count(), node.edge_attributes().count());
        assert_eq!(node.edge_attributes().collect::<Vec<_>>(), vec![false, true]);
        assert_eq!(node.blamed_ids().len(), 3);
        assert_eq!(node.highlighting(), Highlighting::new(true, false));
    }

    #[test]
    fn highlighting_accumulates_with_or() {
        let mut accumulated = Highlighting::new(false, true);
        accumulated |= Highlighting::new(true, false);
        assert_eq!(accumulated, Highlighting::new(true, true));
        assert!(!Highlighting::default().needs_attention());
    }
}
