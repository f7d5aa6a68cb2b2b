//! This module contains the [`BlameGraphEngine`], which builds the blame graph
//! for a root instruction instance by working backwards through a trace.
//!
//! # The Search
//!
//! For each node the engine looks for precision tiers at which the operands of
//! the instruction reproduce its result. Tiers are always tried in
//! [`Tier::SEARCH_ORDER`], and a tier that works is assumed to make every tier
//! after it in that order redundant. An operand is blamed in an explanation
//! only when its minimal-tier value would not have been good enough at the tier
//! that worked, and every blamed operand becomes a node of the graph in its own
//! right.

use std::{
    collections::{btree_map::Entry, BTreeMap, BTreeSet, VecDeque},
    io::Write,
};

use tracing::debug;

use crate::{
    constant::{
        BINARY_RECORD_COUNT,
        CALL_RECORD_COUNT,
        DEFAULT_CHECK_RESULT_TRUNCATION,
        DEFAULT_MAXIMUM_GRAPH_NODES,
        DEFAULT_OPERATOR_CHECK,
    },
    error::{
        analysis::{Error, Result},
        container::Locatable,
    },
    graph::{dot, BlameNode, BlameNodeId, Explanation, PrecisionReport},
    precision::{equal_within_tier, representable_in_single, truncate_to_tier, Tier},
    trace::{Instruction, Trace, TraceRecord},
};

/// The engine that builds the blame graph for a single root.
///
/// The engine owns the memo table of every node built so far, so each analysis
/// run should use a fresh engine.
#[derive(Debug)]
pub struct BlameGraphEngine {
    /// The configuration of the engine.
    config: Config,

    /// The node from which graph construction starts.
    root: BlameNodeId,

    /// Every node constructed so far, which doubles as the memo table.
    nodes: BTreeMap<BlameNodeId, BlameNode>,

    /// Counters describing the work done by the engine.
    statistics: Statistics,
}

impl BlameGraphEngine {
    /// Constructs a new engine that will build the graph for `root`, configured
    /// by the provided `config`.
    #[must_use]
    pub fn new(root: BlameNodeId, config: Config) -> Self {
        let nodes = BTreeMap::new();
        let statistics = Statistics::default();
        Self {
            config,
            root,
            nodes,
            statistics,
        }
    }

    #[must_use]
    pub fn root(&self) -> BlameNodeId {
        self.root
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets every node constructed so far, in order of identifier.
    #[must_use]
    pub fn nodes(&self) -> &BTreeMap<BlameNodeId, BlameNode> {
        &self.nodes
    }

    /// Gets the node for `id`, if it has been constructed.
    #[must_use]
    pub fn node(&self, id: BlameNodeId) -> Option<&BlameNode> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    /// Constructs the node for the math library call described by the result
    /// record `left` at `tier`, with `arg` as the record of its argument.
    ///
    /// Returns the existing node if one has already been constructed for the
    /// same DPC and tier.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `left` does not describe a call, if its value is not
    /// truncated to `tier` when that is checked, or if the graph is full.
    pub fn construct_func_blame_node<R: TraceRecord>(
        &mut self,
        left: &R,
        tier: Tier,
        arg: &R,
    ) -> Result<&BlameNode> {
        let id = BlameNodeId::new(left.dpc(), tier);
        let instruction = left.instruction();
        let Instruction::Call(function) = instruction else {
            return Err(unsupported(&instruction).locate(id.dpc));
        };

        self.memoize(id, |config| {
            let value = result_value(config, left, tier)?;
            let mut node = BlameNode::new(id, left.pc(), left.file_id(), highlight(value));

            let found = Tier::SEARCH_ORDER
                .into_iter()
                .find(|i| equal_within_tier(value, function.eval_wide(arg.value(*i)), tier));
            if let Some(i) = found {
                node.add_explanation(Explanation::new(blame(arg, i), false));
            }

            Ok(node)
        })
    }

    /// Constructs the node for the binary arithmetic instruction described by
    /// the result record `left` at `tier`, with `op_a` and `op_b` as the
    /// records of its operands.
    ///
    /// Returns the existing node if one has already been constructed for the
    /// same DPC and tier.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `left` does not describe a binary operation, if its
    /// value is not truncated to `tier` when that is checked, or if the graph
    /// is full.
    pub fn construct_blame_node<R: TraceRecord>(
        &mut self,
        left: &R,
        tier: Tier,
        op_a: &R,
        op_b: &R,
    ) -> Result<&BlameNode> {
        let id = BlameNodeId::new(left.dpc(), tier);
        let instruction = left.instruction();
        let Instruction::Binary(op) = instruction else {
            return Err(unsupported(&instruction).locate(id.dpc));
        };

        self.memoize(id, |config| {
            let value = result_value(config, left, tier)?;
            let mut node = BlameNode::new(id, left.pc(), left.file_id(), highlight(value));

            // Once some tier works for the second operand, no later first-operand tier
            // tries it or anything after it.
            let mut max_j = Tier::SEARCH_ORDER.len();
            for i in Tier::SEARCH_ORDER {
                let value_a = op_a.value(i);
                let mut reached = max_j;

                for j in Tier::SEARCH_ORDER.into_iter().take(max_j) {
                    let value_b = op_b.value(j);
                    if !equal_within_tier(value, op.eval_wide(value_a, value_b), tier) {
                        continue;
                    }

                    let blamed = blame(op_a, i).into_iter().chain(blame(op_b, j));
                    let operator = config.operator_check
                        && !equal_within_tier(value, op.eval_narrow(value_a, value_b), tier);
                    node.add_explanation(Explanation::new(blamed, operator));

                    reached = j.position();
                    break;
                }

                max_j = reached;
            }

            Ok(node)
        })
    }

    /// Builds the blame graph outwards from the root using the records in
    /// `trace`, returning the root's node.
    ///
    /// Every node blamed by any explanation of a constructed node is itself
    /// constructed, in breadth-first order.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] on the first node whose trace entry is missing or
    /// malformed, or that cannot be constructed. No partial graph is usable
    /// after an error.
    pub fn construct_blame_graph<R: TraceRecord>(&mut self, trace: &Trace<R>) -> Result<&BlameNode> {
        let mut worklist = VecDeque::from([self.root]);

        while let Some(id) = worklist.pop_front() {
            if self.nodes.contains_key(&id) {
                continue;
            }

            let records = trace.get(id.dpc).ok_or(Error::MissingTraceEntry).locate(id.dpc)?;
            let left = records.first().ok_or(Error::EmptyRecordGroup).locate(id.dpc)?;
            if left.dpc() != id.dpc {
                return Err(Error::MismatchedDpc { found: left.dpc() }.locate(id.dpc));
            }

            let instruction = left.instruction();
            let node = match (&instruction, records) {
                (Instruction::Binary(_), [left, op_a, op_b]) => {
                    self.construct_blame_node(left, id.tier, op_a, op_b)?
                }
                (Instruction::Call(_), [left, arg]) => {
                    self.construct_func_blame_node(left, id.tier, arg)?
                }
                (Instruction::Binary(_), _) => {
                    return Err(malformed(&instruction, BINARY_RECORD_COUNT, records.len())
                        .locate(id.dpc));
                }
                (Instruction::Call(_), _) => {
                    return Err(
                        malformed(&instruction, CALL_RECORD_COUNT, records.len()).locate(id.dpc)
                    );
                }
                (Instruction::Other(_), _) => {
                    return Err(unsupported(&instruction).locate(id.dpc));
                }
            };

            let blamed = node.blamed_ids();
            worklist.extend(blamed.into_iter().filter(|b| !self.nodes.contains_key(b)));
        }

        debug!(
            root = %self.root,
            nodes = self.nodes.len(),
            constructed = self.statistics.constructed,
            memo_hits = self.statistics.memo_hits,
            "blame graph complete"
        );

        self.nodes
            .get(&self.root)
            .ok_or(Error::RootNotConstructed)
            .locate(self.root.dpc)
    }

    /// Summarises the precision requirements of the graph per source location.
    ///
    /// The graph is walked breadth-first from the root following only the
    /// first explanation of each node. Nodes without any explanation do not
    /// contribute.
    #[must_use]
    pub fn report(&self) -> PrecisionReport {
        let mut report = PrecisionReport::new();
        let mut seen = BTreeSet::from([self.root]);
        let mut worklist = VecDeque::from([self.root]);

        while let Some(id) = worklist.pop_front() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let Some(first) = node.explanations().first() else {
                continue;
            };

            report.record(node.location(), node.highlighting());
            for blamed in &first.blamed {
                if seen.insert(*blamed) {
                    worklist.push_back(*blamed);
                }
            }
        }

        report
    }

    /// Writes the [`Self::report`] for the graph to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if writing to `out` fails.
    pub fn print_result(&self, out: &mut impl Write) -> std::io::Result<()> {
        write!(out, "{}", self.report())
    }

    /// Renders the whole graph in the DOT language.
    #[must_use]
    pub fn to_dot(&self) -> String {
        dot::render(self.nodes.values())
    }

    /// Renders the edges leaving `node` in the DOT language.
    #[must_use]
    pub fn edge_to_dot(&self, node: &BlameNode) -> String {
        dot::edges_to_dot(node)
    }

    /// Returns the node for `id`, constructing it with `build` if it has not
    /// been constructed before.
    fn memoize(
        &mut self,
        id: BlameNodeId,
        build: impl FnOnce(&Config) -> Result<BlameNode>,
    ) -> Result<&BlameNode> {
        let full = self.nodes.len() >= self.config.maximum_graph_nodes;
        let node = match self.nodes.entry(id) {
            Entry::Occupied(entry) => {
                self.statistics.memo_hits += 1;
                debug!(node = %id, "reusing memoized blame node");
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                if full {
                    return Err(Error::GraphSizeExceeded {
                        limit: self.config.maximum_graph_nodes,
                    }
                    .locate(id.dpc));
                }

                let node = build(&self.config)?;
                self.statistics.constructed += 1;
                debug!(
                    node = %id,
                    explanations = node.explanations().len(),
                    highlight = node.highlight(),
                    "constructed blame node"
                );
                entry.insert(node)
            }
        };

        Ok(node)
    }
}

/// Counters describing the work done by a [`BlameGraphEngine`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    /// The number of nodes that have been constructed.
    pub constructed: usize,

    /// The number of times construction was requested for a node that already
    /// existed.
    pub memo_hits: usize,
}

/// The configuration for the blame graph engine, allowing its behaviour to be
/// configured externally.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// The maximum number of nodes the graph may contain before construction
    /// fails.
    ///
    /// Defaults to [`DEFAULT_MAXIMUM_GRAPH_NODES`].
    pub maximum_graph_nodes: usize,

    /// Whether to check that the value of every result record at the tier
    /// being analysed is already truncated to that tier.
    ///
    /// Defaults to [`DEFAULT_CHECK_RESULT_TRUNCATION`].
    pub check_result_truncation: bool,

    /// Whether to compute if operators, and not just their operands, need
    /// double precision. When disabled, no operator is ever flagged.
    ///
    /// Defaults to [`DEFAULT_OPERATOR_CHECK`].
    pub operator_check: bool,
}

impl Config {
    /// Sets the `maximum_graph_nodes` config parameter to `value`.
    #[must_use]
    pub fn with_maximum_graph_nodes(mut self, value: usize) -> Self {
        self.maximum_graph_nodes = value;
        self
    }

    /// Sets the `check_result_truncation` config parameter to `value`.
    #[must_use]
    pub fn with_check_result_truncation(mut self, value: bool) -> Self {
        self.check_result_truncation = value;
        self
    }

    /// Sets the `operator_check` config parameter to `value`.
    #[must_use]
    pub fn with_operator_check(mut self, value: bool) -> Self {
        self.operator_check = value;
        self
    }
}

/// Creates a default engine configuration.
impl Default for Config {
    fn default() -> Self {
        let maximum_graph_nodes = DEFAULT_MAXIMUM_GRAPH_NODES;
        let check_result_truncation = DEFAULT_CHECK_RESULT_TRUNCATION;
        let operator_check = DEFAULT_OPERATOR_CHECK;
        Self {
            maximum_graph_nodes,
            check_result_truncation,
            operator_check,
        }
    }
}

/// Gets the value of the result record `left` at `tier`, checking that it is
/// truncated to `tier` if so configured.
fn result_value<R: TraceRecord>(config: &Config, left: &R, tier: Tier) -> Result<f64> {
    let value = left.value(tier);
    if config.check_result_truncation && truncate_to_tier(value, tier).to_bits() != value.to_bits() {
        return Err(Error::ResultNotAtTier { value, tier }.locate(left.dpc()));
    }

    Ok(value)
}

/// Blames the operand described by `record` at `tier`, unless the tier is
/// minimal or the operand's minimal-tier value already suffices at `tier`.
fn blame<R: TraceRecord>(record: &R, tier: Tier) -> Option<BlameNodeId> {
    let value = record.value(tier);
    let low_value = record.value(Tier::MINIMAL);

    #[allow(clippy::float_cmp)] // Exact comparison is intended
    let suffices = truncate_to_tier(low_value, tier) == value;
    (!tier.is_minimal() && !suffices).then(|| BlameNodeId::new(record.dpc(), tier))
}

/// Checks whether `value` cannot be represented in single precision.
fn highlight(value: f64) -> bool {
    !representable_in_single(value)
}

fn unsupported(instruction: &Instruction) -> Error {
    let name = instruction.to_string();
    Error::UnsupportedInstruction { name }
}

fn malformed(instruction: &Instruction, expected: usize, found: usize) -> Error {
    Error::MalformedRecord {
        instruction: instruction.to_string(),
        expected,
        found,
    }
}

#[cfg(test)]
mod test {
    use crate::{
        engine::{BlameGraphEngine, Config, Statistics},
        error::analysis::Error,
        graph::{BlameNodeId, Explanation, Highlighting, Location},
        precision::{BinaryOperator, MathFunction, Tier},
        trace::{Instruction, ShadowObject, TierValues, Trace},
    };

    const ADD: Instruction = Instruction::Binary(BinaryOperator::Add);

    fn record(dpc: u64, instruction: Instruction, values: impl Into<TierValues>) -> ShadowObject {
        ShadowObject::new(dpc, dpc * 10, 0, instruction, values)
    }

    fn operand(dpc: u64, values: impl Into<TierValues>) -> ShadowObject {
        record(dpc, Instruction::Other("load".into()), values)
    }

    /// An addition whose first operand is the same at every tier, and whose
    /// second operand is only correct from the 27-bit tier onwards.
    fn addition() -> [ShadowObject; 3] {
        let a = 1.0 + 2f64.powi(-28);
        let b_low = 0.5;
        let b_high = 0.5 - 2f64.powi(-28);
        [
            record(10, ADD, TierValues::uniform(1.5)),
            operand(1, TierValues::uniform(a)),
            operand(2, [b_low, b_low, b_high, b_high]),
        ]
    }

    /// A doubling of one third, which is only reproduced when both operands are
    /// at full precision. Each operand is the result of a call that is already
    /// reproduced at minimal precision.
    fn thirds() -> Vec<Vec<ShadowObject>> {
        let third = 1.0 / 3.0;
        let operand_values = [0.25, 0.25, 0.25, third];
        let fabs = Instruction::Call(MathFunction::Fabs);
        vec![
            vec![
                record(5, ADD, TierValues::uniform(2.0 * third)),
                operand(3, operand_values),
                operand(4, operand_values),
            ],
            vec![
                record(3, fabs.clone(), operand_values),
                operand(30, TierValues::uniform(third)),
            ],
            vec![record(4, fabs, operand_values), operand(40, TierValues::uniform(third))],
        ]
    }

    #[test]
    fn blames_only_the_operand_that_needs_precision() -> anyhow::Result<()> {
        let [left, a, b] = addition();
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(10, Tier::Double), Config::default());

        let node = engine.construct_blame_node(&left, Tier::Double, &a, &b)?;
        assert_eq!(
            node.explanations(),
            &[Explanation::new([BlameNodeId::new(2, Tier::Bits27)], false)]
        );
        assert!(!node.highlight());

        Ok(())
    }

    #[test]
    fn explanations_follow_the_pruned_search() -> anyhow::Result<()> {
        let groups = thirds();
        let [left, a, b] = &groups[0][..] else {
            unreachable!("the addition has three records")
        };
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(5, Tier::Double), Config::default());

        let node = engine.construct_blame_node(left, Tier::Double, a, b)?;
        assert_eq!(
            node.explanations(),
            &[Explanation::new(
                [BlameNodeId::new(3, Tier::Double), BlameNodeId::new(4, Tier::Double)],
                true
            )]
        );
        assert!(node.highlight());

        Ok(())
    }

    #[test]
    fn later_first_operand_tiers_add_their_own_explanations() -> anyhow::Result<()> {
        // Values are listed in search order: 23, 19, 27 and 52 bits.
        let left = record(10, ADD, TierValues::uniform(3.0));
        let a = operand(1, [1.0, 2.0, 2.0, 2.0]);
        let b = operand(2, [5.0, 1.0, 1.0, 2.0]);
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(10, Tier::Double), Config::default());

        // The 23-bit tier of `a` needs `b` at 52 bits, and the 19-bit tier then
        // narrows the search for `b` to the 23 and 19-bit tiers. Neither of the
        // remaining tiers of `a` works with those, so nothing more is added.
        let node = engine.construct_blame_node(&left, Tier::Double, &a, &b)?;
        assert_eq!(
            node.explanations(),
            &[
                Explanation::new([BlameNodeId::new(2, Tier::Double)], false),
                Explanation::new(
                    [BlameNodeId::new(1, Tier::Bits19), BlameNodeId::new(2, Tier::Bits19)],
                    false
                ),
            ]
        );
        assert_eq!(node.edge_attributes().collect::<Vec<_>>(), vec![false, false]);
        assert!(!node.highlight());

        Ok(())
    }

    #[test]
    fn explains_a_call_at_the_first_sufficient_tier() -> anyhow::Result<()> {
        let root_two = 2f64.sqrt();
        let left = record(7, Instruction::Call(MathFunction::Sqrt), TierValues::uniform(root_two));
        let arg = operand(6, [1.0, 1.0, 1.0, 2.0]);
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(7, Tier::Double), Config::default());

        let node = engine.construct_func_blame_node(&left, Tier::Double, &arg)?;
        assert_eq!(
            node.explanations(),
            &[Explanation::new([BlameNodeId::new(6, Tier::Double)], false)]
        );
        assert!(node.highlight());

        Ok(())
    }

    #[test]
    fn memoizes_constructed_nodes() -> anyhow::Result<()> {
        let [left, a, b] = addition();
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(10, Tier::Double), Config::default());

        engine.construct_blame_node(&left, Tier::Double, &a, &b)?;
        engine.construct_blame_node(&left, Tier::Double, &a, &b)?;
        assert_eq!(
            engine.statistics(),
            Statistics {
                constructed: 1,
                memo_hits:   1,
            }
        );

        Ok(())
    }

    #[test]
    fn builds_the_graph_through_blamed_operands() -> anyhow::Result<()> {
        let [left, a, b] = addition();
        let b_value = 0.5 - 2f64.powi(-28);
        let b_low = 0.5;
        let b_call = record(2, Instruction::Call(MathFunction::Fabs), [b_low, b_low, b_value, b_value]);
        let b_arg = operand(8, TierValues::uniform(-b_value));
        let trace = Trace::from_groups(vec![vec![left, a, b], vec![b_call, b_arg]])?;

        let root = BlameNodeId::new(10, Tier::Double);
        let mut engine = BlameGraphEngine::new(root, Config::default());
        let root_node = engine.construct_blame_graph(&trace)?;
        assert_eq!(root_node.id(), root);

        let ids: Vec<BlameNodeId> = engine.nodes().keys().copied().collect();
        assert_eq!(ids, vec![BlameNodeId::new(2, Tier::Bits27), root]);

        let call = engine.node(BlameNodeId::new(2, Tier::Bits27)).expect("blamed node is built");
        assert_eq!(call.explanations(), &[Explanation::default()]);
        assert!(call.highlight());
        assert_eq!(engine.statistics().constructed, 2);

        Ok(())
    }

    #[test]
    fn missing_trace_entries_are_located_at_their_dpc() -> anyhow::Result<()> {
        let [left, a, b] = addition();
        let trace = Trace::from_groups(vec![vec![left, a, b]])?;
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(10, Tier::Double), Config::default());

        let err = engine.construct_blame_graph(&trace).unwrap_err();
        assert_eq!(err.location, 2);
        assert_eq!(err.payload, Error::MissingTraceEntry);

        Ok(())
    }

    #[test]
    fn rejects_records_of_the_wrong_arity() -> anyhow::Result<()> {
        let [left, a, _] = addition();
        let trace = Trace::from_groups(vec![vec![left, a]])?;
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(10, Tier::Double), Config::default());

        assert_eq!(
            engine.construct_blame_graph(&trace).unwrap_err().payload,
            Error::MalformedRecord {
                instruction: "fadd".into(),
                expected:    3,
                found:       2,
            }
        );

        Ok(())
    }

    #[test]
    fn rejects_unsupported_instructions() -> anyhow::Result<()> {
        let trace = Trace::from_groups(vec![vec![operand(4, TierValues::uniform(1.0))]])?;
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(4, Tier::Float), Config::default());

        assert_eq!(
            engine.construct_blame_graph(&trace).unwrap_err().payload,
            Error::UnsupportedInstruction {
                name: "load".into(),
            }
        );

        Ok(())
    }

    #[test]
    fn rejects_results_not_truncated_to_the_tier() {
        let [_, a, b] = addition();
        let left = record(10, ADD, TierValues::uniform(0.1));
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(10, Tier::Float), Config::default());

        let err = engine.construct_blame_node(&left, Tier::Float, &a, &b).unwrap_err();
        assert_eq!(
            err.payload,
            Error::ResultNotAtTier {
                value: 0.1,
                tier:  Tier::Float,
            }
        );
    }

    #[test]
    fn enforces_the_graph_size_limit() {
        let [left, a, b] = addition();
        let config = Config::default().with_maximum_graph_nodes(0);
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(10, Tier::Double), config);

        let err = engine.construct_blame_node(&left, Tier::Double, &a, &b).unwrap_err();
        assert_eq!(err.payload, Error::GraphSizeExceeded { limit: 0 });
        assert_eq!(err.location, 10);
    }

    #[test]
    fn operator_check_can_be_disabled() -> anyhow::Result<()> {
        let trace = Trace::from_groups(thirds())?;
        let config = Config::default().with_operator_check(false);
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(5, Tier::Double), config);

        engine.construct_blame_graph(&trace)?;
        assert_eq!(engine.nodes().len(), 3);
        assert!(engine.nodes().values().all(|n| n.edge_attributes().all(|a| !a)));

        Ok(())
    }

    #[test]
    fn reports_the_first_explanation_of_reachable_nodes() -> anyhow::Result<()> {
        let trace = Trace::from_groups(thirds())?;
        let mut engine = BlameGraphEngine::new(BlameNodeId::new(5, Tier::Double), Config::default());
        engine.construct_blame_graph(&trace)?;

        let report = engine.report();
        assert_eq!(report.len(), 3);
        assert_eq!(report.get(Location::new(0, 50)), Some(Highlighting::new(true, true)));
        assert_eq!(report.get(Location::new(0, 30)), Some(Highlighting::new(true, false)));

        let mut out = Vec::new();
        engine.print_result(&mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "\t File: 0, Line 30:\n\t\t Result: double precision\n\t File: 0, Line 40:\n\t\t \
             Result: double precision\n\t File: 0, Line 50:\n\t\t Result: double precision\n\t\t \
             Operator: double precision\n"
        );

        Ok(())
    }
}
