//! This module contains the definition of the analyzer itself.

pub mod state;

use crate::{
    analyzer::state::State,
    engine,
    engine::BlameGraphEngine,
    error,
    graph::{BlameNode, BlameNodeId, PrecisionReport},
    trace::{Trace, TraceRecord},
};

/// Creates a new analyzer wrapping the provided `trace`, that will build the
/// blame graph for `root` using an engine configured by `config`.
#[must_use]
pub fn new<R: TraceRecord>(
    trace: Trace<R>,
    root: BlameNodeId,
    config: engine::Config,
) -> Analyzer<R, state::HasTrace> {
    let state = state::HasTrace { root, config };
    Analyzer { trace, state }
}

/// The front end of the precision analysis, the `Analyzer` is responsible for
/// ingesting a trace and outputting the precision requirements of the program
/// it was recorded from.
///
/// # Basic Usage
///
/// For the most basic usage of the library, it is sufficient to construct an
/// `Analyzer` with [`new`] and call the `.analyze` method.
///
/// # Enforcing Valid State Transitions
///
/// The analyzer enforces that only correct state transitions can occur through
/// use of structs that implement the exact state required by it at any given
/// point.
///
/// There is the [`Self::state`] function that provides access to the state data
/// of whichever state it is in.
pub struct Analyzer<R, S: State> {
    /// The trace that is being analyzed.
    trace: Trace<R>,

    /// The internal state of the analyzer.
    state: S,
}

/// Safe operations available in all states.
impl<R, S: State> Analyzer<R, S> {
    /// Gets a reference to the trace being analyzed.
    pub fn trace(&self) -> &Trace<R> {
        &self.trace
    }

    /// Gets a reference to the current state of the analyzer.
    pub fn state(&self) -> &S {
        &self.state
    }
}

/// Unsafe operations available in all states.
///
/// These operations are capable of **violating the state invariants** of the
/// analyzer, and must be used with the _utmost_ care.
impl<R, S: State> Analyzer<R, S> {
    /// Gets a mutable reference to the current state of the analyzer.
    ///
    /// # Safety
    ///
    /// Do not mutate the state instance unless you totally understand the
    /// state that the analyzer is in, and the implications of doing so.
    pub unsafe fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Forces the analyzer into `new_state`, disregarding any safety with
    /// regards to state transitions.
    ///
    /// # Safety
    ///
    /// Do not force a state transition for the analyzer unless you totally
    /// understand the state that the analyzer is in, and the implications of
    /// doing so.
    pub unsafe fn set_state<NS: State>(self, new_state: NS) -> Analyzer<R, NS> {
        Analyzer {
            trace: self.trace,
            state: new_state,
        }
    }
}

/// A type that allows the user to easily name the initial state of the
/// analyzer.
pub type InitialAnalyzer<R> = Analyzer<R, state::HasTrace>;

/// Operations available on a newly-created analyzer.
impl<R: TraceRecord> Analyzer<R, state::HasTrace> {
    /// Executes the analysis process from beginning to end, performing all the
    /// intermediate steps automatically and returning the precision report.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if any step in the process fails.
    pub fn analyze(self) -> error::Result<PrecisionReport> {
        let analyzer = self.build_graph()?;
        Ok(analyzer.report())
    }

    /// Builds the blame graph for the root from the trace.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the trace does not describe the graph reachable from
    /// the root completely and correctly.
    pub fn build_graph(self) -> error::Result<Analyzer<R, state::GraphComplete>> {
        let mut engine = BlameGraphEngine::new(self.state.root, self.state.config.clone());
        engine.construct_blame_graph(&self.trace)?;

        unsafe { Ok(self.set_state(state::GraphComplete { engine })) }
    }
}

/// Operations available on an analyzer that has built the blame graph.
impl<R> Analyzer<R, state::GraphComplete> {
    /// Gets the engine that holds the blame graph.
    #[must_use]
    pub fn engine(&self) -> &BlameGraphEngine {
        &self.state.engine
    }

    /// Gets the node at the root of the blame graph.
    #[must_use]
    pub fn root(&self) -> Option<&BlameNode> {
        let engine = self.engine();
        engine.node(engine.root())
    }

    /// Gets the precision requirements for each source location reachable
    /// from the root.
    #[must_use]
    pub fn report(&self) -> PrecisionReport {
        self.engine().report()
    }

    /// Renders the blame graph in the DOT language.
    #[must_use]
    pub fn to_dot(&self) -> String {
        self.engine().to_dot()
    }
}
