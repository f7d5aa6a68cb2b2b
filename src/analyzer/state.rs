//! This module contains the state tracking functionality for the analyzer.

use std::fmt::Debug;

use crate::{
    engine,
    engine::BlameGraphEngine,
    graph::BlameNodeId,
};

/// A marker trait that says that the type implementing it is an analyzer
/// state.
///
/// Analyzer states can be transitioned between as part of the
/// [`crate::analyzer::Analyzer`] state machine, and are intended to enforce
/// that correct state transitions take place.
pub trait State
where
    Self: Debug + Sized,
{
}

/// The initial state for the analyzer.
#[derive(Debug)]
pub struct HasTrace {
    /// The node for which the blame graph will be built.
    pub root: BlameNodeId,

    /// The configuration for the analyzer's engine.
    pub config: engine::Config,
}
impl State for HasTrace {}

/// The analyzer has built the complete blame graph for its root.
#[derive(Debug)]
pub struct GraphComplete {
    /// The engine holding the constructed graph.
    pub engine: BlameGraphEngine,
}
impl State for GraphComplete {}
