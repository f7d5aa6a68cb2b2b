//! This module contains common utilities for simplifying the writing of
//! integration tests for this library.

#![cfg(test)]

use std::{fs::File, io::Read};

use precision_blame as pb;
use precision_blame::{
    analyzer::InitialAnalyzer,
    engine,
    graph::BlameNodeId,
    trace::{Instruction, ShadowObject, TierValues, Trace},
};

/// Reads the JSON-encoded trace at the provided `path`.
#[allow(unused)] // It is actually
pub fn read_trace(path: impl Into<String>) -> anyhow::Result<Trace<ShadowObject>> {
    let mut file = File::open(path.into())?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    Ok(serde_json::from_str(&contents)?)
}

/// Constructs a new analyzer for the trace at the provided `path` that will
/// build the blame graph for `root`.
///
/// It uses the default configuration for the engine.
#[allow(unused)] // It is actually
pub fn new_analyzer_from(
    path: impl Into<String>,
    root: BlameNodeId,
) -> anyhow::Result<InitialAnalyzer<ShadowObject>> {
    let trace = read_trace(path)?;
    Ok(pb::new(trace, root, engine::Config::default()))
}

/// Constructs a record in file zero whose static program counter is `pc`.
#[allow(unused)] // It is actually
pub fn record(
    dpc: u64,
    pc: u64,
    instruction: Instruction,
    values: impl Into<TierValues>,
) -> ShadowObject {
    ShadowObject::new(dpc, pc, 0, instruction, values)
}

/// Constructs an operand record, whose instruction is irrelevant to the
/// analysis.
#[allow(unused)] // It is actually
pub fn operand(dpc: u64, values: impl Into<TierValues>) -> ShadowObject {
    record(dpc, 0, Instruction::Other("load".into()), values)
}
