//! This module is an integration test that checks how nodes sharing a source
//! location are merged in the precision report.
#![cfg(test)]

use precision_blame as pb;
use precision_blame::{
    engine,
    graph::{BlameNodeId, Explanation, Highlighting, Location},
    precision::{BinaryOperator, MathFunction, Tier},
    trace::{Instruction, Trace},
};

mod common;

/// Builds a trace where the operands of an addition at line 30 are both
/// computed by calls at line 25. Only one of those calls produces a value that
/// needs double precision.
fn shared_line_trace() -> anyhow::Result<Trace<precision_blame::trace::ShadowObject>> {
    let third = 1.0 / 3.0;
    let fabs = Instruction::Call(MathFunction::Fabs);

    let trace = Trace::from_groups(vec![
        vec![
            common::record(
                9,
                30,
                Instruction::Binary(BinaryOperator::Add),
                [0.75, 0.75, 0.75, third + 0.5],
            ),
            common::operand(7, [0.25, 0.25, 0.25, third]),
            common::operand(8, [0.25, 0.25, 0.5, 0.5]),
        ],
        vec![
            common::record(7, 25, fabs.clone(), [0.25, 0.25, 0.25, third]),
            common::operand(70, [third; 4]),
        ],
        vec![
            common::record(8, 25, fabs, [0.25, 0.25, 0.5, 0.5]),
            common::operand(80, [0.5; 4]),
        ],
    ])?;

    Ok(trace)
}

#[test]
fn finds_the_first_working_tier_pair() -> anyhow::Result<()> {
    let root = BlameNodeId::new(9, Tier::Double);
    let analyzer = pb::new(shared_line_trace()?, root, engine::Config::default()).build_graph()?;

    let root_node = analyzer.root().expect("root is built with the graph");
    assert_eq!(
        root_node.explanations(),
        &[Explanation::new(
            [BlameNodeId::new(7, Tier::Double), BlameNodeId::new(8, Tier::Bits27)],
            true
        )]
    );

    let unhighlighted = analyzer
        .engine()
        .node(BlameNodeId::new(8, Tier::Bits27))
        .expect("blamed operand is built");
    assert!(!unhighlighted.highlight());

    Ok(())
}

#[test]
fn highlighting_is_merged_per_location() -> anyhow::Result<()> {
    let root = BlameNodeId::new(9, Tier::Double);
    let report = pb::new(shared_line_trace()?, root, engine::Config::default()).analyze()?;

    assert_eq!(report.len(), 2);
    assert_eq!(report.get(Location::new(0, 25)), Some(Highlighting::new(true, false)));
    assert_eq!(report.get(Location::new(0, 30)), Some(Highlighting::new(true, true)));
    assert_eq!(
        report.to_string(),
        "\t File: 0, Line 25:\n\t\t Result: double precision\n\t File: 0, Line 30:\n\t\t Result: \
         double precision\n\t\t Operator: double precision\n"
    );

    Ok(())
}

#[test]
fn report_serializes_to_json() -> anyhow::Result<()> {
    let root = BlameNodeId::new(9, Tier::Double);
    let report = pb::new(shared_line_trace()?, root, engine::Config::default()).analyze()?;

    let json = serde_json::to_value(&report)?;
    let entries = json.as_array().expect("reports serialize as a list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["location"]["line"], 25);
    assert_eq!(entries[1]["highlighting"]["operator"], true);

    Ok(())
}
