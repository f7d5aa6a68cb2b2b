//! This module contains the rendering of the blame graph in the DOT language,
//! for consumption by graph visualisation tools.

use itertools::Itertools;

use crate::graph::BlameNode;

/// Renders the statement for `node` itself, marking it red when its result
/// needs double precision.
#[must_use]
pub fn node_to_dot(node: &BlameNode) -> String {
    let id = node.id();
    if node.highlight() {
        format!("\"{id}\" [color=red];")
    } else {
        format!("\"{id}\";")
    }
}

/// Renders one edge statement from `node` to every node blamed by any of its
/// explanations, one statement per line.
#[must_use]
pub fn edges_to_dot(node: &BlameNode) -> String {
    let id = node.id();
    node.edges()
        .flatten()
        .map(|blamed| format!("\t\"{id}\" -> \"{blamed}\";"))
        .join("\n")
}

/// Renders the graph made up of `nodes` as a DOT digraph.
///
/// Nodes are emitted in the reverse of the order given, so that nodes provided
/// in ascending order of identifier are rendered from the latest DPC back.
#[must_use]
pub fn render<'a>(nodes: impl DoubleEndedIterator<Item = &'a BlameNode>) -> String {
    let mut dot = String::from("digraph G {\n");
    for node in nodes.rev() {
        dot.push('\t');
        dot.push_str(&node_to_dot(node));
        dot.push('\n');

        let edges = edges_to_dot(node);
        if !edges.is_empty() {
            dot.push_str(&edges);
            dot.push('\n');
        }
    }
    dot.push_str("}\n");

    dot
}
