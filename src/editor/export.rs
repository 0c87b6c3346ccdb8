use petgraph::{
    dot::{Config, Dot},
    visit::EdgeRef,
};

use crate::{
    Result,
    model::{WorkflowGraph, WorkflowStep},
};

/// Pretty JSON array of steps, as the backend stores them.
pub fn steps_json(steps: &[WorkflowStep]) -> Result<String> {
    Ok(serde_json::to_string_pretty(steps)?)
}

/// Graphviz rendering of the editor graph; loop edges are dashed.
pub fn graph_dot(graph: &WorkflowGraph) -> String {
    let (digraph, _) = graph.to_digraph(|n| format!("{} ({})", n.label(), n.id), |e| Some(e.is_loop()));

    let dot = Dot::with_attr_getters(
        &digraph,
        &[Config::EdgeNoLabel],
        &|_, edge| if *edge.weight() { "style=dashed, label=\"loop\"".to_string() } else { String::new() },
        &|_, _| String::new(),
    );
    dot.to_string()
}
