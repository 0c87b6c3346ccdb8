use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    common::Vars,
    convert::{
        ConvertOptions, START_NODE_ID,
        layout::{anchor_position, grid_position, resolve_position},
    },
    model::{ANCHOR_KEY, Position, WorkflowEdge, WorkflowGraph, WorkflowNode, WorkflowStep},
    registry::{ActionType, registry},
};

/// Expand an ordered step list into an editor graph.
///
/// Every step becomes one node with the step's id. Consecutive steps are
/// joined by plain edges, except that a `goto` step with a `nextStep`
/// gets a single loop edge to its target instead. A `nextStep` naming no
/// known step produces no edge at all.
pub fn steps_to_graph(
    steps: &[WorkflowStep],
    options: &ConvertOptions,
) -> WorkflowGraph {
    let saved = options.saved_positions.as_ref();
    let known: HashSet<&str> = steps.iter().map(|s| s.id.as_str()).collect();

    let mut graph = WorkflowGraph {
        nodes: Vec::with_capacity(steps.len() + 1),
        edges: Vec::with_capacity(steps.len()),
    };

    if options.with_start_anchor && known.contains(START_NODE_ID) {
        warn!(node_id = START_NODE_ID, "a step already uses the anchor id, start anchor skipped");
    } else if options.with_start_anchor {
        graph.nodes.push(anchor_node(resolve_position(START_NODE_ID, saved, anchor_position(&options.layout))));
        if let Some(first) = steps.first() {
            graph.edges.push(WorkflowEdge::sequential(START_NODE_ID, &first.id));
        }
    }

    for (index, step) in steps.iter().enumerate() {
        let position = resolve_position(&step.id, saved, grid_position(index, &options.layout));
        graph.nodes.push(WorkflowNode {
            id: step.id.clone(),
            node_type: step.action.clone(),
            position,
            data: step_data(step),
        });
    }

    for (index, step) in steps.iter().enumerate() {
        match step.next_step.as_deref() {
            Some(target) if step.is_goto() => {
                if known.contains(target) {
                    graph.edges.push(WorkflowEdge::looping(&step.id, target));
                } else {
                    debug!(step_id = %step.id, target, "goto target not found, no edge created");
                }
            }
            _ => {
                if let Some(next) = steps.get(index + 1) {
                    graph.edges.push(WorkflowEdge::sequential(&step.id, &next.id));
                }
            }
        }
    }

    graph
}

/// Step fields plus `label` and `nodeType`.
fn step_data(step: &WorkflowStep) -> Vars {
    let mut data = match serde_json::to_value(step) {
        Ok(Value::Object(map)) => Vars::from(map),
        _ => Vars::new(),
    };
    data.set("label", step_label(step));
    data.set("nodeType", step.action.as_str());
    data
}

fn step_label(step: &WorkflowStep) -> String {
    match registry().get(&step.action) {
        Some(config) => config.label.to_string(),
        None if !step.description.is_empty() => step.description.clone(),
        None => step.action.clone(),
    }
}

fn anchor_node(position: Position) -> WorkflowNode {
    let config = registry().lookup(ActionType::Start.as_ref());
    let node_type: &'static str = ActionType::Start.into();

    WorkflowNode {
        id: START_NODE_ID.to_string(),
        node_type: node_type.to_string(),
        position,
        data: Vars::new().with("label", config.label).with("nodeType", node_type).with(ANCHOR_KEY, true),
    }
}
