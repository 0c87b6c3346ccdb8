use tracing::warn;

use crate::{
    common::Vars,
    convert::layout::layout_order,
    model::{WorkflowGraph, WorkflowNode, WorkflowStep},
    registry::registry,
};

/// Flatten an editor graph back into the persisted step list.
///
/// Anchor nodes are dropped. Steps are ordered top to bottom by `y`, then
/// left to right by `x`; nodes sharing both keep their insertion order.
/// Optional fields are only copied when they carry the expected primitive
/// type, so a malformed value disappears instead of reaching the backend.
pub fn graph_to_steps(graph: &WorkflowGraph) -> Vec<WorkflowStep> {
    let mut nodes: Vec<&WorkflowNode> = graph.nodes.iter().filter(|n| !n.is_anchor()).collect();
    nodes.sort_by(|a, b| layout_order(&a.position, &b.position));

    nodes.into_iter().map(|node| node_to_step(graph, node)).collect()
}

fn node_to_step(
    graph: &WorkflowGraph,
    node: &WorkflowNode,
) -> WorkflowStep {
    let action = registry().action_for_node_type(&node.node_type);
    let description = field(node, "description", |d, k| d.get_str(k).map(str::to_string))
        .or_else(|| node.data.get_str("label").map(str::to_string))
        .unwrap_or_default();

    let next_step = if action == "goto" {
        graph
            .loop_target(&node.id)
            .filter(|target| graph.contains_node(target))
            .map(str::to_string)
            .or_else(|| field(node, "nextStep", |d, k| d.get_str(k).map(str::to_string)))
    } else {
        None
    };

    WorkflowStep {
        id: node.id.clone(),
        action,
        description,
        delay: field(node, "delay", Vars::get_u64).unwrap_or(0),
        critical: field(node, "critical", Vars::get_bool),
        timeout: field(node, "timeout", Vars::get_u64),
        swipe_count: field(node, "swipeCount", Vars::get_u32),
        min_swipes: field(node, "minSwipes", Vars::get_u32),
        max_swipes: field(node, "maxSwipes", Vars::get_u32),
        min_interval_ms: field(node, "minIntervalMs", Vars::get_u64),
        max_interval_ms: field(node, "maxIntervalMs", Vars::get_u64),
        next_step,
        parallel: field(node, "parallel", Vars::get_bool),
        infinite_allowed: field(node, "infiniteAllowed", Vars::get_bool),
        max_iterations: field(node, "maxIterations", Vars::get_u32),
        track_iterations: field(node, "trackIterations", Vars::get_bool),
    }
}

/// Typed read of a data field, warning when a present value has the wrong type.
fn field<T>(
    node: &WorkflowNode,
    key: &str,
    read: impl Fn(&Vars, &str) -> Option<T>,
) -> Option<T> {
    let value = read(&node.data, key);
    if value.is_none() && node.data.get(key).is_some_and(|v| !v.is_null()) {
        warn!(node_id = %node.id, field = key, "dropping field with unexpected type");
    }
    value
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::graph_to_steps;
    use crate::{
        common::Vars,
        convert::{ConvertOptions, PositionMap, START_NODE_ID, steps_to_graph},
        model::{Position, WorkflowEdge, WorkflowGraph, WorkflowNode, WorkflowStep},
    };

    fn node(
        id: &str,
        node_type: &str,
        x: f64,
        y: f64,
        data: serde_json::Value,
    ) -> WorkflowNode {
        WorkflowNode {
            id: id.to_string(),
            node_type: node_type.to_string(),
            position: Position::new(x, y),
            data: Vars::try_from(data).unwrap(),
        }
    }

    fn sample_steps() -> Vec<WorkflowStep> {
        let mut prompt = WorkflowStep::new("prompt", "add_prompt");
        prompt.description = "Fill prompt".to_string();
        prompt.delay = 2000;
        prompt.critical = Some(true);
        prompt.timeout = Some(30000);

        let mut swipe = WorkflowStep::new("swipe", "activate_continuous_swipe");
        swipe.min_swipes = Some(10);
        swipe.max_swipes = Some(30);
        swipe.min_interval_ms = Some(1500);
        swipe.max_interval_ms = Some(6000);
        swipe.parallel = Some(false);

        let mut spectre = WorkflowStep::new("spectre", "swipe_with_spectre");
        spectre.swipe_count = Some(40);

        let mut again = WorkflowStep::new("again", "goto");
        again.description = "Repeat".to_string();
        again.next_step = Some("swipe".to_string());
        again.infinite_allowed = Some(false);
        again.max_iterations = Some(5);
        again.track_iterations = Some(true);

        let mut custom = WorkflowStep::new("custom", "send_message");
        custom.delay = 10;

        vec![WorkflowStep::new("start_wait", "wait"), prompt, swipe, spectre, again, custom]
    }

    #[test]
    fn test_round_trip() {
        let steps = sample_steps();
        let graph = steps_to_graph(&steps, &ConvertOptions::default());
        assert_eq!(graph_to_steps(&graph), steps);
    }

    #[test]
    fn test_round_trip_with_anchor() {
        let steps = sample_steps();
        let options = ConvertOptions {
            with_start_anchor: true,
            ..Default::default()
        };
        let graph = steps_to_graph(&steps, &options);
        assert!(graph.contains_node(START_NODE_ID));
        assert_eq!(graph_to_steps(&graph), steps);
    }

    #[test]
    fn test_steps_named_like_the_anchor_survive() {
        let steps = vec![WorkflowStep::new("a", "wait"), WorkflowStep::new("b", "start"), WorkflowStep::new(START_NODE_ID, "wait")];

        assert_eq!(graph_to_steps(&steps_to_graph(&steps, &ConvertOptions::default())), steps);

        let options = ConvertOptions {
            with_start_anchor: true,
            ..Default::default()
        };
        assert_eq!(graph_to_steps(&steps_to_graph(&steps, &options)), steps);
    }

    #[test]
    fn test_orders_by_y_then_x() {
        let graph = WorkflowGraph {
            nodes: vec![
                node("low", "wait", 0.0, 300.0, json!({})),
                node("right", "wait", 200.0, 100.0, json!({})),
                node("left", "wait", 0.0, 100.0, json!({})),
                node("tie_first", "wait", 50.0, 200.0, json!({})),
                node("tie_second", "wait", 50.0, 200.0, json!({})),
            ],
            edges: vec![],
        };

        let ids: Vec<String> = graph_to_steps(&graph).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["left", "right", "tie_first", "tie_second", "low"]);
    }

    #[test]
    fn test_type_mismatch_delay_defaults_to_zero() {
        let graph = WorkflowGraph {
            nodes: vec![node("w", "wait", 0.0, 0.0, json!({"label": "Wait", "delay": "not-a-number"}))],
            edges: vec![],
        };

        let steps = graph_to_steps(&graph);
        assert_eq!(steps[0].delay, 0);
        assert_eq!(steps[0].description, "Wait");
        assert_eq!(steps[0].action, "wait");
    }

    #[test]
    fn test_type_mismatch_optional_fields_omitted() {
        let graph = WorkflowGraph {
            nodes: vec![node(
                "s",
                "swipe_with_spectre",
                0.0,
                0.0,
                json!({"description": "x", "swipeCount": "many", "critical": "yes", "timeout": 1.5, "parallel": true}),
            )],
            edges: vec![],
        };

        let step = &graph_to_steps(&graph)[0];
        assert_eq!(step.swipe_count, None);
        assert_eq!(step.critical, None);
        assert_eq!(step.timeout, None);
        assert_eq!(step.parallel, Some(true));
    }

    #[test]
    fn test_missing_description_and_label() {
        let graph = WorkflowGraph {
            nodes: vec![node("w", "wait", 0.0, 0.0, json!({}))],
            edges: vec![],
        };
        assert_eq!(graph_to_steps(&graph)[0].description, "");
    }

    #[test]
    fn test_goto_target_from_loop_edge() {
        let graph = WorkflowGraph {
            nodes: vec![node("a", "wait", 0.0, 0.0, json!({})), node("g", "goto", 0.0, 100.0, json!({"nextStep": "stale"}))],
            edges: vec![WorkflowEdge::looping("g", "a")],
        };

        assert_eq!(graph_to_steps(&graph)[1].next_step.as_deref(), Some("a"));
    }

    #[test]
    fn test_goto_target_from_data() {
        let graph = WorkflowGraph {
            nodes: vec![node("g", "goto", 0.0, 0.0, json!({"nextStep": "missing"}))],
            edges: vec![],
        };

        assert_eq!(graph_to_steps(&graph)[0].next_step.as_deref(), Some("missing"));
    }

    #[test]
    fn test_next_step_ignored_on_non_goto() {
        let graph = WorkflowGraph {
            nodes: vec![node("w", "wait", 0.0, 0.0, json!({"nextStep": "a"}))],
            edges: vec![],
        };

        assert_eq!(graph_to_steps(&graph)[0].next_step, None);
    }

    #[test]
    fn test_dangling_goto_round_trip() {
        let mut x = WorkflowStep::new("x", "goto");
        x.next_step = Some("missing".to_string());

        let graph = steps_to_graph(std::slice::from_ref(&x), &ConvertOptions::default());
        assert_eq!(graph_to_steps(&graph), vec![x]);
    }

    #[test]
    fn test_saved_positions_reorder_steps() {
        let steps = vec![WorkflowStep::new("a", "wait"), WorkflowStep::new("b", "wait")];
        let mut saved = PositionMap::new();
        saved.insert("b".to_string(), Position::new(0.0, 0.0));
        let options = ConvertOptions {
            saved_positions: Some(saved),
            ..Default::default()
        };

        let ids: Vec<String> = graph_to_steps(&steps_to_graph(&steps, &options)).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
