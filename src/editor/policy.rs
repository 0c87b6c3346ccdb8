//! Connection rules applied to interactively drawn edges.
//!
//! The converter accepts any edge. These rules only guard the editor's
//! `try_connect` path.

use std::cmp::Ordering;

use petgraph::algo::is_cyclic_directed;
use tracing::debug;

use crate::{
    Result, StepflowError,
    convert::layout::layout_order,
    model::{WorkflowEdge, WorkflowGraph},
    registry::registry,
};

#[derive(Debug, Clone)]
pub struct ConnectionPolicy {
    /// allow an edge from a node to itself
    pub allow_self_loops: bool,
    /// at most one outgoing edge per source handle
    pub single_edge_per_handle: bool,
    /// loop edges may only leave `goto` nodes
    pub loop_edges_from_goto_only: bool,
    /// loop edges must point at a node earlier in layout order
    pub loop_edges_backward_only: bool,
    /// plain edges must not close a cycle
    pub plain_edges_acyclic: bool,
}

impl Default for ConnectionPolicy {
    fn default() -> Self {
        Self {
            allow_self_loops: false,
            single_edge_per_handle: true,
            loop_edges_from_goto_only: true,
            loop_edges_backward_only: true,
            plain_edges_acyclic: true,
        }
    }
}

impl ConnectionPolicy {
    /// Check whether `edge` may be added to `graph`.
    pub fn check(
        &self,
        graph: &WorkflowGraph,
        edge: &WorkflowEdge,
    ) -> Result<()> {
        let result = self.evaluate(graph, edge);
        if let Err(e) = &result {
            debug!(source = %edge.source, target = %edge.target, reason = %e, "connection rejected");
        }
        result
    }

    fn evaluate(
        &self,
        graph: &WorkflowGraph,
        edge: &WorkflowEdge,
    ) -> Result<()> {
        let source = graph.node(&edge.source).ok_or_else(|| StepflowError::Edge(format!("source node {} not found", edge.source)))?;
        let target = graph.node(&edge.target).ok_or_else(|| StepflowError::Edge(format!("target node {} not found", edge.target)))?;

        if !self.allow_self_loops && edge.source == edge.target {
            return Err(StepflowError::Edge(format!("node {} cannot connect to itself", edge.source)));
        }

        if self.single_edge_per_handle && graph.edges_from(&edge.source).any(|e| e.source_handle == edge.source_handle) {
            return Err(StepflowError::Edge(format!(
                "node {} already has an edge on handle {}",
                edge.source,
                edge.source_handle.as_deref().unwrap_or("default")
            )));
        }

        if edge.is_loop() {
            if self.loop_edges_from_goto_only && registry().action_for_node_type(&source.node_type) != "goto" {
                return Err(StepflowError::Edge(format!("loop edge {} -> {} must start at a goto node", edge.source, edge.target)));
            }
            if self.loop_edges_backward_only && layout_order(&target.position, &source.position) != Ordering::Less {
                return Err(StepflowError::Edge(format!("loop edge {} -> {} must point to an earlier node", edge.source, edge.target)));
            }
        } else if self.plain_edges_acyclic && closes_plain_cycle(graph, edge) {
            return Err(StepflowError::Edge(format!("edge {} -> {} would create a cycle", edge.source, edge.target)));
        }

        Ok(())
    }
}

fn closes_plain_cycle(
    graph: &WorkflowGraph,
    edge: &WorkflowEdge,
) -> bool {
    let (mut digraph, indices) = graph.to_digraph(|_| (), |e| (!e.is_loop()).then_some(()));
    if let (Some(from), Some(to)) = (indices.get(edge.source.as_str()), indices.get(edge.target.as_str())) {
        digraph.add_edge(*from, *to, ());
    }
    is_cyclic_directed(&digraph)
}

#[cfg(test)]
mod tests {
    use super::ConnectionPolicy;
    use crate::{
        convert::{ConvertOptions, steps_to_graph},
        model::{WorkflowEdge, WorkflowStep},
    };

    fn graph() -> crate::model::WorkflowGraph {
        let steps = vec![WorkflowStep::new("a", "wait"), WorkflowStep::new("b", "wait"), WorkflowStep::new("c", "goto")];
        let mut graph = steps_to_graph(&steps, &ConvertOptions::default());
        graph.edges.retain(|e| e.source != "c");
        graph
    }

    #[test]
    fn test_rejects_self_loop() {
        let policy = ConnectionPolicy::default();
        assert!(policy.check(&graph(), &WorkflowEdge::looping("c", "c")).is_err());
    }

    #[test]
    fn test_rejects_second_edge_on_handle() {
        let policy = ConnectionPolicy::default();
        assert!(policy.check(&graph(), &WorkflowEdge::sequential("a", "c")).is_err());
    }

    #[test]
    fn test_loop_edge_direction() {
        let policy = ConnectionPolicy::default();
        assert!(policy.check(&graph(), &WorkflowEdge::looping("c", "a")).is_ok());

        let mut g = graph();
        g.edges.clear();
        assert!(policy.check(&g, &WorkflowEdge::looping("a", "c")).is_err());
    }

    #[test]
    fn test_loop_edge_needs_goto_source() {
        let policy = ConnectionPolicy::default();
        assert!(policy.check(&graph(), &WorkflowEdge::looping("b", "a")).is_err());

        let relaxed = ConnectionPolicy {
            loop_edges_from_goto_only: false,
            ..Default::default()
        };
        let mut g = graph();
        g.edges.clear();
        assert!(relaxed.check(&g, &WorkflowEdge::looping("b", "a")).is_ok());
    }

    #[test]
    fn test_rejects_plain_cycle() {
        let policy = ConnectionPolicy::default();
        let mut g = graph();
        g.add_edge(WorkflowEdge::sequential("b", "c"));

        assert!(policy.check(&g, &WorkflowEdge::sequential("c", "a")).is_err());
    }

    #[test]
    fn test_relaxed_policy_accepts_anything() {
        let policy = ConnectionPolicy {
            allow_self_loops: true,
            single_edge_per_handle: false,
            loop_edges_from_goto_only: false,
            loop_edges_backward_only: false,
            plain_edges_acyclic: false,
        };
        assert!(policy.check(&graph(), &WorkflowEdge::sequential("c", "a")).is_ok());
        assert!(policy.check(&graph(), &WorkflowEdge::sequential("a", "a")).is_ok());
        assert!(policy.check(&graph(), &WorkflowEdge::looping("a", "b")).is_ok());
    }

    #[test]
    fn test_rejects_unknown_nodes() {
        let policy = ConnectionPolicy::default();
        assert!(policy.check(&graph(), &WorkflowEdge::sequential("c", "ghost")).is_err());
    }
}
