//! In-memory graph representation used by the visual editor.
//!
//! `WorkflowGraph` is a plain node/edge list mirroring what the canvas
//! library consumes. For structural questions (cycles, DOT export) it can
//! be projected into a petgraph `DiGraph`.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::model::{WorkflowEdge, WorkflowNode};

/// Nodes and edges of the editor canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    pub nodes: Vec<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// get node by id
    pub fn node(
        &self,
        id: &str,
    ) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// get mutable node by id
    pub fn node_mut(
        &mut self,
        id: &str,
    ) -> Option<&mut WorkflowNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(
        &self,
        id: &str,
    ) -> bool {
        self.node(id).is_some()
    }

    /// Position of a node in insertion order.
    pub fn index_of(
        &self,
        id: &str,
    ) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// Remove a node and every edge that starts or ends at it.
    pub fn remove_node(
        &mut self,
        id: &str,
    ) -> Option<WorkflowNode> {
        let idx = self.index_of(id)?;
        let node = self.nodes.remove(idx);
        self.edges.retain(|e| !e.touches(id));
        Some(node)
    }

    pub fn add_edge(
        &mut self,
        edge: WorkflowEdge,
    ) {
        self.edges.push(edge);
    }

    /// Outgoing edges of a node.
    pub fn edges_from<'a>(
        &'a self,
        id: &str,
    ) -> impl Iterator<Item = &'a WorkflowEdge> {
        self.edges.iter().filter(move |e| e.source == id)
    }

    /// Target of the first loop edge leaving `id`.
    pub fn loop_target(
        &self,
        id: &str,
    ) -> Option<&str> {
        self.edges_from(id).find(|e| e.is_loop()).map(|e| e.target.as_str())
    }

    /// Project the graph into a petgraph `DiGraph` keyed by node id.
    ///
    /// Edges whose endpoints are not in the node list are skipped.
    pub fn to_digraph<N, E>(
        &self,
        node_weight: impl Fn(&WorkflowNode) -> N,
        edge_weight: impl Fn(&WorkflowEdge) -> Option<E>,
    ) -> (DiGraph<N, E>, HashMap<&str, NodeIndex>) {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut indices = HashMap::with_capacity(self.nodes.len());

        for node in &self.nodes {
            let idx = graph.add_node(node_weight(node));
            indices.insert(node.id.as_str(), idx);
        }
        for edge in &self.edges {
            let (Some(from), Some(to)) = (indices.get(edge.source.as_str()), indices.get(edge.target.as_str())) else {
                continue;
            };
            if let Some(weight) = edge_weight(edge) {
                graph.add_edge(*from, *to, weight);
            }
        }

        (graph, indices)
    }

    /// Output a human-readable representation of the graph
    pub fn schema(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Workflow Graph ===".to_string());
        lines.push(format!("Nodes: {}, Edges: {}", self.nodes.len(), self.edges.len()));
        lines.push(String::new());

        lines.push("--- Nodes ---".to_string());
        for node in &self.nodes {
            lines.push(format!("[{}] {} (type: {}, at: {}, {})", node.id, node.label(), node.node_type, node.position.x, node.position.y));
        }
        lines.push(String::new());

        lines.push("--- Edges ---".to_string());
        for node in &self.nodes {
            let outgoing: Vec<String> = self
                .edges_from(&node.id)
                .map(|e| {
                    if e.is_loop() {
                        format!("{}(loop)", e.target)
                    } else {
                        e.target.clone()
                    }
                })
                .collect();

            if outgoing.is_empty() {
                lines.push(format!("{} -> (end)", node.id));
            } else {
                lines.push(format!("{} -> {}", node.id, outgoing.join(", ")));
            }
        }

        lines.join("\n")
    }
}
