use serde::{Deserialize, Serialize};

use crate::common::Vars;

/// node id, equal to the step id for converted steps
pub type NodeId = String;

/// Data flag carried only by the synthetic start anchor.
pub const ANCHOR_KEY: &str = "anchor";

/// Canvas position of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            x,
            y,
        }
    }
}

/// A node of the visual editor graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: NodeId,
    /// node type, the step action for converted steps
    #[serde(rename = "type")]
    pub node_type: String,
    pub position: Position,
    /// step fields plus `label` and `nodeType`
    #[serde(default)]
    pub data: Vars,
}

impl WorkflowNode {
    pub fn label(&self) -> &str {
        self.data.get_str("label").unwrap_or(&self.node_type)
    }

    /// Whether this is the synthetic start anchor rather than a step.
    ///
    /// Steps never serialize an `anchor` field, so a step whose id or
    /// action happens to match the anchor's is still a step.
    pub fn is_anchor(&self) -> bool {
        self.data.get_bool(ANCHOR_KEY) == Some(true)
    }
}
