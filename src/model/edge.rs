//! Graph edges connecting editor nodes.
//!
//! Plain edges express sequential order. Loop edges express a backward
//! `goto` jump and are recognised by their `loop` source handle or type.

use serde::{Deserialize, Serialize};

use crate::{common::Vars, model::NodeId};

/// Source handle and edge type marking a loop edge.
pub const LOOP_HANDLE: &str = "loop";

/// A directed edge of the visual editor graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vars>,
}

impl WorkflowEdge {
    /// Plain sequential edge with a deterministic id.
    pub fn sequential(
        source: &str,
        target: &str,
    ) -> Self {
        Self {
            id: format!("e-{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            ..Default::default()
        }
    }

    /// Animated loop edge representing a `goto` jump.
    pub fn looping(
        source: &str,
        target: &str,
    ) -> Self {
        Self {
            id: format!("loop-{}-{}", source, target),
            source: source.to_string(),
            target: target.to_string(),
            source_handle: Some(LOOP_HANDLE.to_string()),
            edge_type: Some(LOOP_HANDLE.to_string()),
            animated: true,
            data: None,
        }
    }

    pub fn is_loop(&self) -> bool {
        self.source_handle.as_deref() == Some(LOOP_HANDLE) || self.edge_type.as_deref() == Some(LOOP_HANDLE)
    }

    pub fn touches(
        &self,
        node_id: &str,
    ) -> bool {
        self.source == node_id || self.target == node_id
    }
}
