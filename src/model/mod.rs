mod edge;
mod graph;
mod node;
mod step;
mod workflow;

pub use edge::{LOOP_HANDLE, WorkflowEdge};
pub use graph::WorkflowGraph;
pub use node::{ANCHOR_KEY, NodeId, Position, WorkflowNode};
pub use step::{MIN_INTERVAL_MS, WorkflowStep};
pub use workflow::WorkflowDefinition;
