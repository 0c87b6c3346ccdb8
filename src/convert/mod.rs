//! Two-way conversion between the step list and the editor graph.
//!
//! Both directions are pure functions: they never mutate their input and
//! identical input always produces identical output. For any step list with
//! unique ids, `graph_to_steps(&steps_to_graph(&steps, opts))` returns the
//! original steps as long as the graph has not been edited in between.

pub mod layout;
mod to_graph;
mod to_steps;

use crate::{Config, LayoutConfig};

pub use layout::PositionMap;
pub use to_graph::steps_to_graph;
pub use to_steps::graph_to_steps;

/// Id of the synthetic start anchor node.
pub const START_NODE_ID: &str = "__start__";

/// Options for [`steps_to_graph`].
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// grid used when no saved position exists
    pub layout: LayoutConfig,
    /// positions from a previous editing session
    pub saved_positions: Option<PositionMap>,
    /// prepend a `start` anchor node wired to the first step
    pub with_start_anchor: bool,
}

impl ConvertOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            layout: config.layout.clone(),
            ..Default::default()
        }
    }

    pub fn saved_positions(
        mut self,
        positions: Option<PositionMap>,
    ) -> Self {
        self.saved_positions = positions;
        self
    }

    pub fn with_start_anchor(
        mut self,
        anchor: bool,
    ) -> Self {
        self.with_start_anchor = anchor;
        self
    }
}
