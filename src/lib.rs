//! # Stepflow
//!
//! Stepflow converts dating-app automation workflows between the linear step
//! list the backend stores and the node/edge graph a visual editor renders.
//!
//! ## Core Features
//!
//! - **Lossless Conversion**: `steps_to_graph` and `graph_to_steps` round-trip any step list with unique ids
//! - **Node Type Registry**: Labels, colors and seed values for every supported action
//! - **Editing Sessions**: Add, update, delete and connect nodes, then save through the backend API
//! - **Position Persistence**: Debounced per-workflow layout storage, in memory or on disk
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepflow::{Config, ConvertOptions, WorkflowDefinition, graph_to_steps, steps_to_graph};
//!
//! let config = Config::load("stepflow.toml")?;
//! let workflow = WorkflowDefinition::from_json(json_str)?;
//!
//! let graph = steps_to_graph(&workflow.steps, &ConvertOptions::from_config(&config));
//! assert_eq!(graph_to_steps(&graph), workflow.steps);
//! ```

mod api;
mod common;
mod config;
mod convert;
mod editor;
mod error;
mod model;
mod registry;
mod store;
mod utils;

pub use api::{ExecutionCommand, HttpApiClient, WorkflowApi};
pub use common::Vars;
pub use config::{ApiConfig, Config, LayoutConfig, PositionsConfig, StoreType};
pub use convert::{ConvertOptions, PositionMap, START_NODE_ID, graph_to_steps, layout::grid_position, steps_to_graph};
pub use editor::{ConnectionPolicy, Editor, graph_dot, steps_json};
pub use error::StepflowError;
pub use model::*;
pub use registry::{ActionType, NodeTypeConfig, NodeTypeRegistry, lookup, registry};
pub use store::{FilePositionStore, MemPositionStore, PositionPersister, PositionStore, storage_key};

/// Result type alias for Stepflow operations.
pub type Result<T> = std::result::Result<T, StepflowError>;
