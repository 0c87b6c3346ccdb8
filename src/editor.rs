//! Editing session for one workflow.
//!
//! An `Editor` owns the live graph of a single workflow for the duration of
//! an editing session. It applies the interactive node lifecycle (add,
//! update, delete, connect), keeps node positions flowing to the debounced
//! position store, and flattens the graph back into steps on save.
//!
//! # Example
//!
//! ```rust,ignore
//! let api = HttpApiClient::from_config(&config.api);
//! let persister = Arc::new(PositionPersister::from_current(config.position_store()?, config.positions.debounce())?);
//!
//! let mut editor = Editor::load(&api, "daily_swipe", ConvertOptions::from_config(&config), Some(persister)).await?;
//! let id = editor.add_node("wait");
//! editor.update_node(&id, Vars::new().with("delay", 10_000))?;
//! editor.save(&api).await?;
//! ```

mod export;
mod policy;

use std::sync::Arc;

use nanoid::nanoid;
use tracing::{debug, warn};

use crate::{
    LayoutConfig, Result, StepflowError,
    api::WorkflowApi,
    common::Vars,
    convert::{ConvertOptions, PositionMap, graph_to_steps, layout::grid_position, steps_to_graph},
    model::{LOOP_HANDLE, NodeId, Position, WorkflowDefinition, WorkflowEdge, WorkflowGraph, WorkflowNode, WorkflowStep},
    registry::registry,
    store::PositionPersister,
    utils,
};

pub use export::{graph_dot, steps_json};
pub use policy::ConnectionPolicy;

pub struct Editor {
    /// Definition as last loaded or saved.
    definition: WorkflowDefinition,
    /// Live graph being edited.
    graph: WorkflowGraph,
    layout: LayoutConfig,
    policy: ConnectionPolicy,
    persister: Option<Arc<PositionPersister>>,
}

impl Editor {
    /// Open a session on a definition without position persistence.
    pub fn open(
        definition: WorkflowDefinition,
        options: ConvertOptions,
    ) -> Self {
        let graph = steps_to_graph(&definition.steps, &options);
        Self {
            definition,
            graph,
            layout: options.layout,
            policy: ConnectionPolicy::default(),
            persister: None,
        }
    }

    /// Open a session using positions saved for this workflow type.
    ///
    /// Saved positions are advisory: a store failure is logged and the grid
    /// layout is used instead.
    pub fn open_with_persister(
        definition: WorkflowDefinition,
        options: ConvertOptions,
        persister: Arc<PositionPersister>,
    ) -> Self {
        let saved = match persister.store().load(&definition.workflow_type) {
            Ok(saved) => saved,
            Err(e) => {
                warn!(workflow_type = %definition.workflow_type, error = %e, "failed to load saved positions");
                None
            }
        };

        let mut editor = Self::open(definition, options.saved_positions(saved));
        editor.persister = Some(persister);
        editor
    }

    /// Fetch a definition from the backend and open a session on it.
    pub async fn load(
        api: &dyn WorkflowApi,
        workflow_type: &str,
        options: ConvertOptions,
        persister: Option<Arc<PositionPersister>>,
    ) -> Result<Self> {
        let definition = api.get_workflow(workflow_type).await?;
        debug!(workflow_type, steps = definition.steps.len(), "workflow loaded");

        Ok(match persister {
            Some(persister) => Self::open_with_persister(definition, options, persister),
            None => Self::open(definition, options),
        })
    }

    pub fn with_policy(
        mut self,
        policy: ConnectionPolicy,
    ) -> Self {
        self.policy = policy;
        self
    }

    pub fn workflow_type(&self) -> &str {
        &self.definition.workflow_type
    }

    pub fn definition(&self) -> &WorkflowDefinition {
        &self.definition
    }

    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    /// Add a node seeded from the registry and return its id.
    ///
    /// Unknown types keep their name but are seeded from the `wait` entry.
    pub fn add_node(
        &mut self,
        node_type: &str,
    ) -> NodeId {
        let config = registry().lookup(node_type);
        let id = utils::node_id(node_type, |candidate| self.graph.contains_node(candidate));

        let step_nodes = self.graph.nodes.iter().filter(|n| !n.is_anchor()).count();
        let mut data = config.default_data.clone();
        data.set("label", config.label);
        data.set("nodeType", node_type);

        self.graph.nodes.push(WorkflowNode {
            id: id.clone(),
            node_type: node_type.to_string(),
            position: grid_position(step_nodes, &self.layout),
            data,
        });
        self.persist_positions();

        id
    }

    /// Merge `partial` into a node's data, last write wins.
    pub fn update_node(
        &mut self,
        id: &str,
        partial: Vars,
    ) -> Result<()> {
        let node = self.graph.node_mut(id).ok_or_else(|| StepflowError::Node(format!("node {} not found", id)))?;
        node.data.merge(partial);
        Ok(())
    }

    /// Remove a node together with every edge touching it.
    ///
    /// A `nextStep` naming the removed node is cleared as well, otherwise the
    /// goto would fall back to it once its loop edge is gone.
    pub fn delete_node(
        &mut self,
        id: &str,
    ) -> Option<WorkflowNode> {
        let removed = self.graph.remove_node(id)?;
        for node in self.graph.nodes.iter_mut().filter(|n| n.data.get_str("nextStep") == Some(id)) {
            debug!(node_id = %node.id, target = id, "clearing goto target of deleted node");
            node.data.remove("nextStep");
        }
        self.persist_positions();
        Some(removed)
    }

    /// Add an edge as is, without any connection rule.
    pub fn connect(
        &mut self,
        edge: WorkflowEdge,
    ) {
        self.graph.add_edge(edge);
    }

    /// Draw an edge if the connection policy allows it, returning its id.
    pub fn try_connect(
        &mut self,
        source: &str,
        target: &str,
        source_handle: Option<&str>,
    ) -> Result<String> {
        let mut edge = match source_handle {
            Some(LOOP_HANDLE) => WorkflowEdge::looping(source, target),
            Some(handle) => WorkflowEdge {
                source_handle: Some(handle.to_string()),
                ..WorkflowEdge::sequential(source, target)
            },
            None => WorkflowEdge::sequential(source, target),
        };
        edge.id = format!("edge-{}", nanoid!(10));

        self.policy.check(&self.graph, &edge)?;

        let id = edge.id.clone();
        self.graph.add_edge(edge);
        Ok(id)
    }

    /// Move a node and schedule a debounced position write.
    pub fn move_node(
        &mut self,
        id: &str,
        position: Position,
    ) -> Result<()> {
        let node = self.graph.node_mut(id).ok_or_else(|| StepflowError::Node(format!("node {} not found", id)))?;
        node.position = position;
        self.persist_positions();
        Ok(())
    }

    /// Current positions of every node.
    pub fn positions(&self) -> PositionMap {
        self.graph.nodes.iter().map(|n| (n.id.clone(), n.position)).collect()
    }

    /// The graph flattened into steps.
    pub fn steps(&self) -> Vec<WorkflowStep> {
        graph_to_steps(&self.graph)
    }

    /// Validate the flattened steps and send them to the backend.
    ///
    /// On any failure the session is left exactly as it was.
    pub async fn save(
        &mut self,
        api: &dyn WorkflowApi,
    ) -> Result<()> {
        let mut next = self.definition.clone();
        next.steps = self.steps();
        next.validate()?;

        let stored = api.update_workflow(&next).await?;
        debug!(workflow_type = %stored.workflow_type, steps = stored.steps.len(), "workflow saved");
        self.definition = stored;
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        steps_json(&self.steps())
    }

    pub fn export_dot(&self) -> String {
        graph_dot(&self.graph)
    }

    fn persist_positions(&self) {
        if let Some(persister) = &self.persister {
            persister.schedule(&self.definition.workflow_type, self.positions());
        }
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        if let Some(persister) = &self.persister {
            persister.cancel(&self.definition.workflow_type);
        }
    }
}
