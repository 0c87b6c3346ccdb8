//! Backend REST API access.
//!
//! The backend owns execution, scheduling and persistence. This module only
//! issues single request/response calls; failures are returned to the
//! caller unchanged and nothing is retried.

mod client;

use async_trait::async_trait;

use crate::{Result, model::WorkflowDefinition};

pub use client::{ExecutionCommand, HttpApiClient};

/// The part of the backend API an editing session depends on.
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// Fetch a workflow definition by its type slug.
    async fn get_workflow(
        &self,
        workflow_type: &str,
    ) -> Result<WorkflowDefinition>;

    /// Replace a stored workflow definition, returning the stored version.
    async fn update_workflow(
        &self,
        definition: &WorkflowDefinition,
    ) -> Result<WorkflowDefinition>;
}
