use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Result, StepflowError, model::WorkflowStep};

/// A workflow as stored by the backend.
///
/// `workflow_type` is the unique slug the backend looks workflows up by;
/// the editor never changes it after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub workflow_type: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl WorkflowDefinition {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str::<WorkflowDefinition>(s).map_err(|e| StepflowError::Workflow(format!("{}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the slug, step id uniqueness and every step's own rules.
    pub fn validate(&self) -> Result<()> {
        if self.workflow_type.trim().is_empty() {
            return Err(StepflowError::Workflow("workflow type must not be empty".to_string()));
        }

        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(step.id.as_str()) {
                return Err(StepflowError::Workflow(format!("duplicate step id: {}", step.id)));
            }
            step.validate()?;
        }

        Ok(())
    }
}
