use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{ApiConfig, Result, StepflowError, api::WorkflowApi, model::WorkflowDefinition};

/// Execution commands accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ExecutionCommand {
    Pause,
    Resume,
    Stop,
}

/// HTTP client for the admin backend.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// Build an endpoint url from escaped path segments.
    pub fn endpoint(
        &self,
        segments: &[&str],
    ) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| StepflowError::Config(format!("invalid api base url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| StepflowError::Config(format!("api base url cannot take a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// List every workflow definition.
    pub async fn list_workflows(&self) -> Result<Vec<WorkflowDefinition>> {
        let url = self.endpoint(&["workflows"])?;
        self.send(self.client.get(url)).await
    }

    pub async fn create_workflow(
        &self,
        definition: &WorkflowDefinition,
    ) -> Result<WorkflowDefinition> {
        let url = self.endpoint(&["workflows"])?;
        self.send(self.client.post(url).json(definition)).await
    }

    pub async fn delete_workflow(
        &self,
        workflow_type: &str,
    ) -> Result<()> {
        let url = self.endpoint(&["workflows", workflow_type])?;
        self.send_empty(self.client.delete(url)).await
    }

    /// Aggregated workflow statistics, shape owned by the backend.
    pub async fn stats(&self) -> Result<serde_json::Value> {
        let url = self.endpoint(&["workflows", "stats"])?;
        self.send(self.client.get(url)).await
    }

    /// Currently running executions, shape owned by the backend.
    pub async fn active_executions(&self) -> Result<Vec<serde_json::Value>> {
        let url = self.endpoint(&["executions", "active"])?;
        self.send(self.client.get(url)).await
    }

    pub async fn control_execution(
        &self,
        execution_id: &str,
        command: ExecutionCommand,
    ) -> Result<()> {
        let url = self.endpoint(&["executions", execution_id, command.as_ref()])?;
        self.send_empty(self.client.post(url)).await
    }

    pub async fn acknowledge_alert(
        &self,
        alert_id: &str,
    ) -> Result<()> {
        let url = self.endpoint(&["alerts", alert_id, "acknowledge"])?;
        self.send_empty(self.client.post(url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = Self::checked(request).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(
        &self,
        request: RequestBuilder,
    ) -> Result<()> {
        Self::checked(request).await.map(|_| ())
    }

    async fn checked(request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "api response");

        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(StepflowError::Api {
            status: status.as_u16(),
            message: if message.is_empty() { status.to_string() } else { message },
        })
    }
}

#[async_trait]
impl WorkflowApi for HttpApiClient {
    async fn get_workflow(
        &self,
        workflow_type: &str,
    ) -> Result<WorkflowDefinition> {
        let url = self.endpoint(&["workflows", workflow_type])?;
        self.send(self.client.get(url)).await
    }

    async fn update_workflow(
        &self,
        definition: &WorkflowDefinition,
    ) -> Result<WorkflowDefinition> {
        let url = self.endpoint(&["workflows", &definition.workflow_type])?;
        self.send(self.client.put(url).json(definition)).await
    }
}
