//! Execution-related API endpoints

use cloudmanager_core::domain::execution::PipelineExecution;
use cloudmanager_core::dto::execution::ExecutionList;
use cloudmanager_core::resolve::{self, StepAction};
use reqwest::Method;
use tracing::{debug, info};

use crate::CloudManagerClient;
use crate::error::Result;

impl CloudManagerClient {
    // =============================================================================
    // Execution Lookup
    // =============================================================================

    /// Get the current execution of a pipeline
    ///
    /// # Arguments
    /// * `program_id` - The program id
    /// * `pipeline_id` - The pipeline id
    ///
    /// # Errors
    /// Fails if the pipeline does not exist or has no current execution.
    pub async fn get_current_execution(
        &self,
        program_id: &str,
        pipeline_id: &str,
    ) -> Result<PipelineExecution> {
        let pipeline = self.get_pipeline(program_id, pipeline_id).await?;
        let url = self.execution_url(&pipeline, None);
        self.fetch_execution(&url).await
    }

    /// Get a specific execution of a pipeline
    ///
    /// # Arguments
    /// * `program_id` - The program id
    /// * `pipeline_id` - The pipeline id
    /// * `execution_id` - The execution id
    pub async fn get_execution(
        &self,
        program_id: &str,
        pipeline_id: &str,
        execution_id: &str,
    ) -> Result<PipelineExecution> {
        let pipeline = self.get_pipeline(program_id, pipeline_id).await?;
        let url = self.execution_url(&pipeline, Some(execution_id));
        self.fetch_execution(&url).await
    }

    /// List the executions of a pipeline, most recent first
    pub async fn list_executions(
        &self,
        program_id: &str,
        pipeline_id: &str,
    ) -> Result<Vec<PipelineExecution>> {
        let pipeline = self.get_pipeline(program_id, pipeline_id).await?;
        let url = format!(
            "{}/api/program/{}/pipeline/{}/executions",
            self.base_url, pipeline.program_id, pipeline.id
        );
        let response = self.request(Method::GET, &url).await?.send().await?;

        let list: ExecutionList = self
            .handle_response(response, "list executions", &url)
            .await?;
        Ok(list.into())
    }

    async fn fetch_execution(&self, url: &str) -> Result<PipelineExecution> {
        let response = self.request(Method::GET, url).await?.send().await?;
        self.handle_response(response, "get execution", url).await
    }

    // =============================================================================
    // Execution Control
    // =============================================================================

    /// Cancel the current execution of a pipeline
    pub async fn cancel_current_execution(&self, program_id: &str, pipeline_id: &str) -> Result<()> {
        let execution = self.get_current_execution(program_id, pipeline_id).await?;
        self.cancel(&execution).await
    }

    /// Cancel a specific execution of a pipeline
    pub async fn cancel_execution(
        &self,
        program_id: &str,
        pipeline_id: &str,
        execution_id: &str,
    ) -> Result<()> {
        let execution = self.get_execution(program_id, pipeline_id, execution_id).await?;
        self.cancel(&execution).await
    }

    /// Cancel an execution by acting on its current step
    ///
    /// # Errors
    /// Fails if no step is running or waiting, or if that step offers no
    /// way to cancel it.
    pub async fn cancel(&self, execution: &PipelineExecution) -> Result<()> {
        let step = resolve::current_step(execution)?;
        let action = resolve::cancel_action(step)?;

        info!(
            "Cancelling execution {} of pipeline {} at step {} ({})",
            execution.id, execution.pipeline_id, step.id, step.action
        );
        self.perform(action, "cancel execution").await
    }

    /// Advance the current execution of a pipeline
    pub async fn advance_current_execution(
        &self,
        program_id: &str,
        pipeline_id: &str,
    ) -> Result<()> {
        let execution = self.get_current_execution(program_id, pipeline_id).await?;
        self.advance(&execution).await
    }

    /// Advance a specific execution of a pipeline
    pub async fn advance_execution(
        &self,
        program_id: &str,
        pipeline_id: &str,
        execution_id: &str,
    ) -> Result<()> {
        let execution = self.get_execution(program_id, pipeline_id, execution_id).await?;
        self.advance(&execution).await
    }

    /// Advance an execution past its waiting step
    ///
    /// # Errors
    /// Fails if no step is waiting, or if the waiting step has no advance link.
    pub async fn advance(&self, execution: &PipelineExecution) -> Result<()> {
        let step = resolve::waiting_step(execution)?;
        let action = resolve::advance_action(step)?;

        info!(
            "Advancing execution {} of pipeline {} at step {} ({})",
            execution.id, execution.pipeline_id, step.id, step.action
        );
        self.perform(action, "advance execution").await
    }

    /// Send a resolved step action to the API
    async fn perform(&self, action: StepAction, operation: &'static str) -> Result<()> {
        let url = self.resolve_href(&action.href)?;
        debug!("Sending {} action for {}: PUT {}", action.kind, operation, url);

        let response = self
            .request(Method::PUT, url.as_str())
            .await?
            .json(&action.body)
            .send()
            .await?;

        self.handle_empty_response(response, operation, url.as_str())
            .await
    }
}
