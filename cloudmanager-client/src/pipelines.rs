//! Pipeline-related API endpoints

use cloudmanager_core::domain::execution::PipelineExecution;
use cloudmanager_core::domain::pipeline::Pipeline;
use cloudmanager_core::dto::pipeline::PipelineList;
use reqwest::{Method, StatusCode};
use tracing::info;

use crate::CloudManagerClient;
use crate::error::{ClientError, Result};

impl CloudManagerClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// List all pipelines of a program
    ///
    /// # Arguments
    /// * `program_id` - The program id
    pub async fn list_pipelines(&self, program_id: &str) -> Result<Vec<Pipeline>> {
        let url = format!("{}/api/program/{}/pipelines", self.base_url, program_id);
        let response = self.request(Method::GET, &url).await?.send().await?;

        let list: PipelineList = self
            .handle_response(response, "retrieve pipelines", &url)
            .await?;
        Ok(list.into())
    }

    /// List the pipelines of a program that satisfy a predicate
    ///
    /// # Example
    /// ```no_run
    /// # use cloudmanager_client::CloudManagerClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = CloudManagerClient::new("https://cloudmanager.adobe.io");
    /// let busy = client
    ///     .list_pipelines_matching("4", |p| p.name.starts_with("prod"))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_pipelines_matching<F>(
        &self,
        program_id: &str,
        predicate: F,
    ) -> Result<Vec<Pipeline>>
    where
        F: Fn(&Pipeline) -> bool,
    {
        let pipelines = self.list_pipelines(program_id).await?;
        Ok(pipelines.into_iter().filter(|p| predicate(p)).collect())
    }

    /// Get a pipeline by id
    ///
    /// # Errors
    /// [`ClientError::PipelineNotFound`] if the program has no such pipeline.
    pub async fn get_pipeline(&self, program_id: &str, pipeline_id: &str) -> Result<Pipeline> {
        self.list_pipelines(program_id)
            .await?
            .into_iter()
            .find(|p| p.id == pipeline_id)
            .ok_or_else(|| ClientError::PipelineNotFound {
                program_id: program_id.to_string(),
                pipeline_id: pipeline_id.to_string(),
            })
    }

    /// Start a new execution of a pipeline
    ///
    /// # Returns
    /// The newly created execution
    ///
    /// # Errors
    /// [`ClientError::PipelineRunning`] if the pipeline already has an execution in progress.
    pub async fn start_execution(&self, pipeline: &Pipeline) -> Result<PipelineExecution> {
        let url = self.execution_url(pipeline, None);
        let response = self.request(Method::PUT, &url).await?.send().await?;

        if response.status() == StatusCode::PRECONDITION_FAILED {
            return Err(ClientError::PipelineRunning);
        }

        let execution: PipelineExecution = self
            .handle_response(response, "start execution", &url)
            .await?;
        info!(
            "Started execution {} of pipeline {} in program {}",
            execution.id, pipeline.id, pipeline.program_id
        );
        Ok(execution)
    }

    /// Start a new execution of a pipeline identified by program and pipeline id
    pub async fn start_execution_by_id(
        &self,
        program_id: &str,
        pipeline_id: &str,
    ) -> Result<PipelineExecution> {
        let pipeline = self.get_pipeline(program_id, pipeline_id).await?;
        self.start_execution(&pipeline).await
    }

    /// URL of a pipeline's current execution, or of a specific one
    pub(crate) fn execution_url(&self, pipeline: &Pipeline, execution_id: Option<&str>) -> String {
        let current = format!(
            "{}/api/program/{}/pipeline/{}/execution",
            self.base_url, pipeline.program_id, pipeline.id
        );
        match execution_id {
            Some(id) => format!("{}/{}", current, id),
            None => current,
        }
    }
}
