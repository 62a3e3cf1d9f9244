//! Step state lookup and log download

use cloudmanager_core::domain::execution::PipelineExecution;
use cloudmanager_core::domain::step::StepState;
use cloudmanager_core::dto::log::LogRedirect;
use cloudmanager_core::resolve;
use reqwest::Method;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::CloudManagerClient;
use crate::error::{ClientError, Result};

impl CloudManagerClient {
    // =============================================================================
    // Step States
    // =============================================================================

    /// Find the step state for an action within an execution
    ///
    /// # Arguments
    /// * `execution` - The execution to search
    /// * `action` - The step action (e.g. "build", "codeQuality")
    pub fn get_execution_step_state<'a>(
        &self,
        execution: &'a PipelineExecution,
        action: &str,
    ) -> Result<&'a StepState> {
        Ok(resolve::step_state(execution, action)?)
    }

    // =============================================================================
    // Step Logs
    // =============================================================================

    /// Stream the log of an execution step into `sink`
    ///
    /// # Arguments
    /// * `program_id` - The program id
    /// * `pipeline_id` - The pipeline id
    /// * `execution_id` - The execution id
    /// * `action` - The step action whose log to fetch
    /// * `file` - Alternate log file name for steps producing several logs
    /// * `sink` - Where the raw log bytes are written
    ///
    /// # Example
    /// ```no_run
    /// # use cloudmanager_client::CloudManagerClient;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = CloudManagerClient::new("https://cloudmanager.adobe.io");
    /// let mut out = tokio::io::stdout();
    /// client.get_execution_step_log("4", "3", "1", "build", None, &mut out).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_execution_step_log<W>(
        &self,
        program_id: &str,
        pipeline_id: &str,
        execution_id: &str,
        action: &str,
        file: Option<&str>,
        sink: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let execution = self.get_execution(program_id, pipeline_id, execution_id).await?;
        let step = self.get_execution_step_state(&execution, action)?;
        self.get_step_log(step, file, sink).await
    }

    /// Stream the log of a step state into `sink`
    ///
    /// The logs link answers with a JSON redirect; the redirect target is
    /// fetched once and its body copied verbatim.
    pub async fn get_step_log<W>(
        &self,
        step: &StepState,
        file: Option<&str>,
        sink: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut url = self.resolve_href(resolve::logs_link(step)?)?;
        if let Some(file) = file {
            url.query_pairs_mut().append_pair("file", file);
        }

        let response = self
            .request(Method::GET, url.as_str())
            .await?
            .send()
            .await?;
        let body: LogRedirect = self
            .handle_response(response, "get logs", url.as_str())
            .await?;

        let redirect = body.redirect.ok_or_else(|| ClientError::MissingRedirect {
            url: url.to_string(),
        })?;

        // The redirect target is pre-signed; API credentials are not sent to it.
        debug!("GET {}", redirect);
        let mut response = self.client.get(&redirect).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::api_error("download logs", redirect, status));
        }

        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await? {
            sink.write_all(&chunk).await?;
            written += chunk.len();
        }
        sink.flush().await?;

        debug!("Wrote {} bytes of {} log", written, step.action);
        Ok(())
    }
}
