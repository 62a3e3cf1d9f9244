//! Error types for the Cloud Manager client

use cloudmanager_core::ResolveError;
use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Cloud Manager client
///
/// Every variant renders a fixed message template naming the resource
/// involved, so the message alone identifies what failed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request could not be sent or its body could not be read
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-success status code
    #[error("Cannot {operation}: {url} ({status})")]
    ApiError {
        /// What the client was trying to do (e.g. "get execution")
        operation: &'static str,
        /// URL that was requested
        url: String,
        /// HTTP status code
        status: StatusCode,
    },

    /// The program has no pipeline with the given id
    #[error("Pipeline {pipeline_id} does not exist in program {program_id}.")]
    PipelineNotFound {
        program_id: String,
        pipeline_id: String,
    },

    /// Starting an execution was refused because one is already running
    #[error("Cannot create execution. Pipeline already running.")]
    PipelineRunning,

    /// The execution snapshot lacks the step or link an operation needs
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The logs endpoint answered without a redirect URL
    #[error("Log {url} did not contain a redirect. Was null.")]
    MissingRedirect { url: String },

    /// A link or base URL could not be turned into a request URL
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Writing log output to the caller's sink failed
    #[error("Failed to write log output: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create an API error from the attempted operation, URL and status code
    pub fn api_error(operation: &'static str, url: impl Into<String>, status: StatusCode) -> Self {
        Self::ApiError {
            operation,
            url: url.into(),
            status,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PipelineNotFound { .. })
            || matches!(self, Self::ApiError { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if status.is_client_error())
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if status.is_server_error())
    }
}
