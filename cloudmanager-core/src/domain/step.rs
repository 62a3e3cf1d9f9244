//! Step state domain types

use serde::{Deserialize, Serialize};

use super::link::StepLinks;

/// State of a single step within a pipeline execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepState {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_id: Option<String>,
    #[serde(default)]
    pub phase_id: String,
    /// Action type of the step (`build`, `codeQuality`, `approval`, `deploy`, ...)
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_type: Option<String>,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    #[serde(rename = "_links", default)]
    pub links: StepLinks,
}

impl StepState {
    /// Whether this step can be acted on right now
    pub fn is_current(&self) -> bool {
        matches!(self.status, StepStatus::Running | StepStatus::Waiting)
    }

    /// Whether this step is paused pending a manual advance
    pub fn is_waiting(&self) -> bool {
        self.status == StepStatus::Waiting
    }
}

/// Step execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    NotStarted,
    Running,
    Cancelling,
    Cancelled,
    Finished,
    Error,
    Failed,
    Waiting,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::NotStarted => write!(f, "NOT_STARTED"),
            StepStatus::Running => write!(f, "RUNNING"),
            StepStatus::Cancelling => write!(f, "CANCELLING"),
            StepStatus::Cancelled => write!(f, "CANCELLED"),
            StepStatus::Finished => write!(f, "FINISHED"),
            StepStatus::Error => write!(f, "ERROR"),
            StepStatus::Failed => write!(f, "FAILED"),
            StepStatus::Waiting => write!(f, "WAITING"),
            StepStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
