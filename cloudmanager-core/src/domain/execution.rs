//! Pipeline execution domain types

use serde::{Deserialize, Serialize};

use super::step::StepState;

/// One run of a pipeline
///
/// Step states are kept in the order the API declares them, which is phase
/// order followed by step order within each phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineExecution {
    pub id: String,
    pub program_id: String,
    pub pipeline_id: String,
    #[serde(default)]
    pub status: ExecutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    #[serde(rename = "_embedded", default)]
    pub embedded: ExecutionEmbedded,
}

/// Embedded resources of an execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionEmbedded {
    #[serde(default)]
    pub step_states: Vec<StepState>,
}

/// A phase of an execution and its steps, borrowed from the execution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phase<'a> {
    pub id: &'a str,
    pub steps: &'a [StepState],
}

impl PipelineExecution {
    /// All step states in declared order
    pub fn steps(&self) -> &[StepState] {
        &self.embedded.step_states
    }

    /// Group the step states into phases, preserving declared order
    ///
    /// Consecutive steps sharing a `phase_id` form one phase.
    pub fn phases(&self) -> Vec<Phase<'_>> {
        let steps = self.steps();
        let mut phases = Vec::new();
        let mut start = 0;

        for i in 1..=steps.len() {
            if i == steps.len() || steps[i].phase_id != steps[start].phase_id {
                phases.push(Phase {
                    id: &steps[start].phase_id,
                    steps: &steps[start..i],
                });
                start = i;
            }
        }

        phases
    }
}

/// Execution status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    NotStarted,
    Running,
    Cancelling,
    Cancelled,
    Finished,
    Error,
    Failed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionStatus::NotStarted => write!(f, "Not started"),
            ExecutionStatus::Running => write!(f, "Running"),
            ExecutionStatus::Cancelling => write!(f, "Cancelling"),
            ExecutionStatus::Cancelled => write!(f, "Cancelled"),
            ExecutionStatus::Finished => write!(f, "Finished"),
            ExecutionStatus::Error => write!(f, "Error"),
            ExecutionStatus::Failed => write!(f, "Failed"),
            ExecutionStatus::Unknown => write!(f, "Unknown"),
        }
    }
}
