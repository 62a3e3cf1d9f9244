//! Errors raised while resolving steps and links of an execution

use thiserror::Error;

/// Structural problems found in an execution snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Cannot find a current step for pipeline {pipeline_id}.")]
    NoCurrentStep { pipeline_id: String },

    #[error("Cannot find a waiting step for pipeline {pipeline_id}.")]
    NoWaitingStep { pipeline_id: String },

    #[error("Cannot find step state for action {action} on execution {execution_id}.")]
    StepNotFound {
        action: String,
        execution_id: String,
    },

    #[error("Cannot find a cancel link for the current step ({action}). Step may not be cancellable.")]
    NoCancelLink { action: String },

    #[error("Cannot find an advance link for the current step ({action}).")]
    NoAdvanceLink { action: String },

    #[error("Could not find logs link for action {action}.")]
    NoLogsLink { action: String },
}
