//! Step resolution and action dispatch
//!
//! Pure functions over an execution snapshot. They decide which step is
//! actionable and which link (and body) an action must be sent to; the
//! client performs the actual request.

use serde_json::{Value, json};

use crate::domain::execution::PipelineExecution;
use crate::domain::step::{StepState, StepStatus};
use crate::error::ResolveError;

const ACTION_APPROVAL: &str = "approval";
const ACTION_CODE_QUALITY: &str = "codeQuality";
const ACTION_DEPLOY: &str = "deploy";

/// Which endpoint of a step an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Cancel,
    Advance,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Cancel => write!(f, "cancel"),
            ActionKind::Advance => write!(f, "advance"),
        }
    }
}

/// A resolved action: PUT `body` to `href`
#[derive(Debug, Clone, PartialEq)]
pub struct StepAction {
    pub kind: ActionKind,
    pub href: String,
    pub body: Value,
}

/// Find the current step: the first running or waiting step in phase order
pub fn current_step(execution: &PipelineExecution) -> Result<&StepState, ResolveError> {
    execution
        .steps()
        .iter()
        .find(|step| step.is_current())
        .ok_or_else(|| ResolveError::NoCurrentStep {
            pipeline_id: execution.pipeline_id.clone(),
        })
}

/// Find the first step waiting for a manual advance
pub fn waiting_step(execution: &PipelineExecution) -> Result<&StepState, ResolveError> {
    execution
        .steps()
        .iter()
        .find(|step| step.is_waiting())
        .ok_or_else(|| ResolveError::NoWaitingStep {
            pipeline_id: execution.pipeline_id.clone(),
        })
}

/// Find the step state for an action (`build`, `codeQuality`, ...)
pub fn step_state<'a>(
    execution: &'a PipelineExecution,
    action: &str,
) -> Result<&'a StepState, ResolveError> {
    execution
        .steps()
        .iter()
        .find(|step| step.action == action)
        .ok_or_else(|| ResolveError::StepNotFound {
            action: action.to_string(),
            execution_id: execution.id.clone(),
        })
}

/// Resolve how to cancel a step
///
/// A deploy step waiting for its go-ahead is cancelled by sending a negative
/// resume to its advance link; every other step uses its cancel link.
pub fn cancel_action(step: &StepState) -> Result<StepAction, ResolveError> {
    let missing = || ResolveError::NoCancelLink {
        action: step.action.clone(),
    };

    if step.action == ACTION_DEPLOY && step.status == StepStatus::Waiting {
        let link = step.links.advance().ok_or_else(missing)?;
        return Ok(StepAction {
            kind: ActionKind::Advance,
            href: link.href.clone(),
            body: json!({ "resume": false }),
        });
    }

    let link = step.links.cancel().ok_or_else(missing)?;
    let body = if step.action == ACTION_APPROVAL {
        json!({ "approved": false })
    } else {
        json!({ "cancel": true })
    };

    Ok(StepAction {
        kind: ActionKind::Cancel,
        href: link.href.clone(),
        body,
    })
}

/// Resolve how to advance a waiting step
pub fn advance_action(step: &StepState) -> Result<StepAction, ResolveError> {
    let link = step
        .links
        .advance()
        .ok_or_else(|| ResolveError::NoAdvanceLink {
            action: step.action.clone(),
        })?;

    let body = match step.action.as_str() {
        ACTION_APPROVAL => json!({ "approved": true }),
        ACTION_CODE_QUALITY => json!({ "override": true }),
        ACTION_DEPLOY => json!({ "resume": true }),
        _ => json!({}),
    };

    Ok(StepAction {
        kind: ActionKind::Advance,
        href: link.href.clone(),
        body,
    })
}

/// The href of a step's logs link
pub fn logs_link(step: &StepState) -> Result<&str, ResolveError> {
    step.links
        .logs()
        .map(|link| link.href.as_str())
        .ok_or_else(|| ResolveError::NoLogsLink {
            action: step.action.clone(),
        })
}
