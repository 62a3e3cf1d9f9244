//! Execution DTOs

use serde::{Deserialize, Serialize};

use crate::domain::execution::PipelineExecution;

/// Response body of the execution list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionList {
    #[serde(rename = "_embedded", default)]
    pub embedded: ExecutionListEmbedded,
    #[serde(
        rename = "_totalNumberOfItems",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_number_of_items: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionListEmbedded {
    #[serde(default)]
    pub executions: Vec<PipelineExecution>,
}

impl From<ExecutionList> for Vec<PipelineExecution> {
    fn from(list: ExecutionList) -> Self {
        list.embedded.executions
    }
}
