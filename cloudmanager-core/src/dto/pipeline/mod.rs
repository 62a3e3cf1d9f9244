//! Pipeline DTOs

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::Pipeline;

/// Response body of the pipeline list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineList {
    #[serde(rename = "_embedded", default)]
    pub embedded: PipelineListEmbedded,
    #[serde(
        rename = "_totalNumberOfItems",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_number_of_items: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineListEmbedded {
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
}

impl From<PipelineList> for Vec<Pipeline> {
    fn from(list: PipelineList) -> Self {
        list.embedded.pipelines
    }
}
