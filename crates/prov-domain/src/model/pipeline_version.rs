use crate::identity::{encode_component, qualified_name};
use serde::{Deserialize, Serialize};

/// An entity representing a version of the pipeline — an independent line
/// of evolution ("branch"). A pipeline initially has one version (id 0)
/// representing the original execution branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineVersion {
    pub id: i64,
    pub parent_pipeline_version_id: Option<i64>,
}

impl PipelineVersion {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!("PipelineVersion?id={}", encode_component(&self.id.to_string())))
    }
}
