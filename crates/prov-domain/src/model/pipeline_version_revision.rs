use super::{Connection, OperatorRevision};
use crate::identity::{encode_component, qualified_name};
use serde::{Deserialize, Serialize};

/// A snapshot of a pipeline version, comprising all operator revisions and
/// connections current at that point. One per pipeline change on a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineVersionRevision {
    pub uuid: String,
    pub id: i64,
    pub pipeline_version_id: i64,
    pub parent_pipeline_version_revision_uuid: Option<String>,
    pub operators: Vec<OperatorRevision>,
    pub connections: Vec<Connection>,
}

impl PipelineVersionRevision {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!(
            "PipelineVersionRevision?uuid={}",
            encode_component(&self.uuid)
        ))
    }
}
