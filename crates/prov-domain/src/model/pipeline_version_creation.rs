use super::PipelineVersionRevision;
use crate::identity::{encode_component, qualified_name};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An activity representing the creation of a pipeline version. One per
/// branch birth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineVersionCreation {
    pub uuid: String,
    pub pipeline_version_revision: PipelineVersionRevision,
    pub parent_pipeline_version_creation_uuid: Option<String>,
    pub time: DateTime<Utc>,
}

impl PipelineVersionCreation {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!(
            "PipelineVersionCreation?uuid={}",
            encode_component(&self.uuid)
        ))
    }
}
