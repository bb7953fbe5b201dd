use super::Parameter;
use crate::identity::{encode_component, qualified_name};
use serde::{Deserialize, Serialize};

/// An entity representing a snapshot of an operator's parameter
/// configuration. One per `OperatorCreation` or `OperatorModification` for
/// that operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorRevision {
    pub uuid: String,
    pub id: i64,
    pub operator_id: i64,
    pub operator_name: String,
    pub parameters: Vec<Parameter>,
    pub parent_operator_revision_uuid: Option<String>,
}

impl OperatorRevision {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!(
            "OperatorRevision?uuid={}",
            encode_component(&self.uuid)
        ))
    }
}
