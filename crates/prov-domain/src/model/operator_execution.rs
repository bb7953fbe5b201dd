use super::{OperatorRevision, OperatorRun};
use crate::constants::OperatorStepType;
use crate::identity::{encode_component, qualified_name};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An activity representing the execution of an `OperatorRevision`. One per
/// execution event that carries metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorExecution {
    pub uuid: String,
    pub operator_revision: OperatorRevision,
    pub operator_run: OperatorRun,
    pub operator_step_type: OperatorStepType,
    pub time: DateTime<Utc>,
}

impl OperatorExecution {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!(
            "OperatorExecution?uuid={}",
            encode_component(&self.uuid)
        ))
    }
}
