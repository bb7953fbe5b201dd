use super::{Connection, OperatorRevision, PipelineVersionRevision};
use crate::constants::PipelineChangeType;
use crate::identity::{encode_component, qualified_name};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discriminated payload of a `PipelineChange` (§9 — the five-subtype
/// inheritance hierarchy of the original is flattened into one record type
/// carrying a tagged payload instead).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineChangePayload {
    OperatorCreation { operator_revision: OperatorRevision },
    OperatorModification { operator_revision: OperatorRevision },
    OperatorDeletion { operator_revision: OperatorRevision },
    ConnectionCreation { connection: Connection },
    ConnectionDeletion { connection: Connection },
}

impl PipelineChangePayload {
    pub fn change_type(&self) -> PipelineChangeType {
        match self {
            Self::OperatorCreation { .. } => PipelineChangeType::OperatorCreation,
            Self::OperatorModification { .. } => PipelineChangeType::OperatorModification,
            Self::OperatorDeletion { .. } => PipelineChangeType::OperatorDeletion,
            Self::ConnectionCreation { .. } => PipelineChangeType::ConnectionCreation,
            Self::ConnectionDeletion { .. } => PipelineChangeType::ConnectionDeletion,
        }
    }

    pub fn operator_revision(&self) -> Option<&OperatorRevision> {
        match self {
            Self::OperatorCreation { operator_revision }
            | Self::OperatorModification { operator_revision }
            | Self::OperatorDeletion { operator_revision } => Some(operator_revision),
            _ => None,
        }
    }

    pub fn connection(&self) -> Option<&Connection> {
        match self {
            Self::ConnectionCreation { connection } | Self::ConnectionDeletion { connection } => {
                Some(connection)
            }
            _ => None,
        }
    }
}

/// An activity representing a single pipeline change between two
/// `PipelineVersionRevision`s of a `PipelineVersion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineChange {
    pub uuid: String,
    pub time: DateTime<Utc>,
    pub payload: PipelineChangePayload,
    pub pipeline_version_revision: PipelineVersionRevision,
    pub parent_pipeline_change_uuid: Option<String>,
}

impl PipelineChange {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!("PipelineChange?uuid={}", encode_component(&self.uuid)))
    }

    pub fn change_type(&self) -> PipelineChangeType {
        self.payload.change_type()
    }
}
