//! Closed enums shared by the wire format and the domain model, mirroring
//! the upstream debugger's own vocabulary (§6).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five kinds of pipeline change the translator understands.
///
/// Both `SCREAMING_SNAKE_CASE` and `PascalCase` spellings are accepted on
/// input; output always uses the PascalCase spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineChangeType {
    OperatorCreation,
    OperatorModification,
    OperatorDeletion,
    ConnectionCreation,
    ConnectionDeletion,
}

impl PipelineChangeType {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s {
            "OPERATOR_CREATION" | "OperatorCreation" => Some(Self::OperatorCreation),
            "OPERATOR_MODIFICATION" | "OperatorModification" => Some(Self::OperatorModification),
            "OPERATOR_DELETION" | "OperatorDeletion" => Some(Self::OperatorDeletion),
            "CONNECTION_CREATION" | "ConnectionCreation" => Some(Self::ConnectionCreation),
            "CONNECTION_DELETION" | "ConnectionDeletion" => Some(Self::ConnectionDeletion),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OperatorCreation => "OperatorCreation",
            Self::OperatorModification => "OperatorModification",
            Self::OperatorDeletion => "OperatorDeletion",
            Self::ConnectionCreation => "ConnectionCreation",
            Self::ConnectionDeletion => "ConnectionDeletion",
        };
        f.write_str(s)
    }
}

/// The six step shapes the upstream debugger can report an operator
/// execution under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorStepType {
    OnSourceProducedTuple,
    OnTupleTransmitted,
    OnStreamProcessTuple,
    PreTupleProcessed,
    OnTupleProcessed,
    OnOpExecuted,
}

impl OperatorStepType {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s {
            "ON_SOURCE_PRODUCED_TUPLE" | "OnSourceProducedTuple" => {
                Some(Self::OnSourceProducedTuple)
            }
            "ON_TUPLE_TRANSMITTED" | "OnTupleTransmitted" => Some(Self::OnTupleTransmitted),
            "ON_STREAM_PROCESS_TUPLE" | "OnStreamProcessTuple" => {
                Some(Self::OnStreamProcessTuple)
            }
            "PRE_TUPLE_PROCESSED" | "PreTupleProcessed" => Some(Self::PreTupleProcessed),
            "ON_TUPLE_PROCESSED" | "OnTupleProcessed" => Some(Self::OnTupleProcessed),
            "ON_OP_EXECUTED" | "OnOpExecuted" => Some(Self::OnOpExecuted),
            _ => None,
        }
    }
}

impl fmt::Display for OperatorStepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::OnSourceProducedTuple => "OnSourceProducedTuple",
            Self::OnTupleTransmitted => "OnTupleTransmitted",
            Self::OnStreamProcessTuple => "OnStreamProcessTuple",
            Self::PreTupleProcessed => "PreTupleProcessed",
            Self::OnTupleProcessed => "OnTupleProcessed",
            Self::OnOpExecuted => "OnOpExecuted",
        };
        f.write_str(s)
    }
}

/// PROV roles asserted on generation/usage/invalidation edges (§4.3).
pub mod prov_role {
    pub const CREATED_PIPELINE_VERSION: &str = "CreatedPipelineVersion";
    pub const CREATED_PIPELINE_VERSION_REVISION: &str = "CreatedPipelineVersionRevision";
    pub const CREATED_OPERATOR: &str = "CreatedOperator";
    pub const MODIFIED_OPERATOR: &str = "ModifiedOperator";
    pub const DELETED_OPERATOR: &str = "DeletedOperator";
    pub const CREATED_CONNECTION: &str = "CreatedConnection";
    pub const DELETED_CONNECTION: &str = "DeletedConnection";
    pub const CREATED_OPERATOR_RUN: &str = "CreatedOperatorRun";
    pub const USED_PARENT_PIPELINE_VERSION: &str = "UsedParentPipelineVersion";
    pub const USED_PARENT_PIPELINE_VERSION_REVISION: &str = "UsedParentPipelineVersionRevision";
    pub const USED_OPERATOR_REVISION: &str = "UsedOperatorRevision";
    pub const USED_PARENT_OPERATOR_REVISION: &str = "UsedParentOperatorRevision";
}

/// PROV type labels attached to each domain record's node (§4.6 `NODE_LABELS`
/// key, not the PROV element class, which the encoder derives separately).
pub mod prov_type {
    pub const PIPELINE_VERSION: &str = "PipelineVersion";
    pub const PIPELINE_VERSION_REVISION: &str = "PipelineVersionRevision";
    pub const OPERATOR: &str = "Operator";
    pub const OPERATOR_REVISION: &str = "OperatorRevision";
    pub const PARAMETER: &str = "Parameter";
    pub const OPERATOR_RUN: &str = "OperatorRun";
    pub const METRIC: &str = "Metric";
    pub const CONNECTION: &str = "Connection";
    pub const PIPELINE_VERSION_CREATION: &str = "PipelineVersionCreation";
    pub const PIPELINE_CHANGE: &str = "PipelineChange";
    pub const OPERATOR_EXECUTION: &str = "OperatorExecution";
    pub const COLLECTION: &str = "prov:Collection";
}
