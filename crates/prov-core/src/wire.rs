//! Wire decoding (§6) — JSON-lines `Init`/`DebugStep`/change records,
//! grounded on `provinspector/data.py`'s dataclasses. Both snake- and
//! pascal-case `updateType` spellings are accepted on input
//! (`PipelineChangeType::from_str_lenient`); output always serializes
//! pascal-case via the plain derive on the domain enum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use provgraph_domain::constants::{OperatorStepType, PipelineChangeType};

use crate::errors::TranslatorError;

/// Raw `{name, value}` metric as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawMetric {
    pub name: String,
    pub value: f64,
}

/// A single change record before its `updateType` discriminant has been
/// resolved. Mirrors the union of fields across `data.py`'s five
/// `*PipelineChangeData` dataclasses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawChangeRecord {
    #[serde(rename = "uniqueID")]
    pub unique_id: String,
    #[serde(rename = "updateType")]
    pub update_type: String,
    #[serde(rename = "opID", default, skip_serializing_if = "Option::is_none")]
    pub op_id: Option<i64>,
    #[serde(rename = "opName", default, skip_serializing_if = "Option::is_none")]
    pub op_name: Option<String>,
    #[serde(rename = "opData", default, skip_serializing_if = "Option::is_none")]
    pub op_data: Option<serde_json::Map<String, Value>>,
    #[serde(rename = "changedParam", default, skip_serializing_if = "Option::is_none")]
    pub changed_param: Option<String>,
    #[serde(rename = "changedVal", default, skip_serializing_if = "Option::is_none")]
    pub changed_val: Option<Value>,
    #[serde(rename = "conID", default, skip_serializing_if = "Option::is_none")]
    pub con_id: Option<i64>,
    #[serde(rename = "fromOpID", default, skip_serializing_if = "Option::is_none")]
    pub from_op_id: Option<i64>,
    #[serde(rename = "toOpID", default, skip_serializing_if = "Option::is_none")]
    pub to_op_id: Option<i64>,
    #[serde(rename = "fromSockID", default, skip_serializing_if = "Option::is_none")]
    pub from_sock_id: Option<i64>,
    #[serde(rename = "toSockID", default, skip_serializing_if = "Option::is_none")]
    pub to_sock_id: Option<i64>,
}

/// A change record once its `updateType` has been resolved and its
/// required fields validated. Socket ids are accepted on the wire (so
/// decoding never fails on them) but intentionally dropped here — §3's data
/// model gives `Connection` only `id`, `from_operator_id`, `to_operator_id`.
#[derive(Debug, Clone)]
pub enum ChangeRecord {
    OperatorCreation { op_id: i64, op_name: String, op_data: serde_json::Map<String, Value> },
    OperatorModification { op_id: i64, op_name: String, changed_param: String, changed_val: Value },
    OperatorDeletion { op_id: i64, op_name: String },
    ConnectionCreation { con_id: i64, from_op_id: i64, to_op_id: i64 },
    ConnectionDeletion { con_id: i64, from_op_id: i64, to_op_id: i64 },
}

impl ChangeRecord {
    pub fn change_type(&self) -> PipelineChangeType {
        match self {
            ChangeRecord::OperatorCreation { .. } => PipelineChangeType::OperatorCreation,
            ChangeRecord::OperatorModification { .. } => PipelineChangeType::OperatorModification,
            ChangeRecord::OperatorDeletion { .. } => PipelineChangeType::OperatorDeletion,
            ChangeRecord::ConnectionCreation { .. } => PipelineChangeType::ConnectionCreation,
            ChangeRecord::ConnectionDeletion { .. } => PipelineChangeType::ConnectionDeletion,
        }
    }
}

impl TryFrom<RawChangeRecord> for ChangeRecord {
    type Error = TranslatorError;

    fn try_from(raw: RawChangeRecord) -> Result<Self, Self::Error> {
        let kind = PipelineChangeType::from_str_lenient(&raw.update_type).ok_or_else(|| {
            TranslatorError::UnknownEnumValue(format!(
                "updateType={} (change {})",
                raw.update_type, raw.unique_id
            ))
        })?;

        let missing = |field: &str| {
            TranslatorError::Internal(format!(
                "change {} of type {} missing field {field}",
                raw.unique_id, raw.update_type
            ))
        };

        Ok(match kind {
            PipelineChangeType::OperatorCreation => ChangeRecord::OperatorCreation {
                op_id: raw.op_id.ok_or_else(|| missing("opID"))?,
                op_name: raw.op_name.ok_or_else(|| missing("opName"))?,
                op_data: raw.op_data.unwrap_or_default(),
            },
            PipelineChangeType::OperatorModification => ChangeRecord::OperatorModification {
                op_id: raw.op_id.ok_or_else(|| missing("opID"))?,
                op_name: raw.op_name.ok_or_else(|| missing("opName"))?,
                changed_param: raw.changed_param.ok_or_else(|| missing("changedParam"))?,
                changed_val: raw.changed_val.ok_or_else(|| missing("changedVal"))?,
            },
            PipelineChangeType::OperatorDeletion => ChangeRecord::OperatorDeletion {
                op_id: raw.op_id.ok_or_else(|| missing("opID"))?,
                op_name: raw.op_name.ok_or_else(|| missing("opName"))?,
            },
            PipelineChangeType::ConnectionCreation => ChangeRecord::ConnectionCreation {
                con_id: raw.con_id.ok_or_else(|| missing("conID"))?,
                from_op_id: raw.from_op_id.ok_or_else(|| missing("fromOpID"))?,
                to_op_id: raw.to_op_id.ok_or_else(|| missing("toOpID"))?,
            },
            PipelineChangeType::ConnectionDeletion => ChangeRecord::ConnectionDeletion {
                con_id: raw.con_id.ok_or_else(|| missing("conID"))?,
                from_op_id: raw.from_op_id.ok_or_else(|| missing("fromOpID"))?,
                to_op_id: raw.to_op_id.ok_or_else(|| missing("toOpID"))?,
            },
        })
    }
}

/// Raw debug-step record as it appears on the wire (§6).
#[derive(Debug, Clone, Deserialize)]
pub struct RawDebugStep {
    #[serde(rename = "uniqueStepID")]
    pub unique_step_id: String,
    #[serde(rename = "timeStamp")]
    pub timestamp: f64,
    #[serde(rename = "branchID")]
    pub branch_id: i64,
    #[serde(rename = "stepID")]
    pub step_id: i64,
    #[serde(rename = "parentBranchID")]
    pub parent_branch_id: Option<i64>,
    #[serde(rename = "uniqueOpID")]
    pub unique_op_id: i64,
    #[serde(rename = "opName")]
    pub op_name: String,
    #[serde(rename = "stepType")]
    pub step_type: String,
    #[serde(default)]
    pub metrics: Vec<RawMetric>,
    #[serde(default)]
    pub updates: Option<Vec<RawChangeRecord>>,
}

/// A debug step once its `stepType` has been resolved to a closed enum and
/// its epoch timestamp converted to `DateTime<Utc>`. This is what
/// `Translator::update` actually consumes.
#[derive(Debug, Clone)]
pub struct DebugStep {
    pub unique_step_id: String,
    pub time: DateTime<Utc>,
    pub branch_id: i64,
    pub step_id: i64,
    pub parent_branch_id: Option<i64>,
    pub operator_id: i64,
    pub operator_name: String,
    pub step_type: OperatorStepType,
    pub metrics: Vec<RawMetric>,
    pub changes: Option<Vec<ChangeRecord>>,
}

impl TryFrom<RawDebugStep> for DebugStep {
    type Error = TranslatorError;

    fn try_from(raw: RawDebugStep) -> Result<Self, Self::Error> {
        let step_type = OperatorStepType::from_str_lenient(&raw.step_type).ok_or_else(|| {
            TranslatorError::UnknownEnumValue(format!(
                "stepType={} (step {})",
                raw.step_type, raw.unique_step_id
            ))
        })?;

        let changes = raw
            .updates
            .map(|updates| updates.into_iter().map(ChangeRecord::try_from).collect::<Result<Vec<_>, _>>())
            .transpose()?;

        let secs = raw.timestamp.trunc() as i64;
        let nanos = (raw.timestamp.fract() * 1_000_000_000.0).round() as u32;
        let time = DateTime::from_timestamp(secs, nanos).unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH);

        Ok(DebugStep {
            unique_step_id: raw.unique_step_id,
            time,
            branch_id: raw.branch_id,
            step_id: raw.step_id,
            parent_branch_id: raw.parent_branch_id,
            operator_id: raw.unique_op_id,
            operator_name: raw.op_name,
            step_type,
            metrics: raw.metrics,
            changes,
        })
    }
}

/// Decode a single JSON-lines `Init` record (one change record per line).
pub fn decode_init_line(line: &str) -> Result<ChangeRecord, TranslatorError> {
    let raw: RawChangeRecord = serde_json::from_str(line)
        .map_err(|e| TranslatorError::Internal(format!("malformed init record: {e}")))?;
    ChangeRecord::try_from(raw)
}

/// Decode a single JSON-lines debug-step record.
pub fn decode_debug_step_line(line: &str) -> Result<DebugStep, TranslatorError> {
    let raw: RawDebugStep = serde_json::from_str(line)
        .map_err(|e| TranslatorError::Internal(format!("malformed debug step: {e}")))?;
    DebugStep::try_from(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_update_type_casings() {
        let pascal = r#"{"uniqueID":"1","updateType":"OperatorCreation","opID":7,"opName":"a","opData":{"lr":0.1}}"#;
        let snake = r#"{"uniqueID":"2","updateType":"OPERATOR_CREATION","opID":7,"opName":"a","opData":{"lr":0.1}}"#;

        assert!(matches!(decode_init_line(pascal).unwrap(), ChangeRecord::OperatorCreation { .. }));
        assert!(matches!(decode_init_line(snake).unwrap(), ChangeRecord::OperatorCreation { .. }));
    }

    #[test]
    fn unknown_update_type_is_fatal() {
        let line = r#"{"uniqueID":"1","updateType":"Frobnicate"}"#;
        assert!(matches!(decode_init_line(line), Err(TranslatorError::UnknownEnumValue(_))));
    }

    #[test]
    fn decodes_debug_step_with_updates() {
        let line = r#"{
            "uniqueStepID":"s1","timeStamp":0,"branchID":0,"stepID":0,
            "parentBranchID":null,"uniqueOpID":7,"opName":"a",
            "stepType":"ON_OP_EXECUTED","metrics":[{"name":"loss","value":0.7}],
            "updates":[{"uniqueID":"c1","updateType":"OperatorModification","opID":7,"opName":"a","changedParam":"lr","changedVal":0.2}]
        }"#;
        let step = decode_debug_step_line(line).unwrap();
        assert_eq!(step.metrics.len(), 1);
        assert_eq!(step.changes.unwrap().len(), 1);
    }

    #[test]
    fn unknown_step_type_is_fatal() {
        let line = r#"{"uniqueStepID":"s1","timeStamp":0,"branchID":0,"stepID":0,"parentBranchID":null,"uniqueOpID":7,"opName":"a","stepType":"NOT_A_TYPE","metrics":[]}"#;
        assert!(matches!(decode_debug_step_line(line), Err(TranslatorError::UnknownEnumValue(_))));
    }
}
