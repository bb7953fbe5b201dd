use super::Metric;
use crate::identity::{encode_component, qualified_name};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A collection of entities generated by one execution of an
/// `OperatorRevision`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorRun {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub metrics: Vec<Metric>,
}

impl OperatorRun {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!("OperatorRun?id={}", encode_component(&self.id)))
    }
}
