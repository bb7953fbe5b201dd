use crate::identity::{encode_component, qualified_name};
use serde::{Deserialize, Serialize};

/// A metric created by a run of an operator. Member of exactly one
/// `OperatorRun`; also linked to the executing `OperatorRevision`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
    pub value: f64,
}

impl Metric {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!(
            "Metric?name={}&value={}",
            encode_component(&self.name),
            self.value
        ))
    }
}
