use crate::identity::{encode_component, qualified_name};
use serde::{Deserialize, Serialize};

/// An entity representing an operator of a pipeline. An `Operator`
/// initially has one revision (`OperatorRevision`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub id: i64,
    pub name: String,
}

impl Operator {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!("Operator?id={}", encode_component(&self.id.to_string())))
    }
}
