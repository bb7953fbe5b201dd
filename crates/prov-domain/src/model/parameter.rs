use crate::hashing::hash_value;
use crate::identity::{encode_component, qualified_name};
use serde::{Deserialize, Serialize};

/// An entity representing a parameter of an operator. Member of exactly one
/// `OperatorRevision`; immutable.
///
/// `value` is arbitrary JSON, so its identifier embeds a content hash rather
/// than the raw value (see `hashing`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: serde_json::Value,
}

impl Parameter {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!(
            "Parameter?name={}&value={}",
            encode_component(&self.name),
            hash_value(&self.value)
        ))
    }
}
