use crate::identity::{encode_component, qualified_name};
use serde::{Deserialize, Serialize};

/// An entity representing the connection between two operators. Created on
/// `ConnectionCreation`; a deletion event emits a new pipeline-version
/// revision but the `Connection` record itself is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: i64,
    pub from_operator_id: i64,
    pub to_operator_id: i64,
}

impl Connection {
    pub fn prov_identifier(&self) -> String {
        qualified_name(&format!("Connection?id={}", encode_component(&self.id.to_string())))
    }
}
