//! The in-memory PROV accumulator (§4.2): typed nodes and typed edges with
//! deterministic edge identifiers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single attribute value attached to a PROV element or relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
    Time(DateTime<Utc>),
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}
impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}
impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}
impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}
impl From<DateTime<Utc>> for AttrValue {
    fn from(v: DateTime<Utc>) -> Self {
        AttrValue::Time(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvElementKind {
    Entity,
    Activity,
}

/// A node in the document: an entity or an activity, carrying one or more
/// asserted PROV type tags (`OperatorRun` carries two: itself and
/// `prov:Collection`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvElement {
    pub identifier: String,
    pub kind: ProvElementKind,
    pub prov_types: Vec<&'static str>,
    pub attributes: Vec<(String, AttrValue)>,
}

/// The eight relation kinds the builders emit (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    Generation,
    Usage,
    Communication,
    Derivation,
    /// The `revision` specialization of `derivation` — carries the extra
    /// asserted `prov:Revision` type on top of a plain derivation.
    Revision,
    Invalidation,
    Membership,
    Specialization,
}

impl EdgeKind {
    /// PROV-N relation name, used as the graph-encoder's edge label.
    pub fn prov_n_name(self) -> &'static str {
        match self {
            EdgeKind::Generation => "wasGeneratedBy",
            EdgeKind::Usage => "used",
            EdgeKind::Communication => "wasInformedBy",
            EdgeKind::Derivation | EdgeKind::Revision => "wasDerivedFrom",
            EdgeKind::Invalidation => "wasInvalidatedBy",
            EdgeKind::Membership => "hadMember",
            EdgeKind::Specialization => "specializationOf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvRelation {
    /// `relation:<source>:<target>`, absent for specialization/membership.
    pub identifier: Option<String>,
    pub kind: EdgeKind,
    pub source: String,
    pub target: String,
    pub attributes: Vec<(String, AttrValue)>,
}

/// A PROV document fragment: the output of every sub-model builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvDocument {
    pub elements: Vec<ProvElement>,
    pub relations: Vec<ProvRelation>,
}

impl ProvDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, other: ProvDocument) {
        self.elements.extend(other.elements);
        self.relations.extend(other.relations);
    }
}
