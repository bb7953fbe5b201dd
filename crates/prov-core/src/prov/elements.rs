//! `ProvRecord` impls for the domain entity model — the Rust equivalent of
//! each Python dataclass's `to_prov()` method, kept in the PROV-builder
//! layer rather than the domain crate since it is this crate's concern what
//! a record looks like once flattened into a document.

use crate::prov::document::{AttrValue, ProvElementKind};
use provgraph_domain::constants::prov_type;
use provgraph_domain::hashing::hash_value;
use provgraph_domain::model::{
    Connection, Metric, Operator, OperatorExecution, OperatorRevision, OperatorRun, Parameter,
    PipelineChange, PipelineVersion, PipelineVersionCreation, PipelineVersionRevision,
};

/// A domain record that can be lowered into a PROV element.
pub trait ProvRecord {
    fn prov_identifier(&self) -> String;
    fn prov_kind(&self) -> ProvElementKind;
    fn prov_types(&self) -> Vec<&'static str>;
    fn prov_attributes(&self) -> Vec<(String, AttrValue)>;
}

impl ProvRecord for PipelineVersion {
    fn prov_identifier(&self) -> String {
        PipelineVersion::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Entity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::PIPELINE_VERSION]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![("id".into(), AttrValue::Int(self.id))]
    }
}

impl ProvRecord for PipelineVersionRevision {
    fn prov_identifier(&self) -> String {
        PipelineVersionRevision::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Entity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::PIPELINE_VERSION_REVISION]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("uuid".into(), AttrValue::Str(self.uuid.clone())),
            ("id".into(), AttrValue::Int(self.id)),
        ]
    }
}

impl ProvRecord for Operator {
    fn prov_identifier(&self) -> String {
        Operator::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Entity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::OPERATOR]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("id".into(), AttrValue::Int(self.id)),
            ("name".into(), AttrValue::Str(self.name.clone())),
        ]
    }
}

impl ProvRecord for OperatorRevision {
    fn prov_identifier(&self) -> String {
        OperatorRevision::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Entity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::OPERATOR_REVISION]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("uuid".into(), AttrValue::Str(self.uuid.clone())),
            ("id".into(), AttrValue::Int(self.id)),
        ]
    }
}

impl ProvRecord for Parameter {
    fn prov_identifier(&self) -> String {
        Parameter::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Entity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::PARAMETER]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("name".into(), AttrValue::Str(self.name.clone())),
            ("value".into(), AttrValue::Str(hash_value(&self.value))),
        ]
    }
}

impl ProvRecord for Connection {
    fn prov_identifier(&self) -> String {
        Connection::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Entity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::CONNECTION]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("id".into(), AttrValue::Int(self.id)),
            ("from_operator_id".into(), AttrValue::Str(self.from_operator_id.to_string())),
            ("to_operator_id".into(), AttrValue::Str(self.to_operator_id.to_string())),
        ]
    }
}

impl ProvRecord for OperatorRun {
    fn prov_identifier(&self) -> String {
        OperatorRun::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Entity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::OPERATOR_RUN, prov_type::COLLECTION]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("id".into(), AttrValue::Str(self.id.clone())),
            ("time".into(), AttrValue::Time(self.created_at)),
        ]
    }
}

impl ProvRecord for Metric {
    fn prov_identifier(&self) -> String {
        Metric::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Entity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::METRIC]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("name".into(), AttrValue::Str(self.name.clone())),
            ("value".into(), AttrValue::Float(self.value)),
        ]
    }
}

impl ProvRecord for PipelineVersionCreation {
    fn prov_identifier(&self) -> String {
        PipelineVersionCreation::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Activity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::PIPELINE_VERSION_CREATION]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("uuid".into(), AttrValue::Str(self.uuid.clone())),
            ("prov:startTime".into(), AttrValue::Time(self.time)),
            ("prov:endTime".into(), AttrValue::Time(self.time)),
        ]
    }
}

impl ProvRecord for PipelineChange {
    fn prov_identifier(&self) -> String {
        PipelineChange::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Activity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::PIPELINE_CHANGE]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        vec![
            ("uuid".into(), AttrValue::Str(self.uuid.clone())),
            ("pipeline_change_type".into(), AttrValue::Str(self.change_type().to_string())),
            ("prov:startTime".into(), AttrValue::Time(self.time)),
            ("prov:endTime".into(), AttrValue::Time(self.time)),
        ]
    }
}

impl ProvRecord for OperatorExecution {
    fn prov_identifier(&self) -> String {
        OperatorExecution::prov_identifier(self)
    }
    fn prov_kind(&self) -> ProvElementKind {
        ProvElementKind::Activity
    }
    fn prov_types(&self) -> Vec<&'static str> {
        vec![prov_type::OPERATOR_EXECUTION]
    }
    fn prov_attributes(&self) -> Vec<(String, AttrValue)> {
        // Reuses the `pipeline_change_type` key for the step type, matching
        // the upstream source's own attribute naming for this activity.
        vec![
            ("uuid".into(), AttrValue::Str(self.uuid.clone())),
            (
                "pipeline_change_type".into(),
                AttrValue::Str(self.operator_step_type.to_string()),
            ),
            ("prov:startTime".into(), AttrValue::Time(self.time)),
            ("prov:endTime".into(), AttrValue::Time(self.time)),
        ]
    }
}
