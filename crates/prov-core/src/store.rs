//! In-Memory Object Store (§4.5).
//!
//! A typed, filterable collection of all domain records ever created,
//! indexed at least by type, grounded on
//! `storage/repository.py::InMemoryRepository`. The original keys its one
//! `defaultdict(list)` by Python `type(resource)` and filters with
//! `**kwargs` matched against `getattr`; here the same shape is expressed as
//! a closed [`RecordKind`] enum over a tagged [`Record`] union plus ordinary
//! typed accessor methods (the idiomatic Rust replacement for dynamic
//! attribute lookup — see DESIGN.md).

use std::collections::HashMap;

use provgraph_domain::model::{
    Connection, Metric, Operator, OperatorExecution, OperatorRevision, OperatorRun,
    PipelineChange, PipelineVersion, PipelineVersionCreation, PipelineVersionRevision,
};

/// The ten record types the store partitions by, plus their insertion order
/// within each partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    PipelineVersion,
    PipelineVersionRevision,
    Operator,
    OperatorRevision,
    Connection,
    OperatorRun,
    Metric,
    PipelineVersionCreation,
    PipelineChange,
    OperatorExecution,
}

/// A tagged union over every record the store can hold.
#[derive(Debug, Clone)]
pub enum Record {
    PipelineVersion(PipelineVersion),
    PipelineVersionRevision(PipelineVersionRevision),
    Operator(Operator),
    OperatorRevision(OperatorRevision),
    Connection(Connection),
    OperatorRun(OperatorRun),
    Metric(Metric),
    PipelineVersionCreation(PipelineVersionCreation),
    PipelineChange(PipelineChange),
    OperatorExecution(OperatorExecution),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::PipelineVersion(_) => RecordKind::PipelineVersion,
            Record::PipelineVersionRevision(_) => RecordKind::PipelineVersionRevision,
            Record::Operator(_) => RecordKind::Operator,
            Record::OperatorRevision(_) => RecordKind::OperatorRevision,
            Record::Connection(_) => RecordKind::Connection,
            Record::OperatorRun(_) => RecordKind::OperatorRun,
            Record::Metric(_) => RecordKind::Metric,
            Record::PipelineVersionCreation(_) => RecordKind::PipelineVersionCreation,
            Record::PipelineChange(_) => RecordKind::PipelineChange,
            Record::OperatorExecution(_) => RecordKind::OperatorExecution,
        }
    }
}

macro_rules! record_conversions {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(v: $ty) -> Self {
                    Record::$variant(v)
                }
            }
        )*
    };
}

record_conversions! {
    PipelineVersion => PipelineVersion,
    PipelineVersionRevision => PipelineVersionRevision,
    Operator => Operator,
    OperatorRevision => OperatorRevision,
    Connection => Connection,
    OperatorRun => OperatorRun,
    Metric => Metric,
    PipelineVersionCreation => PipelineVersionCreation,
    PipelineChange => PipelineChange,
    OperatorExecution => OperatorExecution,
}

/// `self.repo = defaultdict(list)`, one partition per [`RecordKind`].
#[derive(Debug, Default)]
pub struct Store {
    records: HashMap<RecordKind, Vec<Record>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// `InMemoryRepository.add`.
    pub fn insert<T: Into<Record>>(&mut self, record: T) {
        let record = record.into();
        self.records.entry(record.kind()).or_default().push(record);
    }

    /// `InMemoryRepository.clear`.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn partition(&self, kind: RecordKind) -> &[Record] {
        self.records.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    // -- typed accessors used by the translator -----------------------------

    pub fn pipeline_version(&self, id: i64) -> Option<&PipelineVersion> {
        self.partition(RecordKind::PipelineVersion).iter().find_map(|r| match r {
            Record::PipelineVersion(v) if v.id == id => Some(v),
            _ => None,
        })
    }

    pub fn has_any_pipeline_version(&self) -> bool {
        !self.partition(RecordKind::PipelineVersion).is_empty()
    }

    pub fn pipeline_version_revisions(
        &self,
        pipeline_version_id: i64,
    ) -> Vec<&PipelineVersionRevision> {
        self.partition(RecordKind::PipelineVersionRevision)
            .iter()
            .filter_map(|r| match r {
                Record::PipelineVersionRevision(v) if v.pipeline_version_id == pipeline_version_id => {
                    Some(v)
                }
                _ => None,
            })
            .collect()
    }

    /// The most recently inserted revision of `pipeline_version_id`.
    pub fn latest_pipeline_version_revision(
        &self,
        pipeline_version_id: i64,
    ) -> Option<&PipelineVersionRevision> {
        self.pipeline_version_revisions(pipeline_version_id).into_iter().last()
    }

    pub fn pipeline_version_revision(
        &self,
        pipeline_version_id: i64,
        id: i64,
    ) -> Option<&PipelineVersionRevision> {
        self.pipeline_version_revisions(pipeline_version_id)
            .into_iter()
            .find(|r| r.id == id)
    }

    pub fn pipeline_version_creation_for_revision(
        &self,
        revision_uuid: &str,
    ) -> Option<&PipelineVersionCreation> {
        self.partition(RecordKind::PipelineVersionCreation).iter().find_map(|r| match r {
            Record::PipelineVersionCreation(c) if c.pipeline_version_revision.uuid == revision_uuid => {
                Some(c)
            }
            _ => None,
        })
    }

    /// The most recent `PipelineChange` whose triggering revision is
    /// `revision_uuid` (i.e. the change that produced that revision).
    pub fn latest_pipeline_change_for_revision(
        &self,
        revision_uuid: &str,
    ) -> Option<&PipelineChange> {
        self.partition(RecordKind::PipelineChange)
            .iter()
            .filter_map(|r| match r {
                Record::PipelineChange(c) if c.pipeline_version_revision.uuid == revision_uuid => {
                    Some(c)
                }
                _ => None,
            })
            .last()
    }

    pub fn all_pipeline_version_revisions(&self) -> Vec<&PipelineVersionRevision> {
        self.partition(RecordKind::PipelineVersionRevision)
            .iter()
            .filter_map(|r| match r {
                Record::PipelineVersionRevision(v) => Some(v),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv(id: i64) -> PipelineVersion {
        PipelineVersion { id, parent_pipeline_version_id: None }
    }

    #[test]
    fn insert_and_get_by_id() {
        let mut store = Store::new();
        store.insert(pv(0));
        store.insert(pv(1));

        assert_eq!(store.pipeline_version(1).unwrap().id, 1);
        assert!(store.pipeline_version(2).is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let mut store = Store::new();
        store.insert(pv(0));
        store.clear();
        assert!(!store.has_any_pipeline_version());
    }

    #[test]
    fn latest_revision_is_last_inserted() {
        let mut store = Store::new();
        let base = PipelineVersionRevision {
            uuid: "u0".into(),
            id: 0,
            pipeline_version_id: 0,
            parent_pipeline_version_revision_uuid: None,
            operators: vec![],
            connections: vec![],
        };
        let next = PipelineVersionRevision { id: 1, uuid: "u1".into(), ..base.clone() };
        store.insert(base);
        store.insert(next);

        assert_eq!(store.latest_pipeline_version_revision(0).unwrap().id, 1);
    }
}
