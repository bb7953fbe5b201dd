//! Event-to-Provenance Translator (§4.4) — the stateful core, grounded on
//! `provinspector.py::ProvInspector`.
//!
//! `Translator` owns nothing but the object store and two small pieces of
//! cache state; every PROV fragment it produces comes from handing freshly
//! constructed domain records to the pure builders in [`crate::builders`].

use chrono::{DateTime, Utc};
use uuid::Uuid;

use provgraph_domain::model::{
    Connection, Metric, OperatorExecution, OperatorRevision, OperatorRun, Parameter,
    PipelineChange, PipelineChangePayload, PipelineVersion, PipelineVersionCreation,
    PipelineVersionRevision,
};

use crate::builders;
use crate::errors::TranslatorError;
use crate::prov::ProvDocument;
use crate::store::Store;
use crate::wire::{ChangeRecord, DebugStep};

/// The "global-ish initial constants" of §9's design notes, threaded
/// explicitly instead of living as module-level constants.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    pub initial_pipeline_version_id: i64,
    pub initial_revision_id: i64,
    pub initial_time: DateTime<Utc>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            initial_pipeline_version_id: 0,
            initial_revision_id: 0,
            initial_time: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

fn new_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// The stateful core described in §4.4.
#[derive(Debug)]
pub struct Translator {
    config: TranslatorConfig,
    initialized: bool,
    last_branch_id: Option<i64>,
    last_revision_id: Option<i64>,
    store: Store,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslatorConfig::default())
    }
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config, initialized: false, last_branch_id: None, last_revision_id: None, store: Store::new() }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// A `clear()` between updates is legal and resets the translator to
    /// uninitialized (§5).
    pub fn clear(&mut self) {
        self.store.clear();
        self.initialized = false;
        self.last_branch_id = None;
        self.last_revision_id = None;
    }

    /// `ProvInspector.initialize`. Idempotent only while not yet
    /// initialized; a repeat call is a recoverable warning, not an error
    /// (§7d) — it returns an empty fragment rather than `Err`.
    pub fn initialize(&mut self, changes: &[ChangeRecord]) -> ProvDocument {
        if self.initialized {
            tracing::warn!("translator already initialized; ignoring duplicate initialize() call");
            return ProvDocument::default();
        }

        let mut operators = Vec::new();
        let mut connections = Vec::new();

        for change in changes {
            match change {
                ChangeRecord::OperatorCreation { op_id, op_name, op_data } => {
                    let parameters = op_data
                        .iter()
                        .map(|(name, value)| Parameter { name: name.clone(), value: value.clone() })
                        .collect();
                    operators.push(OperatorRevision {
                        uuid: new_uuid(),
                        id: 0,
                        operator_id: *op_id,
                        operator_name: op_name.clone(),
                        parameters,
                        parent_operator_revision_uuid: None,
                    });
                }
                ChangeRecord::ConnectionCreation { con_id, from_op_id, to_op_id } => {
                    connections.push(Connection {
                        id: *con_id,
                        from_operator_id: *from_op_id,
                        to_operator_id: *to_op_id,
                    });
                }
                // Other init-time change kinds are ignored (§4.4).
                _ => {}
            }
        }

        let pipeline_version =
            PipelineVersion { id: self.config.initial_pipeline_version_id, parent_pipeline_version_id: None };
        let revision = PipelineVersionRevision {
            uuid: new_uuid(),
            id: self.config.initial_revision_id,
            pipeline_version_id: pipeline_version.id,
            parent_pipeline_version_revision_uuid: None,
            operators,
            connections,
        };
        let creation = PipelineVersionCreation {
            uuid: new_uuid(),
            pipeline_version_revision: revision.clone(),
            parent_pipeline_version_creation_uuid: None,
            time: self.config.initial_time,
        };

        self.store.insert(pipeline_version.clone());
        self.store.insert(revision.clone());
        self.store.insert(creation.clone());

        self.initialized = true;
        self.last_branch_id = Some(pipeline_version.id);
        self.last_revision_id = Some(revision.id);

        tracing::debug!(pipeline_version = pipeline_version.id, "initialized genesis pipeline version");

        builders::build_pipeline_version_creation(&pipeline_version, &creation, None, None, None)
    }

    /// `ProvInspector.update` — the heart of the translator.
    pub fn update(&mut self, step: DebugStep) -> Result<ProvDocument, TranslatorError> {
        let mut doc = ProvDocument::default();

        let (pipeline_version, branch_parent_revision) = self.resolve_branch(&step, &mut doc)?;

        // `current_revision` chains through this step's own changes; the
        // unmodified `branch_parent_revision` is what the execution section
        // below looks operator revisions up against (§4.4).
        let mut current_revision = branch_parent_revision.clone();

        if let Some(changes) = step.changes.as_ref() {
            for change in changes {
                current_revision =
                    self.apply_change(&pipeline_version, &current_revision, change, step.time, &mut doc)?;
            }
        }

        self.last_branch_id = Some(pipeline_version.id);
        self.last_revision_id = Some(current_revision.id);

        if !step.metrics.is_empty() {
            self.apply_execution(&branch_parent_revision, &step, &mut doc)?;
        }

        Ok(doc)
    }

    /// Branch resolution: determine the `PipelineVersion` and its latest (or
    /// freshly created) `PipelineVersionRevision` this step applies to.
    fn resolve_branch(
        &mut self,
        step: &DebugStep,
        doc: &mut ProvDocument,
    ) -> Result<(PipelineVersion, PipelineVersionRevision), TranslatorError> {
        if !self.initialized && !self.store.has_any_pipeline_version() {
            let pipeline_version = PipelineVersion { id: step.branch_id, parent_pipeline_version_id: None };
            let revision = PipelineVersionRevision {
                uuid: new_uuid(),
                id: 0,
                pipeline_version_id: step.branch_id,
                parent_pipeline_version_revision_uuid: None,
                operators: vec![],
                connections: vec![],
            };
            let creation = PipelineVersionCreation {
                uuid: new_uuid(),
                pipeline_version_revision: revision.clone(),
                parent_pipeline_version_creation_uuid: None,
                time: step.time,
            };

            self.store.insert(pipeline_version.clone());
            self.store.insert(revision.clone());
            self.store.insert(creation.clone());

            doc.merge(builders::build_pipeline_version_creation(&pipeline_version, &creation, None, None, None));

            return Ok((pipeline_version, revision));
        }

        if let Some(pipeline_version) = self.store.pipeline_version(step.branch_id).cloned() {
            let revision = if self.last_branch_id == Some(step.branch_id) {
                let last_revision_id = self
                    .last_revision_id
                    .ok_or_else(|| TranslatorError::Internal("cache inconsistent: no last revision id".into()))?;
                self.store
                    .pipeline_version_revision(pipeline_version.id, last_revision_id)
                    .cloned()
                    .ok_or_else(|| TranslatorError::Internal("cached revision not found".into()))?
            } else {
                self.store
                    .latest_pipeline_version_revision(pipeline_version.id)
                    .cloned()
                    .ok_or_else(|| TranslatorError::Internal("branch has no revisions".into()))?
            };

            return Ok((pipeline_version, revision));
        }

        // Unknown branch: this is a branch birth and requires a known parent.
        let parent_branch_id = step.parent_branch_id.ok_or_else(|| {
            TranslatorError::MissingParentBranch(format!(
                "branch {} unknown and no parentBranchID given (step {})",
                step.branch_id, step.unique_step_id
            ))
        })?;

        let parent_pipeline_version = self.store.pipeline_version(parent_branch_id).cloned().ok_or_else(|| {
            TranslatorError::MissingParentBranch(format!(
                "parent branch {parent_branch_id} does not exist (step {})",
                step.unique_step_id
            ))
        })?;

        let parent_latest_revision = self
            .store
            .latest_pipeline_version_revision(parent_branch_id)
            .cloned()
            .ok_or_else(|| TranslatorError::Internal(format!("parent branch {parent_branch_id} has no revisions")))?;

        let new_pipeline_version =
            PipelineVersion { id: step.branch_id, parent_pipeline_version_id: Some(parent_branch_id) };
        let genesis_revision = PipelineVersionRevision {
            uuid: new_uuid(),
            id: 0,
            pipeline_version_id: new_pipeline_version.id,
            parent_pipeline_version_revision_uuid: Some(parent_latest_revision.uuid.clone()),
            operators: parent_latest_revision.operators.clone(),
            connections: parent_latest_revision.connections.clone(),
        };

        let parent_creation =
            self.store.pipeline_version_creation_for_revision(&parent_latest_revision.uuid).cloned();

        let new_creation = PipelineVersionCreation {
            uuid: new_uuid(),
            pipeline_version_revision: genesis_revision.clone(),
            parent_pipeline_version_creation_uuid: parent_creation.as_ref().map(|c| c.uuid.clone()),
            time: step.time,
        };

        self.store.insert(new_pipeline_version.clone());
        self.store.insert(genesis_revision.clone());
        self.store.insert(new_creation.clone());

        tracing::debug!(
            branch = new_pipeline_version.id,
            parent_branch = parent_branch_id,
            "created new branch"
        );

        doc.merge(builders::build_pipeline_version_creation(
            &new_pipeline_version,
            &new_creation,
            Some(&parent_pipeline_version),
            Some(&parent_latest_revision),
            parent_creation.as_ref(),
        ));

        Ok((new_pipeline_version, genesis_revision))
    }

    /// Apply one `step.changes` entry, chaining onto `parent_revision`, and
    /// return the freshly built revision so the next change in this step
    /// (if any) chains onto it in turn.
    fn apply_change(
        &mut self,
        pipeline_version: &PipelineVersion,
        parent_revision: &PipelineVersionRevision,
        change: &ChangeRecord,
        time: DateTime<Utc>,
        doc: &mut ProvDocument,
    ) -> Result<PipelineVersionRevision, TranslatorError> {
        let parent_change = self.store.latest_pipeline_change_for_revision(&parent_revision.uuid).cloned();

        match change {
            ChangeRecord::OperatorCreation { op_id, op_name, op_data } => {
                let parameters = op_data
                    .iter()
                    .map(|(name, value)| Parameter { name: name.clone(), value: value.clone() })
                    .collect();
                let operator_revision = OperatorRevision {
                    uuid: new_uuid(),
                    id: 0,
                    operator_id: *op_id,
                    operator_name: op_name.clone(),
                    parameters,
                    parent_operator_revision_uuid: None,
                };

                let mut operators = parent_revision.operators.clone();
                operators.push(operator_revision.clone());

                let new_revision = self.build_revision(pipeline_version, parent_revision, operators, parent_revision.connections.clone());

                let pipeline_change = PipelineChange {
                    uuid: new_uuid(),
                    time,
                    payload: PipelineChangePayload::OperatorCreation { operator_revision },
                    pipeline_version_revision: new_revision.clone(),
                    parent_pipeline_change_uuid: parent_change.as_ref().map(|c| c.uuid.clone()),
                };

                self.store.insert(new_revision.clone());
                self.store.insert(pipeline_change.clone());

                doc.merge(builders::build_operator_creation(
                    &pipeline_change,
                    pipeline_version,
                    parent_change.as_ref(),
                    Some(parent_revision),
                ));

                Ok(new_revision)
            }

            ChangeRecord::OperatorModification { op_id, op_name, changed_param, changed_val } => {
                let parent_operator_revision = last_matching_operator_revision(&parent_revision.operators, *op_id)
                    .cloned()
                    .ok_or_else(|| {
                        TranslatorError::Internal(format!("OperatorModification: unknown operator {op_id}"))
                    })?;

                let mut parameters: Vec<Parameter> = parent_operator_revision
                    .parameters
                    .iter()
                    .filter(|p| p.name != *changed_param)
                    .cloned()
                    .collect();
                parameters.push(Parameter { name: changed_param.clone(), value: changed_val.clone() });

                let operator_revision = OperatorRevision {
                    uuid: new_uuid(),
                    id: parent_operator_revision.id + 1,
                    operator_id: *op_id,
                    operator_name: op_name.clone(),
                    parameters,
                    parent_operator_revision_uuid: Some(parent_operator_revision.uuid.clone()),
                };

                // Additive per the original source and §9's Open Question 2:
                // the old revision of the operator is left in the set too.
                let mut operators = parent_revision.operators.clone();
                operators.push(operator_revision.clone());

                let new_revision = self.build_revision(pipeline_version, parent_revision, operators, parent_revision.connections.clone());

                let pipeline_change = PipelineChange {
                    uuid: new_uuid(),
                    time,
                    payload: PipelineChangePayload::OperatorModification { operator_revision },
                    pipeline_version_revision: new_revision.clone(),
                    parent_pipeline_change_uuid: parent_change.as_ref().map(|c| c.uuid.clone()),
                };

                self.store.insert(new_revision.clone());
                self.store.insert(pipeline_change.clone());

                doc.merge(builders::build_operator_modification(
                    &pipeline_change,
                    pipeline_version,
                    parent_change.as_ref(),
                    Some(&parent_operator_revision),
                    Some(parent_revision),
                ));

                Ok(new_revision)
            }

            ChangeRecord::OperatorDeletion { op_id, .. } => {
                let operator_revision = last_matching_operator_revision(&parent_revision.operators, *op_id)
                    .cloned()
                    .ok_or_else(|| TranslatorError::Internal(format!("OperatorDeletion: unknown operator {op_id}")))?;

                // Minus semantics per §9's Open Question 1: the deleted
                // revision is removed from the operator set.
                let mut operators = parent_revision.operators.clone();
                if let Some(pos) = operators.iter().position(|o| o.uuid == operator_revision.uuid) {
                    operators.remove(pos);
                }

                let new_revision = self.build_revision(pipeline_version, parent_revision, operators, parent_revision.connections.clone());

                let pipeline_change = PipelineChange {
                    uuid: new_uuid(),
                    time,
                    payload: PipelineChangePayload::OperatorDeletion { operator_revision },
                    pipeline_version_revision: new_revision.clone(),
                    parent_pipeline_change_uuid: parent_change.as_ref().map(|c| c.uuid.clone()),
                };

                self.store.insert(new_revision.clone());
                self.store.insert(pipeline_change.clone());

                doc.merge(builders::build_operator_deletion(
                    &pipeline_change,
                    pipeline_version,
                    parent_change.as_ref(),
                    Some(parent_revision),
                ));

                Ok(new_revision)
            }

            ChangeRecord::ConnectionCreation { con_id, from_op_id, to_op_id } => {
                let connection = Connection { id: *con_id, from_operator_id: *from_op_id, to_operator_id: *to_op_id };

                let mut connections = parent_revision.connections.clone();
                connections.push(connection.clone());

                let new_revision = self.build_revision(pipeline_version, parent_revision, parent_revision.operators.clone(), connections);

                let pipeline_change = PipelineChange {
                    uuid: new_uuid(),
                    time,
                    payload: PipelineChangePayload::ConnectionCreation { connection },
                    pipeline_version_revision: new_revision.clone(),
                    parent_pipeline_change_uuid: parent_change.as_ref().map(|c| c.uuid.clone()),
                };

                self.store.insert(new_revision.clone());
                self.store.insert(pipeline_change.clone());

                doc.merge(builders::build_connection_creation(
                    &pipeline_change,
                    pipeline_version,
                    parent_change.as_ref(),
                    Some(parent_revision),
                ));

                Ok(new_revision)
            }

            ChangeRecord::ConnectionDeletion { con_id, from_op_id, to_op_id } => {
                let connection = Connection { id: *con_id, from_operator_id: *from_op_id, to_operator_id: *to_op_id };

                // Additive per §9's Open Question 3: the source reconstructs
                // the connection from the event's ids and appends it rather
                // than removing the live connection.
                let mut connections = parent_revision.connections.clone();
                connections.push(connection.clone());

                let new_revision = self.build_revision(pipeline_version, parent_revision, parent_revision.operators.clone(), connections);

                let pipeline_change = PipelineChange {
                    uuid: new_uuid(),
                    time,
                    payload: PipelineChangePayload::ConnectionDeletion { connection },
                    pipeline_version_revision: new_revision.clone(),
                    parent_pipeline_change_uuid: parent_change.as_ref().map(|c| c.uuid.clone()),
                };

                self.store.insert(new_revision.clone());
                self.store.insert(pipeline_change.clone());

                doc.merge(builders::build_connection_deletion(
                    &pipeline_change,
                    pipeline_version,
                    parent_change.as_ref(),
                    Some(parent_revision),
                ));

                Ok(new_revision)
            }
        }
    }

    fn build_revision(
        &self,
        pipeline_version: &PipelineVersion,
        parent_revision: &PipelineVersionRevision,
        operators: Vec<OperatorRevision>,
        connections: Vec<Connection>,
    ) -> PipelineVersionRevision {
        PipelineVersionRevision {
            uuid: new_uuid(),
            id: parent_revision.id + 1,
            pipeline_version_id: pipeline_version.id,
            parent_pipeline_version_revision_uuid: Some(parent_revision.uuid.clone()),
            operators,
            connections,
        }
    }

    /// Execution application: build an `OperatorRun`/`OperatorExecution` pair
    /// from `step.metrics`, looking the executing revision up in the
    /// *branch-resolution* parent revision, not whatever the change loop
    /// built (§4.4).
    fn apply_execution(
        &mut self,
        branch_parent_revision: &PipelineVersionRevision,
        step: &DebugStep,
        doc: &mut ProvDocument,
    ) -> Result<(), TranslatorError> {
        let operator_revision =
            last_matching_operator_revision(&branch_parent_revision.operators, step.operator_id)
                .cloned()
                .ok_or_else(|| {
                    TranslatorError::Internal(format!(
                        "OperatorExecution: unknown operator {} (step {})",
                        step.operator_id, step.unique_step_id
                    ))
                })?;

        let metrics: Vec<Metric> = step.metrics.iter().map(|m| Metric { name: m.name.clone(), value: m.value }).collect();

        let operator_run = OperatorRun { id: new_uuid(), created_at: step.time, metrics };

        let operator_execution = OperatorExecution {
            uuid: new_uuid(),
            operator_revision,
            operator_run,
            operator_step_type: step.step_type,
            time: step.time,
        };

        self.store.insert(operator_execution.clone());

        doc.merge(builders::build_operator_execution(&operator_execution));

        Ok(())
    }
}

fn last_matching_operator_revision(operators: &[OperatorRevision], operator_id: i64) -> Option<&OperatorRevision> {
    operators.iter().filter(|o| o.operator_id == operator_id).last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prov::EdgeKind;

    fn step(branch_id: i64, parent_branch_id: Option<i64>, unique_step_id: &str) -> DebugStep {
        DebugStep {
            unique_step_id: unique_step_id.to_string(),
            time: DateTime::<Utc>::UNIX_EPOCH,
            branch_id,
            step_id: 0,
            parent_branch_id,
            operator_id: 0,
            operator_name: "op".into(),
            step_type: provgraph_domain::constants::OperatorStepType::OnOpExecuted,
            metrics: vec![],
            changes: None,
        }
    }

    /// S1 — Minimal genesis. Three elements, three relations: the
    /// creation-generation edge for the revision, its specialization
    /// into the pipeline version, and the pipeline version's own
    /// generation edge (role CreatedPipelineVersion).
    #[test]
    fn minimal_genesis_produces_three_elements_three_edges() {
        let mut translator = Translator::default();
        let doc = translator.update(step(0, None, "s1")).unwrap();

        assert_eq!(doc.elements.len(), 3);
        assert_eq!(doc.relations.len(), 3);
        assert!(doc.relations.iter().any(|r| r.kind == EdgeKind::Specialization));
        assert_eq!(doc.relations.iter().filter(|r| r.kind == EdgeKind::Generation).count(), 2);
    }

    fn op_creation(op_id: i64, name: &str, params: &[(&str, f64)]) -> ChangeRecord {
        let mut map = serde_json::Map::new();
        for (k, v) in params {
            map.insert((*k).to_string(), serde_json::json!(v));
        }
        ChangeRecord::OperatorCreation { op_id, op_name: name.to_string(), op_data: map }
    }

    /// S2 — Parameter modification.
    #[test]
    fn operator_modification_produces_two_revisions_and_revision_edge() {
        let mut translator = Translator::default();
        translator.initialize(&[op_creation(7, "op7", &[("lr", 0.1)])]);

        let mut s = step(0, None, "s2");
        s.changes = Some(vec![ChangeRecord::OperatorModification {
            op_id: 7,
            op_name: "op7".into(),
            changed_param: "lr".into(),
            changed_val: serde_json::json!(0.2),
        }]);

        let doc = translator.update(s).unwrap();

        // Two Revision edges: OperatorRevision -> parent OperatorRevision
        // (builders.rs), and PipelineVersionRevision -> parent
        // PipelineVersionRevision (the common frame, since this modification
        // has a parent revision). Isolate the operator-level one.
        let revision_edges: Vec<_> = doc.relations.iter().filter(|r| r.kind == EdgeKind::Revision).collect();
        assert_eq!(revision_edges.len(), 2);

        let operator_revision_edges: Vec<_> =
            revision_edges.iter().filter(|r| r.source.contains("OperatorRevision")).collect();
        assert_eq!(operator_revision_edges.len(), 1);

        let latest = translator.store().latest_pipeline_version_revision(0).unwrap();
        let op_revisions: Vec<_> = latest.operators.iter().filter(|o| o.operator_id == 7).collect();
        assert_eq!(op_revisions.len(), 2);

        let lr_params: Vec<_> = op_revisions[1].parameters.iter().filter(|p| p.name == "lr").collect();
        assert_eq!(lr_params.len(), 1);
        assert_eq!(lr_params[0].value, serde_json::json!(0.2));
    }

    /// S3 — Branch birth.
    #[test]
    fn branch_birth_copies_parent_operator_set() {
        let mut translator = Translator::default();
        translator.initialize(&[op_creation(7, "op7", &[("lr", 0.1)])]);

        let mut s2 = step(0, None, "s2");
        s2.changes = Some(vec![ChangeRecord::OperatorModification {
            op_id: 7,
            op_name: "op7".into(),
            changed_param: "lr".into(),
            changed_val: serde_json::json!(0.2),
        }]);
        translator.update(s2).unwrap();

        let doc = translator.update(step(1, Some(0), "s3")).unwrap();

        assert!(doc.elements.iter().any(|e| e.prov_types.contains(&"PipelineVersion")));
        assert!(doc.relations.iter().any(|r| r.kind == EdgeKind::Derivation));

        let branch0_latest = translator.store().latest_pipeline_version_revision(0).unwrap().clone();
        let branch1_genesis = translator.store().latest_pipeline_version_revision(1).unwrap();
        assert_eq!(branch0_latest.operators.len(), branch1_genesis.operators.len());
    }

    /// S4 — Connection deletion.
    #[test]
    fn connection_deletion_emits_invalidation_and_bumps_sequence() {
        let mut translator = Translator::default();
        translator.initialize(&[
            op_creation(1, "op1", &[]),
            op_creation(2, "op2", &[]),
            ChangeRecord::ConnectionCreation { con_id: 9, from_op_id: 1, to_op_id: 2 },
        ]);

        let parent_id = translator.store().latest_pipeline_version_revision(0).unwrap().id;

        let mut s = step(0, None, "s4");
        s.changes =
            Some(vec![ChangeRecord::ConnectionDeletion { con_id: 9, from_op_id: 1, to_op_id: 2 }]);
        let doc = translator.update(s).unwrap();

        assert!(doc.relations.iter().any(|r| r.kind == EdgeKind::Invalidation));
        let new_revision = translator.store().latest_pipeline_version_revision(0).unwrap();
        assert_eq!(new_revision.id, parent_id + 1);
    }

    /// S5 — Execution with metrics.
    #[test]
    fn execution_with_metrics_emits_run_and_membership_edges() {
        let mut translator = Translator::default();
        translator.initialize(&[op_creation(7, "op7", &[])]);

        let mut s = step(0, None, "s5");
        s.operator_id = 7;
        s.metrics = vec![crate::wire::RawMetric { name: "loss".into(), value: 0.7 }];

        let doc = translator.update(s).unwrap();

        assert!(doc.elements.iter().any(|e| e.prov_types.contains(&"OperatorRun")));
        assert!(doc.elements.iter().any(|e| e.prov_types.contains(&"Metric")));

        let membership_count = doc.relations.iter().filter(|r| r.kind == EdgeKind::Membership).count();
        assert!(membership_count >= 2);
    }

    /// S6 — Replay idempotence is checked at the graph-encoder/adapter
    /// layer (merge on primary key); here we assert the translator itself
    /// is deterministic in shape across two independent runs of the same
    /// trace.
    #[test]
    fn replaying_same_trace_twice_yields_same_shape() {
        let run = || {
            let mut translator = Translator::default();
            translator.initialize(&[op_creation(7, "op7", &[("lr", 0.1)])]);
            let mut s = step(0, None, "s");
            s.changes = Some(vec![ChangeRecord::OperatorModification {
                op_id: 7,
                op_name: "op7".into(),
                changed_param: "lr".into(),
                changed_val: serde_json::json!(0.2),
            }]);
            let doc = translator.update(s).unwrap();
            (doc.elements.len(), doc.relations.len())
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn double_initialize_is_a_noop_warning() {
        let mut translator = Translator::default();
        let first = translator.initialize(&[op_creation(1, "a", &[])]);
        let second = translator.initialize(&[op_creation(2, "b", &[])]);

        assert!(!first.elements.is_empty());
        assert!(second.elements.is_empty());
        assert!(translator.store().pipeline_version(0).is_some());
    }

    #[test]
    fn unknown_branch_without_parent_is_fatal() {
        let mut translator = Translator::default();
        translator.initialize(&[]);

        let result = translator.update(step(5, None, "bad"));
        assert!(matches!(result, Err(TranslatorError::MissingParentBranch(_))));
    }
}
