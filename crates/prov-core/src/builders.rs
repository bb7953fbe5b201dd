//! Sub-model Builders (§4.3) — seven pure functions, one per event shape,
//! each producing a fresh PROV document fragment. None of them touch the
//! object store; the translator resolves every parent beforehand.

use crate::prov::{AttrValue, EdgeKind, ProvContext, ProvDocument};
use provgraph_domain::constants::prov_role;
use provgraph_domain::model::{
    OperatorExecution, OperatorRevision, PipelineChange, PipelineChangePayload, PipelineVersion,
    PipelineVersionCreation, PipelineVersionRevision,
};

/// The frame shared by every `PipelineChange` builder (§4.3 preamble): the
/// triggering activity, its optional parent change, the affected revision's
/// membership set, the owning pipeline version, and (if present) the parent
/// revision's revision/usage edges.
fn add_change_common_frame(
    ctx: &mut ProvContext,
    pipeline_change: &PipelineChange,
    parent_pipeline_change: Option<&PipelineChange>,
    pipeline_version: &PipelineVersion,
    parent_pipeline_version_revision: Option<&PipelineVersionRevision>,
) {
    ctx.add_element(pipeline_change, false);
    if let Some(parent) = parent_pipeline_change {
        ctx.add_element(parent, false);
        ctx.add_relation(pipeline_change, parent, EdgeKind::Communication, vec![]);
    }

    let pvr = &pipeline_change.pipeline_version_revision;
    ctx.add_element(pvr, false);
    for op_rev in &pvr.operators {
        ctx.add_element(op_rev, false);
        ctx.add_relation(pvr, op_rev, EdgeKind::Membership, vec![]);
    }
    for conn in &pvr.connections {
        ctx.add_element(conn, false);
        ctx.add_relation(pvr, conn, EdgeKind::Membership, vec![]);
    }
    ctx.add_relation(
        pvr,
        pipeline_change,
        EdgeKind::Generation,
        vec![
            ("prov:time".into(), AttrValue::Time(pipeline_change.time)),
            (
                "prov:role".into(),
                AttrValue::Str(prov_role::CREATED_PIPELINE_VERSION_REVISION.to_string()),
            ),
        ],
    );

    ctx.add_element(pipeline_version, false);
    ctx.add_relation(pvr, pipeline_version, EdgeKind::Specialization, vec![]);

    if let Some(parent_pvr) = parent_pipeline_version_revision {
        ctx.add_element(parent_pvr, false);
        ctx.add_relation(pvr, parent_pvr, EdgeKind::Revision, vec![]);
        ctx.add_relation(
            pipeline_change,
            parent_pvr,
            EdgeKind::Usage,
            vec![
                ("prov:time".into(), AttrValue::Time(pipeline_change.time)),
                (
                    "prov:role".into(),
                    AttrValue::Str(prov_role::USED_PARENT_PIPELINE_VERSION_REVISION.to_string()),
                ),
            ],
        );
    }
}

/// 1. PipelineVersionCreation (genesis / branch birth).
pub fn build_pipeline_version_creation(
    pipeline_version: &PipelineVersion,
    pipeline_version_creation: &PipelineVersionCreation,
    parent_pipeline_version: Option<&PipelineVersion>,
    parent_pipeline_version_revision: Option<&PipelineVersionRevision>,
    parent_pipeline_version_creation: Option<&PipelineVersionCreation>,
) -> ProvDocument {
    let mut ctx = ProvContext::new();

    ctx.add_element(pipeline_version_creation, false);
    if let Some(parent_creation) = parent_pipeline_version_creation {
        ctx.add_element(parent_creation, false);
        ctx.add_relation(
            pipeline_version_creation,
            parent_creation,
            EdgeKind::Communication,
            vec![],
        );
    }

    let pvr = &pipeline_version_creation.pipeline_version_revision;
    ctx.add_element(pvr, false);
    for op_rev in &pvr.operators {
        ctx.add_element(op_rev, false);
        ctx.add_relation(pvr, op_rev, EdgeKind::Membership, vec![]);
        let operator = fake_operator_from_revision(op_rev);
        ctx.add_element(&operator, false);
        ctx.add_relation(op_rev, &operator, EdgeKind::Specialization, vec![]);
    }
    for conn in &pvr.connections {
        ctx.add_element(conn, false);
        ctx.add_relation(pvr, conn, EdgeKind::Membership, vec![]);
    }
    ctx.add_relation(
        pvr,
        pipeline_version_creation,
        EdgeKind::Generation,
        vec![
            ("prov:time".into(), AttrValue::Time(pipeline_version_creation.time)),
            (
                "prov:role".into(),
                AttrValue::Str(prov_role::CREATED_PIPELINE_VERSION_REVISION.to_string()),
            ),
        ],
    );

    if let Some(parent_pvr) = parent_pipeline_version_revision {
        ctx.add_element(parent_pvr, false);
        ctx.add_relation(pvr, parent_pvr, EdgeKind::Derivation, vec![]);
        ctx.add_relation(
            pipeline_version_creation,
            parent_pvr,
            EdgeKind::Usage,
            vec![
                ("prov:time".into(), AttrValue::Time(pipeline_version_creation.time)),
                (
                    "prov:role".into(),
                    AttrValue::Str(prov_role::USED_PARENT_PIPELINE_VERSION_REVISION.to_string()),
                ),
            ],
        );
    }

    ctx.add_element(pipeline_version, false);
    ctx.add_relation(pvr, pipeline_version, EdgeKind::Specialization, vec![]);
    ctx.add_relation(
        pipeline_version,
        pipeline_version_creation,
        EdgeKind::Generation,
        vec![
            ("prov:time".into(), AttrValue::Time(pipeline_version_creation.time)),
            ("prov:role".into(), AttrValue::Str(prov_role::CREATED_PIPELINE_VERSION.to_string())),
        ],
    );

    // Gated on the parent *creation*, not merely the parent pipeline version:
    // a branch born off a change revision (no PipelineVersionCreation at its
    // tip) must not emit this version-level derivation/usage/specialization
    // trio, matching PipelineVersionCreationModel.build in the original.
    if let (Some(parent_version), Some(_)) = (parent_pipeline_version, parent_pipeline_version_creation) {
        ctx.add_element(parent_version, false);
        if let Some(parent_pvr) = parent_pipeline_version_revision {
            ctx.add_relation(parent_pvr, parent_version, EdgeKind::Specialization, vec![]);
        }
        ctx.add_relation(pipeline_version, parent_version, EdgeKind::Derivation, vec![]);
        ctx.add_relation(
            pipeline_version_creation,
            parent_version,
            EdgeKind::Usage,
            vec![
                ("prov:time".into(), AttrValue::Time(pipeline_version_creation.time)),
                ("prov:role".into(), AttrValue::Str(prov_role::USED_PARENT_PIPELINE_VERSION.to_string())),
            ],
        );
    }

    ctx.document
}

/// The genesis builder adds each initial `Operator` purely for
/// initialization convenience; it is reconstructed from the revision's
/// flattened `operator_id`/`operator_name` fields rather than carried as a
/// nested object (§9 — DAG references are opaque handles, not pointers).
fn fake_operator_from_revision(
    op_rev: &OperatorRevision,
) -> provgraph_domain::model::Operator {
    provgraph_domain::model::Operator {
        id: op_rev.operator_id,
        name: op_rev.operator_name.clone(),
    }
}

/// 2. OperatorCreation.
pub fn build_operator_creation(
    pipeline_change: &PipelineChange,
    pipeline_version: &PipelineVersion,
    parent_pipeline_change: Option<&PipelineChange>,
    parent_pipeline_version_revision: Option<&PipelineVersionRevision>,
) -> ProvDocument {
    let operator_revision = pipeline_change
        .payload
        .operator_revision()
        .expect("OperatorCreation change must carry an operator revision");

    let mut ctx = ProvContext::new();
    ctx.add_element(operator_revision, false);
    ctx.add_relation(
        operator_revision,
        pipeline_change,
        EdgeKind::Generation,
        vec![
            ("prov:time".into(), AttrValue::Time(pipeline_change.time)),
            ("prov:role".into(), AttrValue::Str(prov_role::CREATED_OPERATOR.to_string())),
        ],
    );
    let operator = fake_operator_from_revision(operator_revision);
    ctx.add_element(&operator, false);
    ctx.add_relation(operator_revision, &operator, EdgeKind::Specialization, vec![]);

    for parameter in &operator_revision.parameters {
        ctx.add_element(parameter, false);
        ctx.add_relation(operator_revision, parameter, EdgeKind::Membership, vec![]);
    }

    add_change_common_frame(
        &mut ctx,
        pipeline_change,
        parent_pipeline_change,
        pipeline_version,
        parent_pipeline_version_revision,
    );

    ctx.document
}

/// 3. OperatorModification.
pub fn build_operator_modification(
    pipeline_change: &PipelineChange,
    pipeline_version: &PipelineVersion,
    parent_pipeline_change: Option<&PipelineChange>,
    parent_operator_revision: Option<&OperatorRevision>,
    parent_pipeline_version_revision: Option<&PipelineVersionRevision>,
) -> ProvDocument {
    let operator_revision = pipeline_change
        .payload
        .operator_revision()
        .expect("OperatorModification change must carry an operator revision");

    let mut ctx = ProvContext::new();
    ctx.add_element(operator_revision, false);
    ctx.add_relation(
        operator_revision,
        pipeline_change,
        EdgeKind::Generation,
        vec![
            ("prov:time".into(), AttrValue::Time(pipeline_change.time)),
            ("prov:role".into(), AttrValue::Str(prov_role::MODIFIED_OPERATOR.to_string())),
        ],
    );

    if let Some(parent_op_rev) = parent_operator_revision {
        ctx.add_element(parent_op_rev, false);
        ctx.add_relation(operator_revision, parent_op_rev, EdgeKind::Revision, vec![]);
        ctx.add_relation(
            pipeline_change,
            parent_op_rev,
            EdgeKind::Usage,
            vec![
                ("prov:time".into(), AttrValue::Time(pipeline_change.time)),
                (
                    "prov:role".into(),
                    AttrValue::Str(prov_role::USED_PARENT_OPERATOR_REVISION.to_string()),
                ),
            ],
        );
    }

    let operator = fake_operator_from_revision(operator_revision);
    ctx.add_element(&operator, false);
    ctx.add_relation(operator_revision, &operator, EdgeKind::Specialization, vec![]);

    for parameter in &operator_revision.parameters {
        ctx.add_element(parameter, false);
        ctx.add_relation(operator_revision, parameter, EdgeKind::Membership, vec![]);
    }

    add_change_common_frame(
        &mut ctx,
        pipeline_change,
        parent_pipeline_change,
        pipeline_version,
        parent_pipeline_version_revision,
    );

    ctx.document
}

/// 4. OperatorDeletion.
pub fn build_operator_deletion(
    pipeline_change: &PipelineChange,
    pipeline_version: &PipelineVersion,
    parent_pipeline_change: Option<&PipelineChange>,
    parent_pipeline_version_revision: Option<&PipelineVersionRevision>,
) -> ProvDocument {
    let operator_revision = pipeline_change
        .payload
        .operator_revision()
        .expect("OperatorDeletion change must carry an operator revision");

    let mut ctx = ProvContext::new();
    ctx.add_element(operator_revision, false);
    ctx.add_relation(
        operator_revision,
        pipeline_change,
        EdgeKind::Invalidation,
        vec![
            ("prov:time".into(), AttrValue::Time(pipeline_change.time)),
            ("prov:role".into(), AttrValue::Str(prov_role::DELETED_OPERATOR.to_string())),
        ],
    );
    let operator = fake_operator_from_revision(operator_revision);
    ctx.add_element(&operator, false);
    ctx.add_relation(operator_revision, &operator, EdgeKind::Specialization, vec![]);

    add_change_common_frame(
        &mut ctx,
        pipeline_change,
        parent_pipeline_change,
        pipeline_version,
        parent_pipeline_version_revision,
    );

    ctx.document
}

/// 5. ConnectionCreation.
pub fn build_connection_creation(
    pipeline_change: &PipelineChange,
    pipeline_version: &PipelineVersion,
    parent_pipeline_change: Option<&PipelineChange>,
    parent_pipeline_version_revision: Option<&PipelineVersionRevision>,
) -> ProvDocument {
    let connection = pipeline_change
        .payload
        .connection()
        .expect("ConnectionCreation change must carry a connection");

    let mut ctx = ProvContext::new();
    ctx.add_element(connection, false);
    ctx.add_relation(
        connection,
        pipeline_change,
        EdgeKind::Generation,
        vec![
            ("prov:time".into(), AttrValue::Time(pipeline_change.time)),
            ("prov:role".into(), AttrValue::Str(prov_role::CREATED_CONNECTION.to_string())),
        ],
    );

    add_change_common_frame(
        &mut ctx,
        pipeline_change,
        parent_pipeline_change,
        pipeline_version,
        parent_pipeline_version_revision,
    );

    ctx.document
}

/// 6. ConnectionDeletion.
pub fn build_connection_deletion(
    pipeline_change: &PipelineChange,
    pipeline_version: &PipelineVersion,
    parent_pipeline_change: Option<&PipelineChange>,
    parent_pipeline_version_revision: Option<&PipelineVersionRevision>,
) -> ProvDocument {
    let connection = pipeline_change
        .payload
        .connection()
        .expect("ConnectionDeletion change must carry a connection");

    let mut ctx = ProvContext::new();
    ctx.add_element(connection, false);
    ctx.add_relation(
        connection,
        pipeline_change,
        EdgeKind::Invalidation,
        vec![
            ("prov:time".into(), AttrValue::Time(pipeline_change.time)),
            ("prov:role".into(), AttrValue::Str(prov_role::DELETED_CONNECTION.to_string())),
        ],
    );

    add_change_common_frame(
        &mut ctx,
        pipeline_change,
        parent_pipeline_change,
        pipeline_version,
        parent_pipeline_version_revision,
    );

    ctx.document
}

/// 7. OperatorExecution.
pub fn build_operator_execution(operator_execution: &OperatorExecution) -> ProvDocument {
    let mut ctx = ProvContext::new();

    ctx.add_element(operator_execution, false);

    let operator_revision = &operator_execution.operator_revision;
    for parameter in &operator_revision.parameters {
        ctx.add_element(parameter, false);
        ctx.add_relation(operator_revision, parameter, EdgeKind::Membership, vec![]);
    }
    ctx.add_element(operator_revision, false);
    ctx.add_relation(
        operator_execution,
        operator_revision,
        EdgeKind::Usage,
        vec![
            ("prov:time".into(), AttrValue::Time(operator_execution.time)),
            ("prov:role".into(), AttrValue::Str(prov_role::USED_OPERATOR_REVISION.to_string())),
        ],
    );

    let operator_run = &operator_execution.operator_run;
    ctx.add_element(operator_run, false);
    ctx.add_relation(
        operator_run,
        operator_execution,
        EdgeKind::Generation,
        vec![
            ("prov:time".into(), AttrValue::Time(operator_execution.time)),
            ("prov:role".into(), AttrValue::Str(prov_role::CREATED_OPERATOR_RUN.to_string())),
        ],
    );

    for metric in &operator_run.metrics {
        ctx.add_element(metric, false);
        ctx.add_relation(operator_run, metric, EdgeKind::Membership, vec![]);
        ctx.add_relation(operator_revision, metric, EdgeKind::Membership, vec![]);
    }

    ctx.document
}
