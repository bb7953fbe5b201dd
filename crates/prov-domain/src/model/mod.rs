//! The ten domain record types (§3) plus `PipelineChange`'s discriminated
//! payload. Every type is immutable once created — "modification" always
//! means creating a new revision record that points back to the prior one.

mod connection;
mod metric;
mod operator;
mod operator_execution;
mod operator_revision;
mod operator_run;
mod parameter;
mod pipeline_change;
mod pipeline_version;
mod pipeline_version_creation;
mod pipeline_version_revision;

pub use connection::Connection;
pub use metric::Metric;
pub use operator::Operator;
pub use operator_execution::OperatorExecution;
pub use operator_revision::OperatorRevision;
pub use operator_run::OperatorRun;
pub use parameter::Parameter;
pub use pipeline_change::{PipelineChange, PipelineChangePayload};
pub use pipeline_version::PipelineVersion;
pub use pipeline_version_creation::PipelineVersionCreation;
pub use pipeline_version_revision::PipelineVersionRevision;
