//! provgraph-core: stateful event-to-provenance translation.
//!
//! Components:
//! - `wire`: JSON-lines decoding of `Init`/`DebugStep` records into closed
//!   enums, accepting both casings the upstream debugger emits.
//! - `store`: an in-memory, type-partitioned object store of every domain
//!   record the translator has ever created.
//! - `builders`: seven pure functions, one per change shape, each producing
//!   a PROV document fragment from already-resolved records.
//! - `translator`: the stateful core (`Translator`) that resolves branches,
//!   applies changes, and hands them to the builders.
//! - `prov`: the in-memory PROV accumulator (`ProvContext`/`ProvDocument`)
//!   the builders write into.
//! - `errors`: the translator's error taxonomy.

pub mod builders;
pub mod errors;
pub mod prov;
pub mod store;
pub mod translator;
pub mod wire;

pub use errors::TranslatorError;
pub use prov::{AttrValue, EdgeKind, ProvContext, ProvDocument, ProvElement, ProvRecord, ProvRelation};
pub use store::{Record, RecordKind, Store};
pub use translator::{Translator, TranslatorConfig};
pub use wire::{decode_debug_step_line, decode_init_line, ChangeRecord, DebugStep, RawChangeRecord, RawDebugStep, RawMetric};
