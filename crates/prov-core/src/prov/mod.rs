//! PROV Document Builder (§4.2).

mod context;
mod document;
mod elements;

pub use context::ProvContext;
pub use document::{AttrValue, EdgeKind, ProvDocument, ProvElement, ProvElementKind, ProvRelation};
pub use elements::ProvRecord;
