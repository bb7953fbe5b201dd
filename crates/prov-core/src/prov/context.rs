//! `ProvContext` — the per-builder accumulator (§4.2).

use super::document::{AttrValue, EdgeKind, ProvDocument, ProvElement, ProvRelation};
use super::elements::ProvRecord;

#[derive(Debug, Default)]
pub struct ProvContext {
    pub document: ProvDocument,
}

impl ProvContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a node exists for `record`. With `dedupe = true`, a
    /// pre-existing record with the same identifier is left untouched and
    /// its identifier returned without inserting a second element.
    pub fn add_element<T: ProvRecord>(&mut self, record: &T, dedupe: bool) -> String {
        let identifier = record.prov_identifier();

        if dedupe && self.document.elements.iter().any(|e| e.identifier == identifier) {
            return identifier;
        }

        self.document.elements.push(ProvElement {
            identifier: identifier.clone(),
            kind: record.prov_kind(),
            prov_types: record.prov_types(),
            attributes: record.prov_attributes(),
        });

        identifier
    }

    /// Emit a typed edge between two already-added records. Edge
    /// identifiers are deterministic (`relation:<source>:<target>`) except
    /// for specialization and membership, which carry none. A `Revision`
    /// edge additionally asserts the PROV "Revision" type — modeled here by
    /// the `EdgeKind::Revision` variant itself rather than a bolted-on flag.
    pub fn add_relation<S: ProvRecord, D: ProvRecord>(
        &mut self,
        source: &S,
        target: &D,
        kind: EdgeKind,
        extra_attributes: Vec<(String, AttrValue)>,
    ) -> ProvRelation {
        let source_id = source.prov_identifier();
        let target_id = target.prov_identifier();

        let identifier = match kind {
            EdgeKind::Specialization | EdgeKind::Membership => None,
            _ => Some(format!("relation:{source_id}:{target_id}")),
        };

        let relation = ProvRelation {
            identifier,
            kind,
            source: source_id,
            target: target_id,
            attributes: extra_attributes,
        };

        self.document.relations.push(relation.clone());
        relation
    }
}
