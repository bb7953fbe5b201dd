//! Graph Encoder (§4.6) — flattens a [`ProvDocument`] fragment into the
//! node/edge shape a property-graph `MERGE` can consume, grounded on
//! `storage/database.py`'s `encode_graph`/`encode_nodes`/`encode_edges`.
//!
//! The upstream encoder walks a PROV-library document via BFS over bundles
//! because that document can nest named bundles and can route a relation's
//! target straight at a Python literal. Neither applies here: every
//! [`ProvDocument`] this crate produces is already flat (no bundles) and
//! every relation connects two already-added elements, so the encoder is a
//! single pass over `elements`/`relations` rather than a traversal.
//!
//! Node labels are the PROV *element class* only (`Entity` or `Activity`,
//! mirroring the original's `NODE_LABELS` table keyed by
//! `ProvActivity`/`ProvAgent`/`ProvBundle`/`ProvEntity`), not the domain
//! type (`OperatorRevision`, `Operator`, ...). The domain type(s) asserted
//! on a record are instead carried as a `prov:type` property — single-valued
//! for most records, list-valued for `OperatorRun` (which asserts both
//! `OperatorRun` and `prov:Collection`), matching `NodePropertySet`'s single
//! `(PROVINSPECTOR_LABEL, node_label(node))` tuple plus `node.attributes`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use provgraph_core::prov::{AttrValue, ProvDocument, ProvElementKind};

/// Primary label every encoded node carries, mirroring `PROVINSPECTOR_NODE`.
pub const PROVINSPECTOR_NODE_LABEL: &str = "provinspector:node";
/// Property key used as the node merge key, mirroring `PROVINSPECTOR_ID`.
pub const PROVINSPECTOR_ID: &str = "provinspector:identifier";
/// Property key the domain type(s) of a node are asserted under.
pub const PROV_TYPE_KEY: &str = "prov:type";

/// The PROV-N class label of a node, i.e. what `NODE_LABELS` maps
/// `ProvActivity`/`ProvEntity` to. Our element kinds never include
/// `ProvAgent`/`ProvBundle` — the translator creates neither.
fn prov_class_label(kind: ProvElementKind) -> &'static str {
    match kind {
        ProvElementKind::Entity => "Entity",
        ProvElementKind::Activity => "Activity",
    }
}

/// A property value once lowered to a graph-database primitive. Lists
/// arise when a property key occurs more than once on the same element
/// (§4.6's "duplicate keys collapse into list-valued properties" rule) —
/// in practice this is only ever `prov:type` for multi-typed nodes like
/// `OperatorRun`.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedValue {
    Str(String),
    Int(i64),
    Float(f64),
    Time(DateTime<Utc>),
    List(Vec<EncodedValue>),
}

impl From<&AttrValue> for EncodedValue {
    fn from(v: &AttrValue) -> Self {
        match v {
            AttrValue::Str(s) => EncodedValue::Str(s.clone()),
            AttrValue::Int(i) => EncodedValue::Int(*i),
            AttrValue::Float(f) => EncodedValue::Float(*f),
            AttrValue::Time(t) => EncodedValue::Time(*t),
        }
    }
}

/// One PROV element lowered into a property-graph node. The node's graph
/// labels are `{provinspector:node, prov_class_label}`; `properties`
/// already contains the `prov:type` entry for the element's domain type(s).
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub identifier: String,
    pub element_kind: ProvElementKind,
    pub prov_class_label: &'static str,
    pub properties: HashMap<String, EncodedValue>,
}

/// One PROV relation lowered into a property-graph relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub identifier: Option<String>,
    pub label: &'static str,
    pub source: String,
    pub target: String,
    pub properties: HashMap<String, EncodedValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// Collapse a sequence of possibly-repeated-key tuples into a property map:
/// a key occurring exactly once stays scalar, a key occurring more than
/// once becomes list-valued, in first-seen order (`to_property_dict`).
fn collapse_duplicate_keys(pairs: Vec<(String, EncodedValue)>) -> HashMap<String, EncodedValue> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (k, _) in &pairs {
        *counts.entry(k.as_str()).or_insert(0) += 1;
    }

    let mut result: HashMap<String, EncodedValue> = HashMap::new();
    for (k, v) in pairs {
        if counts[k.as_str()] == 1 {
            result.insert(k, v);
        } else {
            match result.entry(k).or_insert_with(|| EncodedValue::List(Vec::new())) {
                EncodedValue::List(list) => list.push(v),
                existing => {
                    let prior = existing.clone();
                    *existing = EncodedValue::List(vec![prior, v]);
                }
            }
        }
    }
    result
}

/// `encode_nodes`. Builds one node per element identifier; a later element
/// with the same identifier overwrites an earlier one, matching the
/// upstream dict-keyed-by-id accumulation.
fn encode_nodes(doc: &ProvDocument) -> HashMap<String, GraphNode> {
    let mut nodes = HashMap::new();

    for element in &doc.elements {
        let mut pairs: Vec<(String, EncodedValue)> =
            element.attributes.iter().map(|(k, v)| (k.clone(), EncodedValue::from(v))).collect();
        for ty in &element.prov_types {
            pairs.push((PROV_TYPE_KEY.to_string(), EncodedValue::Str((*ty).to_string())));
        }

        let properties = collapse_duplicate_keys(pairs);

        nodes.insert(
            element.identifier.clone(),
            GraphNode {
                identifier: element.identifier.clone(),
                element_kind: element.kind,
                prov_class_label: prov_class_label(element.kind),
                properties,
            },
        );
    }

    nodes
}

/// `encode_edges`. Every relation here connects two elements already present
/// in `nodes` (builders never emit a relation to an un-added record), so
/// unlike the upstream there is no literal-endpoint case to fold into node
/// properties instead.
fn encode_edges(doc: &ProvDocument) -> Vec<GraphEdge> {
    doc.relations
        .iter()
        .map(|relation| {
            let pairs: Vec<(String, EncodedValue)> =
                relation.attributes.iter().map(|(k, v)| (k.clone(), EncodedValue::from(v))).collect();
            let properties = collapse_duplicate_keys(pairs);

            GraphEdge {
                identifier: relation.identifier.clone(),
                label: relation.kind.prov_n_name(),
                source: relation.source.clone(),
                target: relation.target.clone(),
                properties,
            }
        })
        .collect()
}

/// `encode_graph`. Flattens a document fragment into importable nodes and
/// edges.
pub fn encode_graph(doc: &ProvDocument) -> EncodedGraph {
    let nodes = encode_nodes(doc);
    let edges = encode_edges(doc);

    EncodedGraph { nodes: nodes.into_values().collect(), edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provgraph_core::prov::{EdgeKind, ProvElement, ProvRelation};

    fn element(id: &str, kind: ProvElementKind, types: Vec<&'static str>) -> ProvElement {
        ProvElement { identifier: id.to_string(), kind, prov_types: types, attributes: vec![] }
    }

    #[test]
    fn encode_graph_produces_one_node_per_identifier_with_class_label() {
        let doc = ProvDocument {
            elements: vec![element("a", ProvElementKind::Entity, vec!["Operator"])],
            relations: vec![],
        };

        let encoded = encode_graph(&doc);
        assert_eq!(encoded.nodes.len(), 1);
        assert_eq!(encoded.nodes[0].identifier, "a");
        assert_eq!(encoded.nodes[0].prov_class_label, "Entity");
        assert_eq!(
            encoded.nodes[0].properties.get(PROV_TYPE_KEY),
            Some(&EncodedValue::Str("Operator".into()))
        );
    }

    #[test]
    fn multi_typed_node_collapses_prov_type_into_a_list() {
        let doc = ProvDocument {
            elements: vec![element(
                "run1",
                ProvElementKind::Entity,
                vec!["OperatorRun", "prov:Collection"],
            )],
            relations: vec![],
        };

        let encoded = encode_graph(&doc);
        match encoded.nodes[0].properties.get(PROV_TYPE_KEY).unwrap() {
            EncodedValue::List(values) => {
                assert_eq!(
                    values,
                    &vec![
                        EncodedValue::Str("OperatorRun".into()),
                        EncodedValue::Str("prov:Collection".into())
                    ]
                );
            }
            other => panic!("expected a list-valued prov:type property, got {other:?}"),
        }
    }

    #[test]
    fn later_element_with_same_identifier_overwrites_earlier() {
        let mut first = element("a", ProvElementKind::Entity, vec!["Operator"]);
        first.attributes.push(("name".into(), AttrValue::Str("old".into())));
        let mut second = element("a", ProvElementKind::Entity, vec!["Operator"]);
        second.attributes.push(("name".into(), AttrValue::Str("new".into())));

        let doc = ProvDocument { elements: vec![first, second], relations: vec![] };
        let encoded = encode_graph(&doc);

        assert_eq!(encoded.nodes.len(), 1);
        assert_eq!(encoded.nodes[0].properties.get("name"), Some(&EncodedValue::Str("new".into())));
    }

    #[test]
    fn encode_edges_carries_label_and_attributes() {
        let doc = ProvDocument {
            elements: vec![
                element("a", ProvElementKind::Entity, vec!["Operator"]),
                element("b", ProvElementKind::Entity, vec!["Operator"]),
            ],
            relations: vec![ProvRelation {
                identifier: Some("relation:a:b".into()),
                kind: EdgeKind::Revision,
                source: "a".into(),
                target: "b".into(),
                attributes: vec![],
            }],
        };

        let encoded = encode_graph(&doc);
        assert_eq!(encoded.edges.len(), 1);
        assert_eq!(encoded.edges[0].label, "wasDerivedFrom");
        assert_eq!(encoded.edges[0].source, "a");
        assert_eq!(encoded.edges[0].target, "b");
    }
}
