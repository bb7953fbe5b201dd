//! Graph Store Adapter (§4.7) — Bolt-protocol adapter shared by Neo4j- and
//! Memgraph-compatible stores, grounded on `storage/adapter.py::Adapter` /
//! `Neo4JAdapter` / `MemgraphAdapter` and `storage/database.py`'s
//! `ProvGraphDatabase::import_graph` / `clear` / `add_id_uniqueness_constraints`.
//!
//! Starting and stopping the backing database's own container
//! (`start_docker_container`/`stop_docker_container` in the upstream) is out
//! of scope (§1): this adapter only ever speaks Bolt to an already-running
//! store.

use std::collections::HashMap;
use std::time::Duration;

use neo4rs::{query as cypher, BoltType, Graph, RowStream};
use provgraph_adapters::{encode_graph, EncodedValue, GraphEdge, GraphNode};
use provgraph_core::prov::ProvDocument;
use tokio::time::sleep;

use crate::config::{BoltConfig, DbmsKind};
use crate::error::StoreError;

/// Property key used as the node merge key, mirroring `PROVINSPECTOR_ID`.
const PROVINSPECTOR_ID: &str = "provinspector:identifier";
/// Extra label every encoded node carries, mirroring `PROVINSPECTOR_NODE`.
const PROVINSPECTOR_NODE_LABEL: &str = "provinspector:node";

/// The shared surface both Bolt-compatible stores expose: import a document
/// fragment, wipe the graph, tear down the connection, or run a raw query.
#[async_trait::async_trait]
pub trait GraphAdapter {
    async fn import_graph(&self, doc: &ProvDocument) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
    async fn query(&self, cypher: &str) -> Result<RowStream, StoreError>;
    async fn shutdown(self) -> Result<(), StoreError>
    where
        Self: Sized;
}

/// A Bolt-protocol connection to a Neo4j- or Memgraph-compatible store.
pub struct BoltAdapter {
    graph: Graph,
    kind: DbmsKind,
}

impl BoltAdapter {
    /// Establishes a connection, retrying with a one-second delay up to
    /// `config.max_retries` times — mirroring `Adapter::connect`'s
    /// `for _ in range(retries): ... time.sleep(1)` loop. Once connected,
    /// ensures the uniqueness constraints the import relies on exist.
    pub async fn connect(config: &BoltConfig) -> Result<Self, StoreError> {
        let mut last_err = None;

        for attempt in 0..config.max_retries.max(1) {
            match Graph::new(&config.uri, &config.user, &config.password).await {
                Ok(graph) => {
                    let adapter = Self { graph, kind: config.kind };
                    adapter.ensure_uniqueness_constraints().await;
                    return Ok(adapter);
                }
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "bolt connect failed, retrying");
                    last_err = Some(err);
                    sleep(Duration::from_secs(1)).await;
                }
            }
        }

        Err(StoreError::Transient(
            last_err.map(|e| e.to_string()).unwrap_or_else(|| "exhausted retries".to_string()),
        ))
    }

    /// Mirrors `add_id_uniqueness_constraints`, creating one uniqueness
    /// constraint per PROV element class the encoder ever labels a node
    /// with (`Entity`, `Activity`). Best-effort: a constraint that already
    /// exists is not an error.
    async fn ensure_uniqueness_constraints(&self) {
        for label in ["Entity", "Activity"] {
            let stmt = constraint_cypher(self.kind, label);
            if let Err(err) = self.graph.run(cypher(&stmt)).await {
                tracing::debug!(label, error = %err, "uniqueness constraint not created (likely already present)");
            }
        }
    }
}

fn constraint_cypher(kind: DbmsKind, label: &str) -> String {
    match kind {
        DbmsKind::Neo4j => {
            format!("CREATE CONSTRAINT IF NOT EXISTS FOR (n:`{label}`) REQUIRE n.`{PROVINSPECTOR_ID}` IS UNIQUE")
        }
        DbmsKind::Memgraph => {
            format!("CREATE CONSTRAINT ON (n:`{label}`) ASSERT n.`{PROVINSPECTOR_ID}` IS UNIQUE")
        }
    }
}

#[async_trait::async_trait]
impl GraphAdapter for BoltAdapter {
    async fn import_graph(&self, doc: &ProvDocument) -> Result<(), StoreError> {
        let encoded = encode_graph(doc);
        let txn = self.graph.start_txn().await?;

        for (label, nodes) in group_by_label(&encoded.nodes, |n| n.prov_class_label) {
            let rows: Vec<BoltType> = nodes.iter().map(|n| node_to_bolt(n)).collect();
            let stmt = merge_nodes_cypher(label);
            txn.run(cypher(&stmt).param("rows", rows)).await?;
        }

        for (label, edges) in group_by_label(&encoded.edges, |e| e.label) {
            let rows: Vec<BoltType> = edges.iter().map(|e| edge_to_bolt(e)).collect();
            let stmt = merge_edges_cypher(label);
            txn.run(cypher(&stmt).param("rows", rows)).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// `MATCH (n) DETACH DELETE n`, identical to the upstream's `clear`.
    async fn clear(&self) -> Result<(), StoreError> {
        self.graph.run(cypher("MATCH (n) DETACH DELETE n")).await?;
        Ok(())
    }

    async fn query(&self, stmt: &str) -> Result<RowStream, StoreError> {
        Ok(self.graph.execute(cypher(stmt)).await?)
    }

    /// `neo4rs::Graph` has no explicit close call; dropping the handle tears
    /// down its connection pool, mirroring `Adapter::disconnect`.
    async fn shutdown(self) -> Result<(), StoreError> {
        drop(self.graph);
        Ok(())
    }
}

/// `GraphAdapter::connect` against Neo4j defaults.
pub async fn connect_neo4j(config: &BoltConfig) -> Result<BoltAdapter, StoreError> {
    debug_assert_eq!(config.kind, DbmsKind::Neo4j);
    BoltAdapter::connect(config).await
}

/// `GraphAdapter::connect` against Memgraph defaults.
pub async fn connect_memgraph(config: &BoltConfig) -> Result<BoltAdapter, StoreError> {
    debug_assert_eq!(config.kind, DbmsKind::Memgraph);
    BoltAdapter::connect(config).await
}

fn group_by_label<'a, T>(
    items: &'a [T],
    label_of: impl Fn(&'a T) -> &'static str,
) -> HashMap<&'static str, Vec<&'a T>> {
    let mut groups: HashMap<&'static str, Vec<&T>> = HashMap::new();
    for item in items {
        groups.entry(label_of(item)).or_default().push(item);
    }
    groups
}

fn merge_nodes_cypher(label: &str) -> String {
    format!(
        "UNWIND $rows AS row \
         MERGE (n:`{PROVINSPECTOR_NODE_LABEL}`:`{label}` {{`{PROVINSPECTOR_ID}`: row.`{PROVINSPECTOR_ID}`}}) \
         SET n += row"
    )
}

fn merge_edges_cypher(label: &str) -> String {
    format!(
        "UNWIND $rows AS row \
         MATCH (s {{`{PROVINSPECTOR_ID}`: row.source}}), (t {{`{PROVINSPECTOR_ID}`: row.target}}) \
         MERGE (s)-[r:`{label}`]->(t) \
         SET r += row.props"
    )
}

fn node_to_bolt(node: &GraphNode) -> BoltType {
    let mut map: HashMap<String, BoltType> = HashMap::new();
    map.insert(PROVINSPECTOR_ID.to_string(), BoltType::from(node.identifier.clone()));
    for (key, value) in &node.properties {
        map.insert(key.clone(), to_bolt(value));
    }
    BoltType::from(map)
}

fn edge_to_bolt(edge: &GraphEdge) -> BoltType {
    let mut props: HashMap<String, BoltType> = HashMap::new();
    for (key, value) in &edge.properties {
        props.insert(key.clone(), to_bolt(value));
    }
    if let Some(id) = &edge.identifier {
        props.insert(PROVINSPECTOR_ID.to_string(), BoltType::from(id.clone()));
    }

    let mut map: HashMap<String, BoltType> = HashMap::new();
    map.insert("source".to_string(), BoltType::from(edge.source.clone()));
    map.insert("target".to_string(), BoltType::from(edge.target.clone()));
    map.insert("props".to_string(), BoltType::from(props));
    BoltType::from(map)
}

fn to_bolt(value: &EncodedValue) -> BoltType {
    match value {
        EncodedValue::Str(s) => BoltType::from(s.clone()),
        EncodedValue::Int(i) => BoltType::from(*i),
        EncodedValue::Float(f) => BoltType::from(*f),
        EncodedValue::Time(t) => BoltType::from(t.to_rfc3339()),
        EncodedValue::List(items) => BoltType::from(items.iter().map(to_bolt).collect::<Vec<_>>()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provgraph_adapters::GraphNode;

    fn node(id: &str, label: &'static str) -> GraphNode {
        GraphNode {
            identifier: id.to_string(),
            element_kind: provgraph_core::prov::ProvElementKind::Entity,
            prov_class_label: label,
            properties: HashMap::new(),
        }
    }

    #[test]
    fn group_by_label_splits_nodes_by_class() {
        let nodes = vec![node("a", "Entity"), node("b", "Activity"), node("c", "Entity")];
        let groups = group_by_label(&nodes, |n| n.prov_class_label);

        assert_eq!(groups.get("Entity").map(|g| g.len()), Some(2));
        assert_eq!(groups.get("Activity").map(|g| g.len()), Some(1));
    }

    #[test]
    fn merge_nodes_cypher_references_both_labels() {
        let stmt = merge_nodes_cypher("Entity");
        assert!(stmt.contains(PROVINSPECTOR_NODE_LABEL));
        assert!(stmt.contains("Entity"));
        assert!(stmt.contains(PROVINSPECTOR_ID));
    }

    #[test]
    fn neo4j_and_memgraph_constraint_syntax_differ() {
        assert!(constraint_cypher(DbmsKind::Neo4j, "Entity").contains("IF NOT EXISTS"));
        assert!(!constraint_cypher(DbmsKind::Memgraph, "Entity").contains("IF NOT EXISTS"));
    }
}
