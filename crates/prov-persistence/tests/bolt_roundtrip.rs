use provgraph_adapters::encode_graph;
use provgraph_core::prov::{AttrValue, ProvDocument, ProvElement, ProvElementKind};
use provgraph_persistence::{connect_neo4j, BoltConfig, DbmsKind, GraphAdapter};

// Against a live store only: export `PROVGRAPH_BOLT_URI` (and friends) to
// point at a running Neo4j or Memgraph instance before running this test.
#[tokio::test]
async fn import_then_clear_roundtrip() {
    if std::env::var("PROVGRAPH_BOLT_URI").is_err() {
        eprintln!("skip (no PROVGRAPH_BOLT_URI)");
        return;
    }

    let config = BoltConfig::from_env(DbmsKind::Neo4j);
    let adapter = connect_neo4j(&config).await.expect("connect");

    let doc = ProvDocument {
        elements: vec![ProvElement {
            identifier: "operator:bolt-roundtrip-test".to_string(),
            kind: ProvElementKind::Entity,
            prov_types: vec!["Operator"],
            attributes: vec![("name".to_string(), AttrValue::Str("roundtrip".to_string()))],
        }],
        relations: vec![],
    };
    assert_eq!(encode_graph(&doc).nodes.len(), 1);

    adapter.import_graph(&doc).await.expect("import");
    adapter.clear().await.expect("clear");
    adapter.shutdown().await.expect("shutdown");
}
