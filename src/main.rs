//! provgraph-demo
//!
//! Drives a small hand-built pipeline trace end to end through the
//! translator and the graph encoder, printing what a real event stream
//! would produce. If `PROVGRAPH_BOLT_URI` is set, the resulting document is
//! also imported into a live Neo4j-compatible store; otherwise that step is
//! skipped and only the in-memory result is shown.

use provgraph_core::prov::ProvDocument;
use provgraph_core::translator::{Translator, TranslatorConfig};
use provgraph_core::wire::{ChangeRecord, DebugStep, RawMetric};
use provgraph_domain::constants::OperatorStepType;

fn sample_init() -> Vec<ChangeRecord> {
    let mut op_data = serde_json::Map::new();
    op_data.insert("learning_rate".to_string(), serde_json::json!(0.1));

    vec![
        ChangeRecord::OperatorCreation { op_id: 1, op_name: "source".to_string(), op_data: Default::default() },
        ChangeRecord::OperatorCreation { op_id: 2, op_name: "classifier".to_string(), op_data },
        ChangeRecord::ConnectionCreation { con_id: 1, from_op_id: 1, to_op_id: 2 },
    ]
}

fn sample_steps() -> Vec<DebugStep> {
    vec![DebugStep {
        unique_step_id: "step-1".to_string(),
        time: chrono::Utc::now(),
        branch_id: 0,
        step_id: 0,
        parent_branch_id: None,
        operator_id: 2,
        operator_name: "classifier".to_string(),
        step_type: OperatorStepType::OnOpExecuted,
        metrics: vec![RawMetric { name: "loss".to_string(), value: 0.42 }],
        changes: None,
    }]
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    provgraph_persistence::init_dotenv();

    let mut translator = Translator::new(TranslatorConfig::default());
    let mut document = ProvDocument::new();
    document.merge(translator.initialize(&sample_init()));

    for step in sample_steps() {
        match translator.update(step) {
            Ok(fragment) => document.merge(fragment),
            Err(err) => {
                tracing::error!(error = %err, "failed to apply debug step");
                return;
            }
        }
    }

    println!("PROV elements: {}", document.elements.len());
    println!("PROV relations: {}", document.relations.len());

    let encoded = provgraph_adapters::encode_graph(&document);
    println!("graph nodes: {}", encoded.nodes.len());
    println!("graph edges: {}", encoded.edges.len());

    let Ok(bolt_uri) = std::env::var("PROVGRAPH_BOLT_URI") else {
        println!("PROVGRAPH_BOLT_URI not set; skipping live import");
        return;
    };

    use provgraph_persistence::{connect_neo4j, BoltConfig, DbmsKind, GraphAdapter};
    println!("connecting to {bolt_uri}...");
    let config = BoltConfig::from_env(DbmsKind::Neo4j);
    match connect_neo4j(&config).await {
        Ok(adapter) => {
            if let Err(err) = adapter.import_graph(&document).await {
                tracing::error!(error = %err, "import failed");
                return;
            }
            println!("imported {} nodes and {} edges", encoded.nodes.len(), encoded.edges.len());
            let _ = adapter.shutdown().await;
        }
        Err(err) => tracing::error!(error = %err, "connect failed"),
    }
}
