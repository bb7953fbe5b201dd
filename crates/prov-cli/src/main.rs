//! provgraph-cli: Command Line Interface for the provenance translator
//!
//! This is a thin binary that wires the library crates together: read
//! newline-delimited JSON, feed the translator, optionally carry the
//! resulting document into a connected graph store. For library usage
//! beyond this demonstration, see `provgraph-core`/`provgraph-persistence`
//! directly.

use std::io::{self, BufRead};

use provgraph_core::translator::{Translator, TranslatorConfig};
use provgraph_core::wire::{decode_debug_step_line, decode_init_line, ChangeRecord};
use provgraph_core::ProvDocument;
use provgraph_persistence::{connect_memgraph, connect_neo4j, BoltConfig, DbmsKind, GraphAdapter};

struct Args {
    input_path: Option<String>,
    persist: bool,
    memgraph: bool,
    clear_first: bool,
    query: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args { input_path: None, persist: false, memgraph: false, clear_first: false, query: None };
    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--bolt" => args.persist = true,
            "--memgraph" => {
                args.persist = true;
                args.memgraph = true;
            }
            "--clear" => args.clear_first = true,
            "--query" => args.query = raw.next(),
            path => args.input_path = Some(path.to_string()),
        }
    }
    args
}

/// Every line is either a debug step (`uniqueStepID` present) or an
/// initialization change record (`updateType` present, no `uniqueStepID`).
/// The wire format does not otherwise frame the two apart, so lines are
/// sniffed by shape as they arrive.
enum WireLine {
    Init(ChangeRecord),
    Step(provgraph_core::wire::DebugStep),
}

fn sniff_and_decode(line: &str) -> Result<WireLine, provgraph_core::TranslatorError> {
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| provgraph_core::TranslatorError::Internal(format!("malformed json line: {e}")))?;

    if value.get("uniqueStepID").is_some() {
        decode_debug_step_line(line).map(WireLine::Step)
    } else {
        decode_init_line(line).map(WireLine::Init)
    }
}

fn read_lines(path: Option<&str>) -> io::Result<Vec<String>> {
    let lines: Vec<String> = match path {
        Some(path) => {
            let file = std::fs::File::open(path)?;
            io::BufReader::new(file).lines().collect::<io::Result<_>>()?
        }
        None => io::stdin().lock().lines().collect::<io::Result<_>>()?,
    };
    Ok(lines.into_iter().filter(|l| !l.trim().is_empty()).collect())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    provgraph_persistence::init_dotenv();

    let args = parse_args();

    let lines = match read_lines(args.input_path.as_deref()) {
        Ok(lines) => lines,
        Err(err) => {
            tracing::error!(error = %err, "failed to read input");
            std::process::exit(1);
        }
    };

    let mut inits = Vec::new();
    let mut steps = Vec::new();
    for line in &lines {
        match sniff_and_decode(line) {
            Ok(WireLine::Init(change)) => inits.push(change),
            Ok(WireLine::Step(step)) => steps.push(step),
            Err(err) => {
                tracing::error!(error = %err, line = %line, "failed to decode input line");
                std::process::exit(1);
            }
        }
    }

    let mut translator = Translator::new(TranslatorConfig::default());
    let mut document = ProvDocument::new();
    document.merge(translator.initialize(&inits));

    for step in steps {
        let step_id = step.unique_step_id.clone();
        match translator.update(step) {
            Ok(fragment) => document.merge(fragment),
            Err(err) => {
                tracing::error!(error = %err, step = %step_id, "failed to apply debug step");
                std::process::exit(1);
            }
        }
    }

    tracing::info!(
        elements = document.elements.len(),
        relations = document.relations.len(),
        "translation complete"
    );

    if !args.persist {
        return;
    }

    let kind = if args.memgraph { DbmsKind::Memgraph } else { DbmsKind::Neo4j };
    let config = BoltConfig::from_env(kind);
    let adapter_result =
        if args.memgraph { connect_memgraph(&config).await } else { connect_neo4j(&config).await };

    let adapter = match adapter_result {
        Ok(adapter) => adapter,
        Err(err) => {
            tracing::error!(error = %err, "failed to connect to graph store");
            std::process::exit(1);
        }
    };

    if args.clear_first {
        if let Err(err) = adapter.clear().await {
            tracing::error!(error = %err, "failed to clear graph store");
            std::process::exit(1);
        }
    }

    if let Err(err) = adapter.import_graph(&document).await {
        tracing::error!(error = %err, "failed to import graph");
        std::process::exit(1);
    }
    tracing::info!("graph imported");

    if let Some(cypher) = &args.query {
        match adapter.query(cypher).await {
            Ok(mut rows) => {
                let mut count = 0;
                while let Ok(Some(_row)) = rows.next().await {
                    count += 1;
                }
                tracing::info!(rows = count, "query complete");
            }
            Err(err) => tracing::error!(error = %err, "query failed"),
        }
    }

    if let Err(err) = adapter.shutdown().await {
        tracing::error!(error = %err, "failed to shut down graph store connection");
    }
}
