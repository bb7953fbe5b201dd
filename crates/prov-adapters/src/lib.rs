//! provgraph-adapters: Graph Encoder (§4.6).
//!
//! Lowers a `provgraph-core::prov::ProvDocument` fragment into the
//! node/edge shape a property-graph store can `MERGE`, ready for
//! `provgraph-persistence` to hand to a Bolt client.

pub mod encoder;

pub use encoder::{encode_graph, EncodedGraph, EncodedValue, GraphEdge, GraphNode};
