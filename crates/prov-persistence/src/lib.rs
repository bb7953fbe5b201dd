//! provgraph-persistence
//!
//! Graph Store Adapter (§4.7). Carries a reconstructed `ProvDocument`
//! fragment over Bolt into a Neo4j- or Memgraph-compatible store, using
//! `neo4rs` as the wire client — the same role `py2neo` plays for the
//! upstream's `Adapter`/`ProvGraphDatabase` pair.
//!
//! Módulos:
//! - `config`: carga de configuración Bolt desde `.env`.
//! - `error`: errores semánticos del adaptador.
//! - `adapter`: implementación del contrato `GraphAdapter` sobre Bolt.

pub mod adapter;
pub mod config;
pub mod error;

pub use adapter::{connect_memgraph, connect_neo4j, BoltAdapter, GraphAdapter};
pub use config::{init_dotenv, BoltConfig, DbmsKind};
pub use error::StoreError;
