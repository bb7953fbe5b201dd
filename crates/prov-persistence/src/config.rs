//! Carga de configuración de conexión Bolt desde variables de entorno.
//! Usa convención `PROVGRAPH_BOLT_*`, con valores por defecto que dependen
//! del tipo de motor (§4.7).

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Which Bolt-compatible engine a [`BoltConfig`] targets. Both variants
/// share the same adapter code path; only the defaults below and the
/// constraint-creation syntax differ, mirroring the upstream's
/// `Neo4JAdapter`/`MemgraphAdapter` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbmsKind {
    Neo4j,
    Memgraph,
}

impl DbmsKind {
    fn default_user(self) -> &'static str {
        match self {
            DbmsKind::Neo4j => "neo4j",
            DbmsKind::Memgraph => "",
        }
    }

    fn default_password(self) -> &'static str {
        match self {
            DbmsKind::Neo4j => "neo4jneo4j",
            DbmsKind::Memgraph => "",
        }
    }

    fn default_database(self) -> &'static str {
        match self {
            DbmsKind::Neo4j => "neo4j",
            DbmsKind::Memgraph => "memgraph",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BoltConfig {
    pub kind: DbmsKind,
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_retries: u32,
}

impl BoltConfig {
    /// Builds configuration for `kind`, reading `PROVGRAPH_BOLT_URI` /
    /// `PROVGRAPH_BOLT_USER` / `PROVGRAPH_BOLT_PASSWORD` /
    /// `PROVGRAPH_BOLT_DATABASE` / `PROVGRAPH_BOLT_MAX_RETRIES`, falling back
    /// to `kind`'s defaults for anything unset. The container lifecycle the
    /// upstream manages alongside these defaults (`start_docker_container`)
    /// is out of scope here: this only describes how to reach an
    /// already-running store.
    pub fn from_env(kind: DbmsKind) -> Self {
        Lazy::force(&DOTENV_LOADED);
        let uri = env::var("PROVGRAPH_BOLT_URI").unwrap_or_else(|_| "bolt://127.0.0.1:7687".to_string());
        let user = env::var("PROVGRAPH_BOLT_USER").unwrap_or_else(|_| kind.default_user().to_string());
        let password =
            env::var("PROVGRAPH_BOLT_PASSWORD").unwrap_or_else(|_| kind.default_password().to_string());
        let database =
            env::var("PROVGRAPH_BOLT_DATABASE").unwrap_or_else(|_| kind.default_database().to_string());
        let max_retries = env::var("PROVGRAPH_BOLT_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);
        Self { kind, uri, user, password, database, max_retries }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neo4j_defaults_match_upstream_container_defaults() {
        std::env::remove_var("PROVGRAPH_BOLT_USER");
        std::env::remove_var("PROVGRAPH_BOLT_PASSWORD");
        std::env::remove_var("PROVGRAPH_BOLT_DATABASE");
        let cfg = BoltConfig::from_env(DbmsKind::Neo4j);
        assert_eq!(cfg.user, "neo4j");
        assert_eq!(cfg.password, "neo4jneo4j");
        assert_eq!(cfg.database, "neo4j");
    }

    #[test]
    fn memgraph_defaults_use_empty_credentials() {
        std::env::remove_var("PROVGRAPH_BOLT_USER");
        std::env::remove_var("PROVGRAPH_BOLT_PASSWORD");
        std::env::remove_var("PROVGRAPH_BOLT_DATABASE");
        let cfg = BoltConfig::from_env(DbmsKind::Memgraph);
        assert_eq!(cfg.user, "");
        assert_eq!(cfg.password, "");
        assert_eq!(cfg.database, "memgraph");
    }
}
