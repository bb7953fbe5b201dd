//! Errores de persistencia.
//! Mapea errores del cliente Bolt a variantes semánticas del adaptador (§4.7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transient: {0}")]
    Transient(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
}

impl From<neo4rs::Error> for StoreError {
    fn from(err: neo4rs::Error) -> Self {
        Self::QueryFailed(err.to_string())
    }
}
