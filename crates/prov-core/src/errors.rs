//! Translator error taxonomy (§7).

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum TranslatorError {
    #[error("unknown enum value: {0}")]
    UnknownEnumValue(String),

    #[error("missing required parent: {0}")]
    MissingParentBranch(String),

    /// Constructed but never returned — duplicate `initialize()` is a
    /// recoverable warning (§7d), not a hard error. Kept as a variant so
    /// call sites that want to log structurally have a typed value to log.
    #[error("translator already initialized")]
    DuplicateInitialization,

    #[error("internal: {0}")]
    Internal(String),
}
