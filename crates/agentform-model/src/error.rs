//! Error types for blueprint evaluation.

use thiserror::Error;

/// Result type alias for evaluation operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while evaluating a blueprint into a manifest.
///
/// Every variant is a synthesis-time failure. Evaluation either resolves
/// the whole blueprint or returns one of these before any output exists;
/// there is no partial-deployment state to report on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate resource: {0}")]
    DuplicateResource(String),

    #[error("duplicate compute unit: {0}")]
    DuplicateUnit(String),

    #[error("duplicate route: {method} {path}")]
    DuplicateRoute { method: String, path: String },

    #[error("unknown resource `{resource}` referenced by `{referrer}`")]
    UnknownResource { referrer: String, resource: String },

    #[error("unknown compute unit `{unit}` referenced by `{referrer}`")]
    UnknownUnit { referrer: String, unit: String },
}
