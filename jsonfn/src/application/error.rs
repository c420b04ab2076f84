//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Projection errors wrap domain errors and add entity-level failures.
///
/// `path` names the relation chain from the projected root, e.g. `$.Author.Country`.
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("cannot decode plain fields at {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("plain fields at {path} are not a map (found {found})")]
    Shape { path: String, found: &'static str },

    #[error("relation depth limit {limit} exceeded at {path}")]
    DepthExceeded { path: String, limit: usize },

    #[error("cannot encode projection: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ProjectionError {
    /// Decode and shape failures come from the entity itself.
    pub fn is_entity_failure(&self) -> bool {
        matches!(
            self,
            ProjectionError::Decode { .. } | ProjectionError::Shape { .. }
        )
    }
}

/// Result type for projection operations.
pub type ProjectionResult<T> = Result<T, ProjectionError>;
