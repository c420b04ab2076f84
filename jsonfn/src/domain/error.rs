//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors represent misuse of the selection tree.
/// Malformed selector strings are not errors; they are dropped while parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("selection node not found: {0:?}")]
    NodeNotFound(Index),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
