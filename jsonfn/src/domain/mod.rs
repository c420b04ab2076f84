//! Domain layer: selector grammar and the selection tree
//!
//! This layer is independent of external concerns (no entities, no I/O, no config loading).

pub mod error;
pub mod parser;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use parser::{parse, Selector, SelectorParser, DEFAULT_MAX_DEPTH};
pub use tree::{SelectionNode, SelectionTree, TreeIterator, WILDCARD};
