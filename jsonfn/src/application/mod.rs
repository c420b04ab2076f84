//! Application layer: entities, projection and marshalling
//!
//! This layer walks entity graphs guided by a domain selection tree.

pub mod entity;
pub mod error;
pub mod json;
pub mod marshal;
pub mod options;
pub mod projector;
pub mod registry;

pub use entity::{serialize_fields, Entity, Relation};
pub use error::{ProjectionError, ProjectionResult};
pub use marshal::{marshal, marshal_all, marshal_relation, to_value, to_value_all, Marshaller};
pub use options::{upper_first, NamingConvention, NestedErrorPolicy, ProjectionOptions};
pub use projector::Projector;
pub use registry::RelationRegistry;
