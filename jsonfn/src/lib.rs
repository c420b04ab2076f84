//! Selector-driven JSON projection.
//!
//! Callers pass an entity (or a slice of entities) and a flat list of selector
//! strings; the selectors are parsed into one merged selection tree and the
//! entity graph is walked along it:
//!
//! ```
//! use jsonfn::{marshal, serialize_fields, Entity, Relation};
//! use serde::Serialize;
//! use serde_json::Value;
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Author { id: u32, name: String }
//!
//! impl Entity for Author {
//!     fn plain_fields(&self) -> Result<Value, serde_json::Error> { serialize_fields(self) }
//! }
//!
//! #[derive(Serialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Book { id: u32, title: String, author_id: u32 }
//!
//! impl Entity for Book {
//!     fn plain_fields(&self) -> Result<Value, serde_json::Error> { serialize_fields(self) }
//!
//!     fn relation(&self, accessor: &str) -> Option<Relation> {
//!         match accessor {
//!             "Author" => Some(Relation::one(Author { id: self.author_id, name: "author2".into() })),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let book = Book { id: 1, title: "Jane Eyre".into(), author_id: 2 };
//! let json = marshal(&book, ["Id", "Title", "Author{Id,Name}"]).unwrap();
//! assert_eq!(
//!     String::from_utf8(json).unwrap(),
//!     r#"{"Author":{"Id":2,"Name":"author2"},"Id":1,"Title":"Jane Eyre"}"#
//! );
//! ```
//!
//! Layers:
//! - [`domain`]: selector grammar and the arena-backed selection tree
//! - [`application`]: entity capabilities, projector, marshalling entry points
//! - [`config`]: layered settings for the binary
//! - [`cli`]: the `jsonfn` command line

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{
    marshal, marshal_all, marshal_relation, serialize_fields, to_value, to_value_all, Entity, Marshaller,
    NamingConvention, NestedErrorPolicy, ProjectionError, ProjectionOptions, ProjectionResult,
    Projector, Relation, RelationRegistry,
};
pub use domain::{parse, SelectionTree, SelectorParser};
