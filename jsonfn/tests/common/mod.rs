//! Shared fixtures: a small book catalogue entity graph
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use jsonfn::{serialize_fields, Entity, Relation, RelationRegistry};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author_id: u32,
    pub publisher_id: Option<u32>,
}

impl Book {
    pub fn jane_eyre() -> Self {
        Self {
            id: 1,
            title: "Jane Eyre".into(),
            author_id: 2,
            publisher_id: None,
        }
    }

    pub fn villette() -> Self {
        Self {
            id: 2,
            title: "Villette".into(),
            author_id: 2,
            publisher_id: Some(7),
        }
    }
}

fn book_relations() -> &'static RelationRegistry<Book> {
    static RELATIONS: OnceLock<RelationRegistry<Book>> = OnceLock::new();
    RELATIONS.get_or_init(|| {
        RelationRegistry::new()
            .register("Author", |b: &Book| Relation::one(Author::new(b.author_id)))
            .register("Tags", |_: &Book| {
                Relation::many(vec![Tag::new(1, "gothic"), Tag::new(2, "classic")])
            })
            .register("Publisher", |b: &Book| {
                Relation::optional(b.publisher_id.map(Publisher::new))
            })
    })
}

impl Entity for Book {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        book_relations().resolve(self, accessor)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Author {
    pub id: u32,
    pub name: String,
    pub country_id: u32,
}

impl Author {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: format!("author{}", id),
            country_id: 0,
        }
    }
}

impl Entity for Author {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }

    /// Adds the derived `DisplayName` whenever it is selected or all fields are kept.
    fn to_map(&self, mut map: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
        if fields.is_empty() || fields.contains(&"*") || fields.contains(&"DisplayName") {
            map.insert(
                "DisplayName".into(),
                Value::String(format!("{} (#{})", self.name, self.id)),
            );
        }
        map
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        match accessor {
            "Country" => Some(Relation::one(Country::new(self.country_id))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    pub id: u32,
    pub name: String,
}

impl Country {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            name: format!("country{}", id),
        }
    }
}

impl Entity for Country {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub id: u32,
    pub label: String,
}

impl Tag {
    pub fn new(id: u32, label: &str) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

impl Entity for Tag {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Publisher {
    pub id: u32,
}

impl Publisher {
    pub fn new(id: u32) -> Self {
        Self { id }
    }
}

impl Entity for Publisher {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }
}

/// Serializes to a map with non-string keys, which JSON cannot represent.
#[derive(Debug, Clone, Serialize)]
pub struct Ledger {
    pub entries: HashMap<(u32, u32), u32>,
}

impl Ledger {
    pub fn broken() -> Self {
        Self {
            entries: HashMap::from([((1, 2), 3)]),
        }
    }
}

impl Entity for Ledger {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }
}

/// Serializes to a bare number instead of a map.
#[derive(Debug, Clone, Serialize)]
pub struct Code(pub u32);

impl Entity for Code {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }
}

/// Holds a ledger that cannot be decoded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Shelf {
    pub name: String,
}

impl Entity for Shelf {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        match accessor {
            "Ledger" => Some(Relation::one(Ledger::broken())),
            "Codes" => Some(Relation::many(vec![Code(1), Code(2)])),
            _ => None,
        }
    }
}

/// Writer and Novel refer to each other: Writer -> Books -> Writer -> ...
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Writer {
    pub id: u32,
    pub name: String,
}

impl Writer {
    pub fn charlotte() -> Self {
        Self {
            id: 1,
            name: "Charlotte".into(),
        }
    }
}

fn writer_relations() -> &'static RelationRegistry<Writer> {
    static RELATIONS: OnceLock<RelationRegistry<Writer>> = OnceLock::new();
    RELATIONS.get_or_init(|| {
        RelationRegistry::new().register("Books", |w: &Writer| {
            Relation::many(vec![Novel {
                id: 10,
                title: "Shirley".into(),
                writer_id: w.id,
            }])
        })
    })
}

impl Entity for Writer {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        writer_relations().resolve(self, accessor)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Novel {
    pub id: u32,
    pub title: String,
    pub writer_id: u32,
}

fn novel_relations() -> &'static RelationRegistry<Novel> {
    static RELATIONS: OnceLock<RelationRegistry<Novel>> = OnceLock::new();
    RELATIONS.get_or_init(|| {
        RelationRegistry::new().register("Writer", |_: &Novel| Relation::one(Writer::charlotte()))
    })
}

impl Entity for Novel {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        serialize_fields(self)
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        novel_relations().resolve(self, accessor)
    }
}

pub fn decode(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("marshal output is valid JSON")
}

pub fn keys(value: &Value) -> Vec<String> {
    value
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}
