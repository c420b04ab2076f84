//! Entity capabilities consumed by the projector

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Anything that can be projected.
///
/// An entity exposes three capabilities:
/// - its plain fields as a JSON value (must be an object to be projectable),
/// - an optional hook rewriting the filtered field map,
/// - zero or more relation accessors, looked up by accessor name.
///
/// Most types implement [`plain_fields`](Entity::plain_fields) with
/// [`serialize_fields`] and answer [`relation`](Entity::relation) from a
/// [`RelationRegistry`](crate::application::RelationRegistry) or a `match`.
pub trait Entity {
    /// Plain (non-relation) fields keyed by their serialized names.
    fn plain_fields(&self) -> Result<Value, serde_json::Error>;

    /// Replaces the filtered field map. `fields` is the retained-name list as
    /// selected (empty or containing `*` when every field is kept).
    fn to_map(&self, map: Map<String, Value>, _fields: &[&str]) -> Map<String, Value> {
        map
    }

    /// Invokes the relation accessor called `accessor`.
    ///
    /// `None` means the entity has no such accessor, which is not an error.
    fn relation(&self, _accessor: &str) -> Option<Relation> {
        None
    }

    /// An entity that stands for nothing or for a sequence returns it here;
    /// the projector then yields `null` or projects each element.
    fn unfold(&self) -> Option<Relation> {
        None
    }
}

impl<T: Entity + ?Sized> Entity for &T {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        (**self).plain_fields()
    }

    fn to_map(&self, map: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
        (**self).to_map(map, fields)
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        (**self).relation(accessor)
    }

    fn unfold(&self) -> Option<Relation> {
        (**self).unfold()
    }
}

impl<T: Entity + ?Sized> Entity for Box<T> {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        (**self).plain_fields()
    }

    fn to_map(&self, map: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
        (**self).to_map(map, fields)
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        (**self).relation(accessor)
    }

    fn unfold(&self) -> Option<Relation> {
        (**self).unfold()
    }
}

/// `None` projects to `null`.
impl<T: Entity> Entity for Option<T> {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        match self {
            Some(entity) => entity.plain_fields(),
            None => Ok(Value::Null),
        }
    }

    fn to_map(&self, map: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
        match self {
            Some(entity) => entity.to_map(map, fields),
            None => map,
        }
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        self.as_ref()?.relation(accessor)
    }

    fn unfold(&self) -> Option<Relation> {
        match self {
            Some(entity) => entity.unfold(),
            None => Some(Relation::Absent),
        }
    }
}

/// Plain fields through serde, the usual [`Entity::plain_fields`] body.
pub fn serialize_fields<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    serde_json::to_value(value)
}

/// Result of invoking a relation accessor.
pub enum Relation {
    /// The accessor exists but yielded nothing; projects to `null`.
    Absent,
    One(Box<dyn Entity>),
    Many(Vec<Box<dyn Entity>>),
}

impl Relation {
    pub fn one<E: Entity + 'static>(entity: E) -> Self {
        Relation::One(Box::new(entity))
    }

    pub fn many<I, E>(entities: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Entity + 'static,
    {
        Relation::Many(
            entities
                .into_iter()
                .map(|e| Box::new(e) as Box<dyn Entity>)
                .collect(),
        )
    }

    pub fn optional<E: Entity + 'static>(entity: Option<E>) -> Self {
        entity.map_or(Relation::Absent, Relation::one)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Relation::Absent)
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Absent => write!(f, "Absent"),
            Relation::One(_) => write!(f, "One(..)"),
            Relation::Many(items) => write!(f, "Many({})", items.len()),
        }
    }
}
