//! JSON documents as entities
//!
//! Scalars and arrays of scalars are plain fields. Objects and non-empty
//! arrays of objects are relations, reachable under their key. A `null` or an
//! empty array also resolves as a relation when a selector asks for one, so it
//! projects to `null` or `[]` like an absent or empty typed relation.
//! A `null` or array document unfolds the same way at the root.

use serde_json::{Map, Value};

use crate::application::entity::{Entity, Relation};
use crate::application::options::upper_first;

impl Entity for Value {
    fn plain_fields(&self) -> Result<Value, serde_json::Error> {
        match self {
            Value::Object(map) => Ok(Value::Object(
                map.iter()
                    .filter(|(_, v)| !is_relation_value(v))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect::<Map<String, Value>>(),
            )),
            other => Ok(other.clone()),
        }
    }

    fn relation(&self, accessor: &str) -> Option<Relation> {
        let map = self.as_object()?;
        let value = map.get(accessor).or_else(|| {
            map.iter()
                .find(|(key, _)| upper_first(key) == accessor)
                .map(|(_, v)| v)
        })?;
        if !resolves_as_relation(value) {
            return None;
        }
        Some(Relation::from_json(value.clone()))
    }

    fn unfold(&self) -> Option<Relation> {
        match self {
            Value::Null | Value::Array(_) => Some(Relation::from_json(self.clone())),
            _ => None,
        }
    }
}

impl Relation {
    /// `null` is absent, arrays are sequences, everything else is one entity.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Relation::Absent,
            Value::Array(items) => Relation::many(items),
            other => Relation::one(other),
        }
    }
}

fn resolves_as_relation(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.iter().all(Value::is_object),
        other => is_relation_value(other),
    }
}

fn is_relation_value(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => !items.is_empty() && items.iter().all(Value::is_object),
        _ => false,
    }
}
