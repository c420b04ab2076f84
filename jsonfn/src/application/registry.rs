use std::collections::BTreeMap;
use std::fmt;

use crate::application::entity::Relation;

/// Relation accessor for entities of type `T`.
pub type Accessor<T> = Box<dyn Fn(&T) -> Relation + Send + Sync>;

/// Explicit name → accessor table for one entity type.
///
/// Stands in for method lookup by name: an entity answers
/// [`Entity::relation`](crate::application::Entity::relation) with
/// [`resolve`](Self::resolve), and unknown names simply resolve to `None`.
pub struct RelationRegistry<T> {
    accessors: BTreeMap<String, Accessor<T>>,
}

impl<T> Default for RelationRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RelationRegistry<T> {
    pub fn new() -> Self {
        Self {
            accessors: BTreeMap::new(),
        }
    }

    /// Registers `accessor` under `name`, replacing an earlier registration.
    pub fn register<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Relation + Send + Sync + 'static,
    {
        self.accessors.insert(name.into(), Box::new(accessor));
        self
    }

    /// Invokes the accessor registered as `name`, if any.
    pub fn resolve(&self, entity: &T, name: &str) -> Option<Relation> {
        self.accessors.get(name).map(|accessor| accessor(entity))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.accessors.keys().map(String::as_str)
    }
}

impl<T> fmt::Debug for RelationRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
