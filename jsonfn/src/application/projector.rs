//! Recursive projection of entities through a selection tree

use generational_arena::Index;
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace, warn};

use crate::application::entity::{Entity, Relation};
use crate::application::error::{ProjectionError, ProjectionResult};
use crate::application::options::{NestedErrorPolicy, ProjectionOptions};
use crate::domain::{SelectionTree, WILDCARD};

/// Walks entities guided by one selection tree.
///
/// Per entity: keep the plain fields named by the node's leaf children
/// (all of them when there are none or one is `*`), then resolve each
/// non-leaf child as a relation accessor and recurse into its result.
/// Relations the entity does not know are left out silently.
pub struct Projector<'t> {
    tree: &'t SelectionTree,
    options: ProjectionOptions,
}

impl<'t> Projector<'t> {
    pub fn new(tree: &'t SelectionTree, options: ProjectionOptions) -> Self {
        Self { tree, options }
    }

    /// Projects a single entity from the root of the tree.
    ///
    /// An entity that unfolds into an absent value or a sequence projects like
    /// that relation would.
    pub fn project<E: Entity + ?Sized>(&self, entity: &E) -> ProjectionResult<Value> {
        match entity.unfold() {
            Some(relation) => self.project_relation(&relation),
            None => self.project_entity(entity, self.tree.root(), &[], 0),
        }
    }

    /// Projects every entity against the root, failing on the first error.
    pub fn project_all<E: Entity>(&self, entities: &[E]) -> ProjectionResult<Value> {
        let mut list = Vec::with_capacity(entities.len());
        for entity in entities {
            list.push(self.project(entity)?);
        }
        Ok(Value::Array(list))
    }

    /// Projects an absent, single or sequence value from the root.
    pub fn project_relation(&self, relation: &Relation) -> ProjectionResult<Value> {
        self.project_at(relation, self.tree.root(), &[], 0)
    }

    fn project_at(
        &self,
        relation: &Relation,
        node: Index,
        path: &[&'t str],
        depth: usize,
    ) -> ProjectionResult<Value> {
        match relation {
            Relation::Absent => Ok(Value::Null),
            Relation::One(entity) => self.project_entity(entity.as_ref(), node, path, depth),
            Relation::Many(entities) => {
                let mut list = Vec::with_capacity(entities.len());
                for entity in entities {
                    list.push(self.project_entity(entity.as_ref(), node, path, depth)?);
                }
                Ok(Value::Array(list))
            }
        }
    }

    #[instrument(level = "trace", skip(self, entity))]
    fn project_entity<E: Entity + ?Sized>(
        &self,
        entity: &E,
        node: Index,
        path: &[&'t str],
        depth: usize,
    ) -> ProjectionResult<Value> {
        if depth > self.options.max_depth {
            return Err(ProjectionError::DepthExceeded {
                path: display_path(path),
                limit: self.options.max_depth,
            });
        }

        let tree: &'t SelectionTree = self.tree;
        let fields = tree.fields_of(node)?;
        let mut map = self.plain_map(entity, &fields, path)?;

        for child in tree.relations_of(node)? {
            let name = tree.node(child)?.name.as_str();
            let accessor = self.options.naming.accessor_name(name);
            let Some(relation) = entity.relation(&accessor) else {
                debug!("no relation accessor {:?} at {}", accessor, display_path(path));
                continue;
            };

            let mut child_path = path.to_vec();
            child_path.push(name);
            match self.project_at(&relation, child, &child_path, depth + 1) {
                Ok(value) => {
                    map.insert(name.to_string(), value);
                }
                Err(err)
                    if err.is_entity_failure()
                        && self.options.nested_errors == NestedErrorPolicy::Omit =>
                {
                    warn!("omitting relation {}: {}", display_path(&child_path), err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Value::Object(map))
    }

    fn plain_map<E: Entity + ?Sized>(
        &self,
        entity: &E,
        fields: &[&str],
        path: &[&str],
    ) -> ProjectionResult<Map<String, Value>> {
        let value = entity
            .plain_fields()
            .map_err(|source| ProjectionError::Decode {
                path: display_path(path),
                source,
            })?;
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(ProjectionError::Shape {
                    path: display_path(path),
                    found: kind(&other),
                })
            }
        };

        if !keeps_all(fields) {
            map.retain(|key, _| fields.contains(&key.as_str()));
        }
        trace!("retained {:?} at {}", map.keys().collect::<Vec<_>>(), display_path(path));

        Ok(entity.to_map(map, fields))
    }
}

/// No explicit leaf, or an explicit `*`, means no filtering.
fn keeps_all(fields: &[&str]) -> bool {
    fields.is_empty() || fields.contains(&WILDCARD)
}

fn display_path(path: &[&str]) -> String {
    let mut out = String::from("$");
    for segment in path {
        out.push('.');
        out.push_str(segment);
    }
    out
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
