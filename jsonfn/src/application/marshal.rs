//! Entry points: selectors in, JSON out

use serde_json::Value;
use tracing::instrument;

use crate::application::entity::{Entity, Relation};
use crate::application::error::{ProjectionError, ProjectionResult};
use crate::application::options::ProjectionOptions;
use crate::application::projector::Projector;
use crate::domain::{SelectionTree, SelectorParser};

/// Parses selectors and projects entities with fixed options.
///
/// Every call builds its own selection tree; nothing is cached between calls.
/// No selectors behaves like `["*"]`: all plain fields, no relations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Marshaller {
    options: ProjectionOptions,
}

impl Marshaller {
    pub fn new(options: ProjectionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ProjectionOptions {
        &self.options
    }

    /// Builds the selection tree this marshaller would use for `selectors`.
    pub fn selection<I, S>(&self, selectors: I) -> ProjectionResult<SelectionTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(SelectorParser::with_max_depth(self.options.max_depth).parse(selectors)?)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn to_value<E, I, S>(&self, entity: &E, selectors: I) -> ProjectionResult<Value>
    where
        E: Entity + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tree = self.selection(selectors)?;
        Projector::new(&tree, self.options).project(entity)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn to_value_all<E, I, S>(&self, entities: &[E], selectors: I) -> ProjectionResult<Value>
    where
        E: Entity,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tree = self.selection(selectors)?;
        Projector::new(&tree, self.options).project_all(entities)
    }

    #[instrument(level = "debug", skip_all)]
    pub fn to_value_relation<I, S>(&self, relation: &Relation, selectors: I) -> ProjectionResult<Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tree = self.selection(selectors)?;
        Projector::new(&tree, self.options).project_relation(relation)
    }

    pub fn marshal<E, I, S>(&self, entity: &E, selectors: I) -> ProjectionResult<Vec<u8>>
    where
        E: Entity + ?Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        encode(&self.to_value(entity, selectors)?)
    }

    pub fn marshal_all<E, I, S>(&self, entities: &[E], selectors: I) -> ProjectionResult<Vec<u8>>
    where
        E: Entity,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        encode(&self.to_value_all(entities, selectors)?)
    }

    pub fn marshal_relation<I, S>(&self, relation: &Relation, selectors: I) -> ProjectionResult<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        encode(&self.to_value_relation(relation, selectors)?)
    }
}

fn encode(value: &Value) -> ProjectionResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(ProjectionError::Encode)
}

/// Projects `entity` through `selectors` and encodes the result as JSON.
///
/// ```
/// use jsonfn::marshal;
/// use serde_json::json;
///
/// let book = json!({ "Id": 1, "Title": "Jane Eyre", "Author": { "Id": 2, "Name": "author2" } });
/// let out = marshal(&book, ["Title", "Author{Name}"]).unwrap();
/// assert_eq!(out, br#"{"Author":{"Name":"author2"},"Title":"Jane Eyre"}"#);
/// ```
pub fn marshal<E, I, S>(entity: &E, selectors: I) -> ProjectionResult<Vec<u8>>
where
    E: Entity + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Marshaller::default().marshal(entity, selectors)
}

/// Like [`marshal`] for a slice; every element uses the same selection.
pub fn marshal_all<E, I, S>(entities: &[E], selectors: I) -> ProjectionResult<Vec<u8>>
where
    E: Entity,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Marshaller::default().marshal_all(entities, selectors)
}

/// Like [`marshal`] for an accessor result: absent, one entity or a sequence.
pub fn marshal_relation<I, S>(relation: &Relation, selectors: I) -> ProjectionResult<Vec<u8>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Marshaller::default().marshal_relation(relation, selectors)
}

pub fn to_value<E, I, S>(entity: &E, selectors: I) -> ProjectionResult<Value>
where
    E: Entity + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Marshaller::default().to_value(entity, selectors)
}

pub fn to_value_all<E, I, S>(entities: &[E], selectors: I) -> ProjectionResult<Value>
where
    E: Entity,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Marshaller::default().to_value_all(entities, selectors)
}
