//! Selector grammar
//!
//! ```text
//! *                      every plain field at this level
//! Name                   one plain field
//! Rel{a,b}               relation `Rel`, keeping plain fields a and b
//! Rel{} | Rel{*}         relation `Rel`, keeping every plain field
//! Rel:Sub:Deeper{a}      nested relation path, fields apply to the last segment
//! ```
//!
//! Anything the grammar does not recognise is dropped without error.

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::error::DomainResult;
use crate::domain::tree::{SelectionTree, WILDCARD};

/// Relation nesting accepted unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 32;

const SELECTOR_PATTERN: &str = r"(\*)|(\w+[:\w]*)(\{([\w,*]*)\})?";

/// One extracted selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Plain field or the wildcard.
    Leaf(String),
    /// Relation path with the plain fields of its last segment.
    /// `fields` is never empty; an empty brace body becomes `[*]`.
    Relation { path: Vec<String>, fields: Vec<String> },
}

impl Selector {
    /// Number of relation hops the selector walks from the entity it applies to.
    pub fn depth(&self) -> usize {
        match self {
            Selector::Leaf(_) => 0,
            Selector::Relation { path, .. } => path.len(),
        }
    }

    /// Builds the linear fragment `seg1 -> ... -> segN -> fields`.
    pub fn to_tree(&self) -> DomainResult<SelectionTree> {
        let mut tree = SelectionTree::new();
        let root = tree.root();
        match self {
            Selector::Leaf(name) => {
                tree.add_child(root, name)?;
            }
            Selector::Relation { path, fields } => {
                let last = tree.add_path(root, path)?;
                for field in fields {
                    tree.add_child(last, field)?;
                }
            }
        }
        Ok(tree)
    }
}

pub struct SelectorParser {
    pattern: Regex,
    max_depth: usize,
}

impl Default for SelectorParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectorParser {
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Parser that drops selectors nesting deeper than `max_depth` relations.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            pattern: Regex::new(SELECTOR_PATTERN).expect("selector pattern is valid"),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Extracts the name-with-path and field list of one selector.
    ///
    /// The match is unanchored. A wildcard match or a missing brace body turns
    /// the whole selector, surrounding whitespace included, into a leaf name.
    #[instrument(level = "trace", skip(self))]
    pub fn extract(&self, selector: &str) -> Option<Selector> {
        if selector.is_empty() {
            return None;
        }
        let caps = self.pattern.captures(selector)?;

        if caps.get(1).is_some() || caps.get(3).is_none() {
            return Some(Selector::Leaf(selector.to_string()));
        }

        let path: Vec<String> = caps
            .get(2)?
            .as_str()
            .split(':')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        if path.is_empty() {
            return None;
        }

        let mut fields: Vec<String> = caps
            .get(4)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split(',')
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect();
        if fields.is_empty() {
            fields.push(WILDCARD.to_string());
        }

        Some(Selector::Relation { path, fields })
    }

    /// Parses one selector into its own fragment tree.
    ///
    /// Returns `Ok(None)` for selectors that are unparseable or nest deeper
    /// than the configured limit.
    pub fn parse_selector(&self, selector: &str) -> DomainResult<Option<SelectionTree>> {
        let Some(extracted) = self.extract(selector) else {
            debug!("dropping unparseable selector {:?}", selector);
            return Ok(None);
        };
        if extracted.depth() > self.max_depth {
            debug!(
                "dropping selector {:?}: {} relations deep, limit {}",
                selector,
                extracted.depth(),
                self.max_depth
            );
            return Ok(None);
        }
        extracted.to_tree().map(Some)
    }

    /// Parses every selector and merges the fragments into one tree.
    #[instrument(level = "debug", skip_all)]
    pub fn parse<I, S>(&self, selectors: I) -> DomainResult<SelectionTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = SelectionTree::new();
        for selector in selectors {
            if let Some(fragment) = self.parse_selector(selector.as_ref())? {
                tree.merge_tree(&fragment)?;
            }
        }
        debug!("selection: {}", tree);
        Ok(tree)
    }
}

/// Parses `selectors` with the default depth limit.
pub fn parse<I, S>(selectors: I) -> DomainResult<SelectionTree>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    SelectorParser::new().parse(selectors)
}
