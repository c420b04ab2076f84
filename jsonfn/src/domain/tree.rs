use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Node name meaning "every plain field at this level".
pub const WILDCARD: &str = "*";

/// Tree node in the arena-based selection structure.
#[derive(Debug, Clone)]
pub struct SelectionNode {
    /// Field name, relation name or [`WILDCARD`]; empty for the root
    pub name: String,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in insertion order, names pairwise distinct
    pub children: Vec<Index>,
}

impl SelectionNode {
    fn new(name: &str, parent: Option<Index>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
        }
    }

    /// A leaf selects a plain field; everything else selects a relation.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Merged selection tree for one projection call.
///
/// Nodes live in a generational arena and refer to each other by index, so
/// merging fragments never aliases a sub-tree between two parents.
/// The root always exists and has an empty name.
#[derive(Debug, Clone)]
pub struct SelectionTree {
    arena: Arena<SelectionNode>,
    root: Index,
}

impl Default for SelectionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionTree {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(SelectionNode::new("", None));
        Self { arena, root }
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&SelectionNode> {
        self.arena.get(idx)
    }

    /// Like [`get_node`](Self::get_node) but a missing index is an error.
    pub fn node(&self, idx: Index) -> DomainResult<&SelectionNode> {
        self.arena.get(idx).ok_or(DomainError::NodeNotFound(idx))
    }

    /// Number of nodes, root excluded.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    /// True when nothing was selected.
    pub fn is_empty(&self) -> bool {
        self.arena
            .get(self.root)
            .map(SelectionNode::is_leaf)
            .unwrap_or(true)
    }

    /// Finds the child of `parent` carrying `name`.
    pub fn child(&self, parent: Index, name: &str) -> Option<Index> {
        self.get_node(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.get_node(c).is_some_and(|n| n.name == name))
    }

    /// Adds a child named `name` below `parent`.
    ///
    /// If `parent` already has a child with that name, nothing is inserted and
    /// the existing child is returned, so repeated inserts merge.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: Index, name: &str) -> DomainResult<Index> {
        if let Some(existing) = self.child(parent, name) {
            return Ok(existing);
        }
        self.node(parent)?;

        let idx = self.arena.insert(SelectionNode::new(name, Some(parent)));
        self.arena
            .get_mut(parent)
            .ok_or(DomainError::NodeNotFound(parent))?
            .children
            .push(idx);
        Ok(idx)
    }

    /// Adds the chain `segments[0] -> segments[1] -> ...` below `parent` and
    /// returns the index of the last segment (or `parent` for an empty chain).
    #[instrument(level = "trace", skip(self, segments))]
    pub fn add_path<S: AsRef<str>>(&mut self, parent: Index, segments: &[S]) -> DomainResult<Index> {
        let mut current = parent;
        for segment in segments {
            current = self.add_child(current, segment.as_ref())?;
        }
        Ok(current)
    }

    /// Recursive union of `other`'s sub-tree at `from` into this tree at `into`.
    ///
    /// Children matching an existing sibling by name are merged into it,
    /// new names are appended in `other`'s order.
    #[instrument(level = "trace", skip(self, other))]
    pub fn merge(&mut self, into: Index, other: &SelectionTree, from: Index) -> DomainResult<()> {
        for &child in &other.node(from)?.children {
            let name = &other.node(child)?.name;
            let target = self.add_child(into, name)?;
            self.merge(target, other, child)?;
        }
        Ok(())
    }

    /// Merges all of `other` into this tree, root onto root.
    pub fn merge_tree(&mut self, other: &SelectionTree) -> DomainResult<()> {
        self.merge(self.root, other, other.root)
    }

    pub fn is_leaf(&self, idx: Index) -> DomainResult<bool> {
        Ok(self.node(idx)?.is_leaf())
    }

    /// Names of the leaf children of `idx`: the plain fields to retain.
    pub fn fields_of(&self, idx: Index) -> DomainResult<Vec<&str>> {
        let mut fields = Vec::new();
        for &child in &self.node(idx)?.children {
            let node = self.node(child)?;
            if node.is_leaf() {
                fields.push(node.name.as_str());
            }
        }
        Ok(fields)
    }

    /// Non-leaf children of `idx`: the relations to recurse into.
    pub fn relations_of(&self, idx: Index) -> DomainResult<Vec<Index>> {
        let mut relations = Vec::new();
        for &child in &self.node(idx)?.children {
            if !self.node(child)?.is_leaf() {
                relations.push(child);
            }
        }
        Ok(relations)
    }

    /// Pre-order traversal yielding `(depth, index, node)`; the root has depth 0.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Longest root-to-leaf edge count. An empty tree has depth 0.
    pub fn depth(&self) -> usize {
        self.iter().map(|(depth, _, _)| depth).max().unwrap_or(0)
    }

    /// Compact selector-like rendering, e.g. `{Id,Author{Name,Country{Id}}}`.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(self.root, &mut out);
        out
    }

    fn write_outline(&self, idx: Index, out: &mut String) {
        let Some(node) = self.get_node(idx) else {
            return;
        };
        out.push_str(&node.name);
        if node.is_leaf() && idx != self.root {
            return;
        }
        out.push('{');
        for (i, &child) in node.children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_outline(child, out);
        }
        out.push('}');
    }

    /// Converts the tree for terminal display.
    pub fn to_tree_string(&self) -> Tree<String> {
        fn build(tree: &SelectionTree, idx: Index, parent: &mut Tree<String>) {
            if let Some(node) = tree.get_node(idx) {
                for &child_idx in &node.children {
                    if let Some(child) = tree.get_node(child_idx) {
                        let mut child_tree = Tree::new(child.name.clone());
                        build(tree, child_idx, &mut child_tree);
                        parent.push(child_tree);
                    }
                }
            }
        }

        let mut tree = Tree::new(".".to_string());
        build(self, self.root, &mut tree);
        tree
    }
}

impl fmt::Display for SelectionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outline())
    }
}

pub struct TreeIterator<'a> {
    tree: &'a SelectionTree,
    stack: Vec<(usize, Index)>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a SelectionTree) -> Self {
        Self {
            tree,
            stack: vec![(0, tree.root)],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (usize, Index, &'a SelectionNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, current)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current) {
                // reversed so the first child is visited first
                for &child in node.children.iter().rev() {
                    self.stack.push((depth + 1, child));
                }
                return Some((depth, current, node));
            }
        }
        None
    }
}
