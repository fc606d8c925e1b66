//! Per-pass node records and the arena that holds them.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::ops::Range;

use crate::error::{Result, TreeError};

/// One visible item, as placed by a single flatten pass.
///
/// Nodes are rebuilt from scratch on every flatten and are never mutated
/// afterwards. `parent` is an index into the same [`FlatTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<T> {
    /// The wrapped caller item.
    pub item: T,
    /// Unique id reported by the delegate.
    pub id: String,
    /// Depth in the tree (roots are 0).
    pub level: usize,
    /// Position among its siblings.
    pub local_index: usize,
    /// Position in the flat sequence.
    pub global_index: usize,
    /// False when this is the last child of its parent.
    pub has_next_sibling: bool,
    /// Index of the parent node, `None` for roots.
    pub parent: Option<usize>,
    /// Expansion flag at flatten time.
    pub is_expanded: bool,
}

impl<T> TreeNode<T> {
    /// Whether this is a level-0 node.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this is the last child of its parent.
    pub fn is_last_sibling(&self) -> bool {
        !self.has_next_sibling
    }
}

/// Flat, pre-ordered projection of the visible tree.
///
/// A node's visible descendants form a contiguous block right after it,
/// ending at the first node whose level is not deeper than its own.
#[derive(Debug)]
pub struct FlatTree<T> {
    nodes: Vec<TreeNode<T>>,
    by_id: HashMap<String, usize>,
    skips: Vec<OnceCell<Box<[bool]>>>,
}

impl<T> Default for FlatTree<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            by_id: HashMap::new(),
            skips: Vec::new(),
        }
    }
}

impl<T> FlatTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. Returns false if its id was already present; the
    /// later node then shadows the earlier one in id lookups.
    pub(crate) fn push(&mut self, node: TreeNode<T>) -> bool {
        debug_assert_eq!(node.global_index, self.nodes.len());
        let fresh = self
            .by_id
            .insert(node.id.clone(), node.global_index)
            .is_none();
        self.nodes.push(node);
        self.skips.push(OnceCell::new());
        fresh
    }

    /// Number of visible nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node is visible.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&TreeNode<T>> {
        self.nodes.get(index)
    }

    /// Node at `index`, or [`TreeError::IndexOutOfRange`].
    pub fn node(&self, index: usize) -> Result<&TreeNode<T>> {
        self.nodes.get(index).ok_or(TreeError::IndexOutOfRange {
            index,
            len: self.nodes.len(),
        })
    }

    /// All nodes in flat order.
    pub fn nodes(&self) -> &[TreeNode<T>] {
        &self.nodes
    }

    /// Iterate nodes in flat order.
    pub fn iter(&self) -> std::slice::Iter<'_, TreeNode<T>> {
        self.nodes.iter()
    }

    /// Flat index of the node with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Node with `id`, if visible.
    pub fn find(&self, id: &str) -> Option<&TreeNode<T>> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    /// Whether a node with `id` is visible.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Parent of the node at `index`.
    pub fn parent(&self, index: usize) -> Option<&TreeNode<T>> {
        self.nodes
            .get(index)
            .and_then(|node| node.parent)
            .map(|parent| &self.nodes[parent])
    }

    /// Ancestors of the node at `index`, nearest first.
    pub fn ancestors(&self, index: usize) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            next: self.nodes.get(index).and_then(|node| node.parent),
        }
    }

    /// Flat index range of the visible descendants of the node at `index`.
    ///
    /// Empty when the node is collapsed, a leaf, or out of range.
    pub fn descendant_range(&self, index: usize) -> Range<usize> {
        let Some(node) = self.nodes.get(index) else {
            return index..index;
        };
        let start = index + 1;
        let end = self.nodes[start..]
            .iter()
            .position(|candidate| candidate.level <= node.level)
            .map_or(self.nodes.len(), |offset| start + offset);
        start..end
    }

    /// Visible direct children of the node at `index`. Empty for unknown
    /// indices.
    pub fn children(&self, index: usize) -> impl Iterator<Item = &TreeNode<T>> {
        self.nodes
            .get(self.descendant_range(index))
            .unwrap_or(&[])
            .iter()
            .filter(move |node| node.parent == Some(index))
    }

    /// Per-level "skip the guide line" flags for the node at `index`.
    ///
    /// Entry `l` (for `l < level`) is true when the ancestor at level `l` is
    /// the last child of its parent, i.e. nothing below this row connects to
    /// it. Entry 0 is the root column. Computed once per node and cached.
    pub fn skip_levels(&self, index: usize) -> Option<&[bool]> {
        let node = self.nodes.get(index)?;
        let skips = self.skips[index].get_or_init(|| {
            let mut skips = vec![false; node.level];
            for ancestor in self.ancestors(index) {
                skips[ancestor.level] = !ancestor.has_next_sibling;
            }
            skips.into_boxed_slice()
        });
        Some(skips)
    }
}

impl<'a, T> IntoIterator for &'a FlatTree<T> {
    type Item = &'a TreeNode<T>;
    type IntoIter = std::slice::Iter<'a, TreeNode<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Iterator over a node's ancestors, nearest first.
pub struct Ancestors<'a, T> {
    tree: &'a FlatTree<T>,
    next: Option<usize>,
}

impl<'a, T> Iterator for Ancestors<'a, T> {
    type Item = &'a TreeNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.tree.nodes[self.next?];
        self.next = node.parent;
        Some(node)
    }
}
