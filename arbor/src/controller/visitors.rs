//! Flatten hooks used by the structural operations.

use std::collections::HashSet;

use crate::delegate::TreeDelegate;
use crate::flatten::Visitor;
use crate::node::{FlatTree, TreeNode};

/// Forces expansion of one branch while it is being flattened.
///
/// Runs in `pre_visit`, so every forced node already snapshots as expanded
/// and the pass descends through the whole branch.
pub(super) struct Cascade {
    target: String,
    branch: HashSet<String>,
}

impl Cascade {
    pub(super) fn new(target: String) -> Self {
        Self {
            target,
            branch: HashSet::new(),
        }
    }
}

impl<D: TreeDelegate> Visitor<D> for Cascade {
    fn pre_visit(&mut self, delegate: &mut D, item: &D::Item, parent: Option<&D::Item>) {
        let id = delegate.id(item);
        let in_branch = id == self.target
            || parent.is_some_and(|parent| self.branch.contains(&delegate.id(parent)));
        if in_branch {
            delegate.set_expanded(item, true);
            self.branch.insert(id);
        }
    }
}

/// Forces expansion of everything reachable from the roots.
pub(super) struct ExpandEverything;

impl<D: TreeDelegate> Visitor<D> for ExpandEverything {
    fn pre_visit(&mut self, delegate: &mut D, item: &D::Item, _parent: Option<&D::Item>) {
        delegate.set_expanded(item, true);
    }

    fn should_descend(&mut self, _node: &TreeNode<D::Item>) -> bool {
        true
    }
}

/// Collects the ids of rows that enter visibility in this pass.
///
/// A row is revealed when it is in scope, is not a root, and was absent from
/// `previous` (every in-scope non-root row when there is no previous pass).
/// With a target, only the target's descendants are in scope.
pub(super) struct Reveal<'a, T> {
    previous: Option<&'a FlatTree<T>>,
    target: Option<&'a str>,
    scope: Option<usize>,
    pub(super) revealing: Vec<String>,
}

impl<'a, T> Reveal<'a, T> {
    /// Rows newly visible below `target`.
    pub(super) fn within(target: &'a str, previous: &'a FlatTree<T>) -> Self {
        Self {
            previous: Some(previous),
            target: Some(target),
            scope: None,
            revealing: Vec::new(),
        }
    }

    /// Rows newly visible anywhere, or every non-root row without `previous`.
    pub(super) fn everywhere(previous: Option<&'a FlatTree<T>>) -> Self {
        Self {
            previous,
            target: None,
            scope: None,
            revealing: Vec::new(),
        }
    }

    fn in_scope(&mut self, node: &TreeNode<T>) -> bool {
        let Some(target) = self.target else {
            return true;
        };
        if self.scope.is_some_and(|level| node.level <= level) {
            self.scope = None;
        }
        if node.id == target {
            self.scope = Some(node.level);
            return false;
        }
        self.scope.is_some()
    }
}

impl<D: TreeDelegate> Visitor<D> for Reveal<'_, D::Item> {
    fn visit(&mut self, node: &TreeNode<D::Item>) {
        if !self.in_scope(node) || node.level == 0 {
            return;
        }
        let seen = self
            .previous
            .is_some_and(|previous| previous.contains(&node.id));
        if !seen {
            self.revealing.push(node.id.clone());
        }
    }
}
