//! Depth-first flattening of the visible tree.
//!
//! A flatten pass walks the delegate's roots in order and emits one
//! [`TreeNode`] per reached item, pre-order. A node's children are fetched
//! only after the [`Visitor`] has decided to descend into it, so collapsed
//! branches never hit [`TreeDelegate::children`].

use log::{trace, warn};

use crate::delegate::TreeDelegate;
use crate::node::{FlatTree, TreeNode};

/// Hooks invoked while flattening.
///
/// The default implementation descends into expanded nodes and does nothing
/// else, which yields the plain visible tree.
pub trait Visitor<D: TreeDelegate> {
    /// Called before the node for `item` is built.
    ///
    /// Runs with mutable access to the delegate so that state changed here
    /// (e.g. forcing expansion) is reflected in the node's snapshot.
    fn pre_visit(&mut self, _delegate: &mut D, _item: &D::Item, _parent: Option<&D::Item>) {}

    /// Called once the node is built, before its children are considered.
    fn visit(&mut self, _node: &TreeNode<D::Item>) {}

    /// Whether the children of `node` are part of this pass.
    fn should_descend(&mut self, node: &TreeNode<D::Item>) -> bool {
        node.is_expanded
    }
}

/// Visitor that follows the stored expansion flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expanded;

impl<D: TreeDelegate> Visitor<D> for Expanded {}

/// Visitor built from a descend predicate.
///
/// ```ignore
/// // Everything, regardless of expansion.
/// let tree = flatten_with(&mut delegate, &mut Descend(|_| true));
/// ```
pub struct Descend<F>(pub F);

impl<D, F> Visitor<D> for Descend<F>
where
    D: TreeDelegate,
    F: FnMut(&TreeNode<D::Item>) -> bool,
{
    fn should_descend(&mut self, node: &TreeNode<D::Item>) -> bool {
        (self.0)(node)
    }
}

/// Runs both visitors; descends only where both agree.
impl<D, A, B> Visitor<D> for (A, B)
where
    D: TreeDelegate,
    A: Visitor<D>,
    B: Visitor<D>,
{
    fn pre_visit(&mut self, delegate: &mut D, item: &D::Item, parent: Option<&D::Item>) {
        self.0.pre_visit(delegate, item, parent);
        self.1.pre_visit(delegate, item, parent);
    }

    fn visit(&mut self, node: &TreeNode<D::Item>) {
        self.0.visit(node);
        self.1.visit(node);
    }

    fn should_descend(&mut self, node: &TreeNode<D::Item>) -> bool {
        let first = self.0.should_descend(node);
        let second = self.1.should_descend(node);
        first && second
    }
}

struct Pending<T> {
    item: T,
    level: usize,
    local_index: usize,
    has_next_sibling: bool,
    parent: Option<usize>,
}

/// Flatten the currently expanded tree.
pub fn flatten<D: TreeDelegate>(delegate: &mut D) -> FlatTree<D::Item> {
    flatten_with(delegate, &mut Expanded)
}

/// Flatten with custom hooks.
pub fn flatten_with<D, V>(delegate: &mut D, visitor: &mut V) -> FlatTree<D::Item>
where
    D: TreeDelegate,
    V: Visitor<D> + ?Sized,
{
    let mut tree = FlatTree::new();
    let mut stack = siblings(delegate.roots(), 0, None);

    while let Some(pending) = stack.pop() {
        let parent_item = pending.parent.map(|index| &tree.nodes()[index].item);
        visitor.pre_visit(delegate, &pending.item, parent_item);

        let node = TreeNode {
            id: delegate.id(&pending.item),
            is_expanded: delegate.is_expanded(&pending.item),
            level: pending.level,
            local_index: pending.local_index,
            global_index: tree.len(),
            has_next_sibling: pending.has_next_sibling,
            parent: pending.parent,
            item: pending.item,
        };
        visitor.visit(&node);
        let descend = visitor.should_descend(&node);
        let index = node.global_index;
        let level = node.level;

        if !tree.push(node) && cfg!(debug_assertions) {
            warn!(
                "[flatten] duplicate id '{}' at index {}",
                tree.nodes()[index].id,
                index
            );
        }

        if descend {
            let children = delegate.children(&tree.nodes()[index].item);
            stack.extend(siblings(children, level + 1, Some(index)));
        }
    }

    trace!("[flatten] {} visible nodes", tree.len());
    tree
}

/// Pending entries for one sibling list, reversed for the stack.
fn siblings<T>(items: Vec<T>, level: usize, parent: Option<usize>) -> Vec<Pending<T>> {
    let count = items.len();
    items
        .into_iter()
        .enumerate()
        .map(|(local_index, item)| Pending {
            item,
            level,
            local_index,
            has_next_sibling: local_index + 1 < count,
            parent,
        })
        .rev()
        .collect()
}
