//! The data-access contract between the engine and the caller's tree.

use std::collections::VecDeque;

/// Exposes a caller-owned tree to the engine.
///
/// The caller owns the items, the parent/child relationships and the
/// per-item expansion (and optionally selection) flags. The engine reads the
/// shape through this trait on every flatten and mutates the flags through
/// the setters.
///
/// # Contract
///
/// - [`id`](TreeDelegate::id) must be stable across flattenings and unique
///   across the whole tree. Duplicate ids corrupt the animation bookkeeping.
/// - [`children`](TreeDelegate::children) must report siblings in a stable
///   order; that order is the display order.
/// - No item may be its own ancestor. Cycles are not detected and make any
///   traversal that descends into them run forever.
///
/// # Example
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use arbor::TreeDelegate;
///
/// struct Outline {
///     roots: Vec<&'static str>,
///     children: HashMap<&'static str, Vec<&'static str>>,
///     expanded: HashSet<&'static str>,
/// }
///
/// impl TreeDelegate for Outline {
///     type Item = &'static str;
///
///     fn roots(&self) -> Vec<Self::Item> {
///         self.roots.clone()
///     }
///
///     fn children(&self, item: &Self::Item) -> Vec<Self::Item> {
///         self.children.get(item).cloned().unwrap_or_default()
///     }
///
///     fn id(&self, item: &Self::Item) -> String {
///         item.to_string()
///     }
///
///     fn is_expanded(&self, item: &Self::Item) -> bool {
///         self.expanded.contains(item)
///     }
///
///     fn set_expanded(&mut self, item: &Self::Item, expanded: bool) {
///         if expanded {
///             self.expanded.insert(*item);
///         } else {
///             self.expanded.remove(item);
///         }
///     }
/// }
/// ```
pub trait TreeDelegate {
    /// Caller-side handle for one tree entry.
    type Item: Clone;

    /// Level-0 items, re-read on every flatten.
    fn roots(&self) -> Vec<Self::Item>;

    /// Ordered children of `item`. Only called when the engine descends.
    fn children(&self, item: &Self::Item) -> Vec<Self::Item>;

    /// Stable, globally unique id for `item`.
    fn id(&self, item: &Self::Item) -> String;

    /// Whether `item` is expanded.
    fn is_expanded(&self, item: &Self::Item) -> bool;

    /// Store the expansion flag of `item`.
    fn set_expanded(&mut self, item: &Self::Item, expanded: bool);

    /// Whether `item` is selected. Defaults to never selected.
    fn is_selected(&self, _item: &Self::Item) -> bool {
        false
    }

    /// Store the selection flag of `item`. Defaults to a no-op.
    fn set_selected(&mut self, _item: &Self::Item, _selected: bool) {}

    /// Depth-first pre-order walk of the branch rooted at `item`.
    ///
    /// `item` is always visited. The children of a visited item are only
    /// walked when `should_continue` holds for it.
    fn traverse<C, V>(&self, item: &Self::Item, mut should_continue: C, mut on_visit: V)
    where
        Self: Sized,
        C: FnMut(&Self::Item) -> bool,
        V: FnMut(&Self::Item),
    {
        let mut stack = vec![item.clone()];
        while let Some(current) = stack.pop() {
            on_visit(&current);
            if should_continue(&current) {
                let children = self.children(&current);
                stack.extend(children.into_iter().rev());
            }
        }
    }

    /// Depth-first search over the whole tree, collapsed branches included.
    ///
    /// Every item is passed to `on_visit` before it is tested. Returns the
    /// first item for which `matches` holds.
    fn depth_first_search<M, V>(&self, mut matches: M, mut on_visit: V) -> Option<Self::Item>
    where
        Self: Sized,
        M: FnMut(&Self::Item) -> bool,
        V: FnMut(&Self::Item),
    {
        let mut stack: Vec<Self::Item> = self.roots().into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            on_visit(&current);
            if matches(&current) {
                return Some(current);
            }
            let children = self.children(&current);
            stack.extend(children.into_iter().rev());
        }
        None
    }

    /// Breadth-first search over the whole tree, collapsed branches included.
    ///
    /// Same visiting and matching rules as
    /// [`depth_first_search`](TreeDelegate::depth_first_search), level by level.
    fn breadth_first_search<M, V>(&self, mut matches: M, mut on_visit: V) -> Option<Self::Item>
    where
        Self: Sized,
        M: FnMut(&Self::Item) -> bool,
        V: FnMut(&Self::Item),
    {
        let mut queue: VecDeque<Self::Item> = self.roots().into();
        while let Some(current) = queue.pop_front() {
            on_visit(&current);
            if matches(&current) {
                return Some(current);
            }
            queue.extend(self.children(&current));
        }
        None
    }

    /// Find the item with the given id anywhere in the tree.
    fn find_by_id(&self, id: &str) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.depth_first_search(|item| self.id(item) == id, |_| {})
    }

    /// Items from a root down to (and including) the item with `id`.
    fn path_to(&self, id: &str) -> Option<Vec<Self::Item>>
    where
        Self: Sized,
    {
        let mut stack: Vec<(Self::Item, usize)> =
            self.roots().into_iter().rev().map(|root| (root, 0)).collect();
        let mut path: Vec<Self::Item> = Vec::new();

        while let Some((current, depth)) = stack.pop() {
            path.truncate(depth);
            let found = self.id(&current) == id;
            let children = if found {
                Vec::new()
            } else {
                self.children(&current)
            };
            path.push(current);
            if found {
                return Some(path);
            }
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }
        None
    }
}

/// Set the expansion flag of `item` and every descendant, hidden or not.
pub(crate) fn set_branch_expanded<D: TreeDelegate>(
    delegate: &mut D,
    item: &D::Item,
    expanded: bool,
) {
    let mut stack = vec![item.clone()];
    while let Some(current) = stack.pop() {
        delegate.set_expanded(&current, expanded);
        stack.extend(delegate.children(&current));
    }
}
