//! Structural operations and selection.

use log::debug;

use super::visitors::{Cascade, ExpandEverything, Reveal};
use super::{Commit, PendingCollapse, TreeController};
use crate::animation::{AnimationStatus, Transition, TransitionKind};
use crate::delegate::{TreeDelegate, set_branch_expanded};
use crate::error::{Result, TreeError};
use crate::node::TreeNode;
use crate::settle::Settle;

impl<D: TreeDelegate> TreeController<D> {
    // -------------------------------------------------------------------------
    // Expand
    // -------------------------------------------------------------------------

    /// Collapse `item` if it is expanded, expand it otherwise. A pending
    /// collapse commits before the flag is read.
    pub fn toggle(&mut self, item: &D::Item) -> Settle {
        self.settle_pending();
        if self.delegate.is_expanded(item) {
            self.collapse(item)
        } else {
            self.expand(item);
            Settle::ready()
        }
    }

    /// Expand `item`. Its descendants that become visible are revealed; the
    /// item itself does not animate.
    pub fn expand(&mut self, item: &D::Item) {
        self.settle_pending();
        self.reset_animation();

        let id = self.delegate.id(item);
        let was_expanded = self.delegate.is_expanded(item);
        self.delegate.set_expanded(item, true);

        let previous = std::mem::take(&mut self.tree);
        let mut reveal = Reveal::within(&id, &previous);
        self.refresh_with(&mut reveal);
        let revealing = if was_expanded {
            Vec::new()
        } else {
            reveal.revealing
        };

        let count = self.begin_reveal(revealing);
        debug!("[tree] expand '{}': {} revealing", id, count);
    }

    /// Expand `item` and every descendant, revealing the whole branch.
    pub fn expand_cascading(&mut self, item: &D::Item) {
        self.settle_pending();
        self.reset_animation();

        let id = self.delegate.id(item);
        let previous = std::mem::take(&mut self.tree);
        let revealing = if previous.contains(&id) {
            let mut pass = (Cascade::new(id.clone()), Reveal::within(&id, &previous));
            self.refresh_with(&mut pass);
            pass.1.revealing
        } else {
            // Hidden target: the pass never reaches it, so force the branch
            // up front. Nothing of it becomes visible.
            set_branch_expanded(&mut self.delegate, item, true);
            self.refresh();
            Vec::new()
        };

        let count = self.begin_reveal(revealing);
        debug!("[tree] expand_cascading '{}': {} revealing", id, count);
    }

    /// Expand every item reachable from the roots. Every non-root row is
    /// revealed.
    pub fn expand_all(&mut self) {
        self.settle_pending();
        self.reset_animation();

        let mut pass = (ExpandEverything, Reveal::everywhere(None));
        self.refresh_with(&mut pass);

        let count = self.begin_reveal(pass.1.revealing);
        debug!("[tree] expand_all: {} revealing", count);
    }

    /// Expand every ancestor of the item with `id` so that it becomes
    /// visible. Rows that appear are revealed.
    pub fn expand_to(&mut self, id: &str) -> Result<()> {
        let path = self
            .delegate
            .path_to(id)
            .ok_or_else(|| TreeError::UnknownId(id.to_string()))?;

        self.settle_pending();
        self.reset_animation();

        if let Some((_, ancestors)) = path.split_last() {
            for ancestor in ancestors {
                self.delegate.set_expanded(ancestor, true);
            }
        }

        let previous = std::mem::take(&mut self.tree);
        let mut reveal = Reveal::everywhere(Some(&previous));
        self.refresh_with(&mut reveal);

        let count = self.begin_reveal(reveal.revealing);
        debug!("[tree] expand_to '{}': {} revealing", id, count);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Collapse
    // -------------------------------------------------------------------------

    /// Collapse `item` once its visible descendants have animated out.
    pub fn collapse(&mut self, item: &D::Item) -> Settle {
        self.conceal(Commit::Collapse(item.clone()))
    }

    /// Collapse `item` and every descendant once the visible ones have
    /// animated out.
    pub fn collapse_cascading(&mut self, item: &D::Item) -> Settle {
        self.conceal(Commit::CollapseCascading(item.clone()))
    }

    /// Collapse everything once all non-root rows have animated out.
    pub fn collapse_all(&mut self) -> Settle {
        self.conceal(Commit::CollapseAll)
    }

    /// Re-flatten without touching any flag, e.g. after the caller changed
    /// the data. Discards the current classification.
    pub fn rebuild(&mut self) {
        if self.settle_pending() {
            return;
        }
        self.reset_animation();
        self.refresh();
        debug!("[tree] rebuild: {} visible", self.tree.len());
    }

    fn conceal(&mut self, commit: Commit<D::Item>) -> Settle {
        self.settle_pending();
        self.reset_animation();

        let concealing: Vec<String> = match &commit {
            Commit::Collapse(item) | Commit::CollapseCascading(item) => {
                let id = self.delegate.id(item);
                match self.tree.index_of(&id) {
                    Some(index) => self.tree.nodes()[self.tree.descendant_range(index)]
                        .iter()
                        .map(|node| node.id.clone())
                        .collect(),
                    None => Vec::new(),
                }
            }
            Commit::CollapseAll => self
                .tree
                .iter()
                .filter(|node| !node.is_root())
                .map(|node| node.id.clone())
                .collect(),
        };
        debug!("[tree] {}: {} concealing", commit.name(), concealing.len());

        if concealing.is_empty() || self.config.reduced_motion {
            self.commit(commit);
            return Settle::ready();
        }

        self.statuses.extend(
            concealing
                .into_iter()
                .map(|id| (id, AnimationStatus::Concealing)),
        );
        self.transition = Some(Transition::new(TransitionKind::Conceal, self.config.transition));
        let (done, settle) = Settle::pending();
        self.pending = Some(PendingCollapse { commit, done });
        settle
    }

    /// Run the pending collapse continuation, if any. Returns whether one ran.
    pub(super) fn settle_pending(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.commit(pending.commit);
        // The caller may have dropped its handle.
        let _ = pending.done.send(());
        true
    }

    fn commit(&mut self, commit: Commit<D::Item>) {
        match commit {
            Commit::Collapse(item) => self.delegate.set_expanded(&item, false),
            Commit::CollapseCascading(item) => {
                set_branch_expanded(&mut self.delegate, &item, false)
            }
            Commit::CollapseAll => {
                for root in self.delegate.roots() {
                    set_branch_expanded(&mut self.delegate, &root, false);
                }
            }
        }
        self.reset_animation();
        self.refresh();
        debug!("[tree] collapse committed: {} visible", self.tree.len());
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn select(&mut self, item: &D::Item) {
        self.delegate.set_selected(item, true);
    }

    pub fn deselect(&mut self, item: &D::Item) {
        self.delegate.set_selected(item, false);
    }

    /// Flip the selection of `item`, returning the new state.
    pub fn toggle_selection(&mut self, item: &D::Item) -> bool {
        let selected = !self.delegate.is_selected(item);
        self.delegate.set_selected(item, selected);
        selected
    }

    /// Deselect every item in the tree, hidden ones included.
    pub fn clear_selection(&mut self) {
        let mut selected = Vec::new();
        self.delegate.depth_first_search(
            |_| false,
            |item| {
                if self.delegate.is_selected(item) {
                    selected.push(item.clone());
                }
            },
        );
        for item in &selected {
            self.delegate.set_selected(item, false);
        }
        debug!("[tree] cleared {} selected", selected.len());
    }

    /// Visible selected rows, in flat order.
    pub fn selected(&self) -> Vec<&TreeNode<D::Item>> {
        self.tree
            .iter()
            .filter(|node| self.delegate.is_selected(&node.item))
            .collect()
    }
}
