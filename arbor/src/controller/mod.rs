//! The tree controller: flattened state, animation bookkeeping, and the
//! structural operations that move between them.
//!
//! # Example
//!
//! ```ignore
//! use arbor::prelude::*;
//!
//! let mut tree = TreeController::new(model);
//! let mut changes = tree.subscribe();
//!
//! tree.expand(&folder);
//! // render rows 0..tree.len() with tree.row(i)?, driving the reveal:
//! tree.tick(std::time::Instant::now());
//!
//! let settle = tree.collapse(&folder);
//! // ... concealing rows animate out, then:
//! tree.finish_animation();
//! settle.await?;
//! ```

mod ops;
mod visitors;

use std::collections::HashMap;
use std::time::Instant;

use kurbo::BezPath;
use log::trace;
use tokio::sync::{oneshot, watch};

use crate::animation::{AnimationStatus, Transition, TransitionKind};
use crate::config::TreeConfig;
use crate::delegate::TreeDelegate;
use crate::error::{Result, TreeError};
use crate::flatten::{Visitor, flatten, flatten_with};
use crate::guides::{GuideMetrics, IndentGuide};
use crate::node::{FlatTree, TreeNode};

/// Deferred flag changes of a collapse, applied once the conceal transition
/// completes.
enum Commit<T> {
    Collapse(T),
    CollapseCascading(T),
    CollapseAll,
}

impl<T> Commit<T> {
    fn name(&self) -> &'static str {
        match self {
            Commit::Collapse(_) => "collapse",
            Commit::CollapseCascading(_) => "collapse_cascading",
            Commit::CollapseAll => "collapse_all",
        }
    }
}

struct PendingCollapse<T> {
    commit: Commit<T>,
    done: oneshot::Sender<()>,
}

/// What the rendering layer needs for one row.
#[derive(Debug, Clone)]
pub struct Row<'a, T> {
    /// The flattened node.
    pub node: &'a TreeNode<T>,
    /// Animation classification of the node.
    pub status: AnimationStatus,
    /// Visibility factor (0.0 hidden to 1.0 fully shown) for this frame.
    pub factor: f32,
    /// Selection flag from the delegate.
    pub selected: bool,
}

/// Flattens a delegate-owned tree and animates expand/collapse changes.
///
/// The controller owns the delegate, the current [`FlatTree`], and a side
/// map of per-id [`AnimationStatus`]. Expand-family operations rebuild the
/// list right away and classify new rows as revealing. Collapse-family
/// operations classify the outgoing rows as concealing and keep them in the
/// list until the conceal transition completes, then commit.
///
/// All methods run synchronously on the caller's thread.
pub struct TreeController<D: TreeDelegate> {
    delegate: D,
    config: TreeConfig,
    tree: FlatTree<D::Item>,
    statuses: HashMap<String, AnimationStatus>,
    transition: Option<Transition>,
    pending: Option<PendingCollapse<D::Item>>,
    revision: watch::Sender<u64>,
}

impl<D: TreeDelegate> TreeController<D> {
    /// Create a controller with the default config and flatten once.
    pub fn new(delegate: D) -> Self {
        Self::with_config(delegate, TreeConfig::default())
    }

    /// Create a controller with `config` and flatten once.
    pub fn with_config(mut delegate: D, config: TreeConfig) -> Self {
        let tree = flatten(&mut delegate);
        let (revision, _) = watch::channel(0);
        Self {
            delegate,
            config,
            tree,
            statuses: HashMap::new(),
            transition: None,
            pending: None,
            revision,
        }
    }

    // -------------------------------------------------------------------------
    // Delegate and config
    // -------------------------------------------------------------------------

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Mutable access to the delegate. Call [`rebuild`](Self::rebuild)
    /// after changing the tree shape.
    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// Consume the controller, returning the delegate. A pending collapse is
    /// abandoned.
    pub fn into_delegate(self) -> D {
        self.delegate
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Replace the config. Applies to the next operation.
    pub fn set_config(&mut self, config: TreeConfig) {
        self.config = config;
    }

    // -------------------------------------------------------------------------
    // Flat list access
    // -------------------------------------------------------------------------

    /// Number of rows currently in the flat list.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The current flat list.
    pub fn tree(&self) -> &FlatTree<D::Item> {
        &self.tree
    }

    pub fn nodes(&self) -> &[TreeNode<D::Item>] {
        self.tree.nodes()
    }

    /// Node at `index`, or [`TreeError::IndexOutOfRange`].
    pub fn node(&self, index: usize) -> Result<&TreeNode<D::Item>> {
        self.tree.node(index)
    }

    /// Node, animation status and visibility factor for row `index`.
    pub fn row(&self, index: usize) -> Result<Row<'_, D::Item>> {
        let node = self.tree.node(index)?;
        let status = self.status(&node.id);
        let progress = self.animation_progress().unwrap_or(1.0);
        Ok(Row {
            node,
            status,
            factor: status.factor(progress),
            selected: self.delegate.is_selected(&node.item),
        })
    }

    /// Visible node with `id`.
    pub fn find(&self, id: &str) -> Option<&TreeNode<D::Item>> {
        self.tree.find(id)
    }

    /// Flat index of the visible node with `id`.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tree.index_of(id)
    }

    /// Guide skip flags for row `index` (see [`FlatTree::skip_levels`]).
    pub fn skip_levels(&self, index: usize) -> Result<&[bool]> {
        self.tree.skip_levels(index).ok_or(TreeError::IndexOutOfRange {
            index,
            len: self.tree.len(),
        })
    }

    /// Guide geometry for row `index`.
    pub fn guide_path(
        &self,
        index: usize,
        guide: IndentGuide,
        metrics: &GuideMetrics,
    ) -> Result<BezPath> {
        self.tree.node(index)?;
        Ok(guide.path(&self.tree, index, metrics))
    }

    /// Whether every root is expanded. False when there are no roots.
    pub fn are_all_roots_expanded(&self) -> bool {
        let roots = self.delegate.roots();
        !roots.is_empty() && roots.iter().all(|root| self.delegate.is_expanded(root))
    }

    /// Whether every root is collapsed. True when there are no roots.
    pub fn are_all_roots_collapsed(&self) -> bool {
        self.delegate
            .roots()
            .iter()
            .all(|root| !self.delegate.is_expanded(root))
    }

    // -------------------------------------------------------------------------
    // Animation state
    // -------------------------------------------------------------------------

    /// Animation status of the item with `id`.
    pub fn status(&self, id: &str) -> AnimationStatus {
        self.statuses.get(id).copied().unwrap_or_default()
    }

    /// Ids currently classified revealing, in flat order.
    pub fn revealing(&self) -> Vec<&str> {
        self.ids_with(AnimationStatus::Revealing)
    }

    /// Ids currently classified concealing, in flat order.
    pub fn concealing(&self) -> Vec<&str> {
        self.ids_with(AnimationStatus::Concealing)
    }

    fn ids_with(&self, status: AnimationStatus) -> Vec<&str> {
        self.tree
            .iter()
            .filter(|node| self.status(&node.id) == status)
            .map(|node| node.id.as_str())
            .collect()
    }

    /// Whether a reveal or conceal transition is running.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Whether a collapse is waiting for its conceal transition.
    pub fn has_pending_collapse(&self) -> bool {
        self.pending.is_some()
    }

    /// Eased progress of the running transition.
    pub fn animation_progress(&self) -> Option<f32> {
        self.transition.as_ref().map(Transition::eased)
    }

    /// Report transition progress from the rendering layer's animation
    /// driver. Reaching 1.0 completes the transition.
    pub fn advance(&mut self, progress: f32) {
        if let Some(transition) = self.transition.as_mut() {
            transition.advance(progress);
            trace!("[tree] transition progress {:.3}", transition.progress());
        }
        self.complete_transition();
    }

    /// Derive progress from wall time and the configured duration.
    ///
    /// Returns the eased progress for this frame, or `None` when nothing is
    /// animating.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let transition = self.transition.as_mut()?;
        transition.tick(now);
        let eased = transition.eased();
        self.complete_transition();
        Some(eased)
    }

    /// Jump the running transition to its end.
    pub fn finish_animation(&mut self) {
        self.advance(1.0);
    }

    fn complete_transition(&mut self) {
        if !self.transition.as_ref().is_some_and(Transition::is_complete) {
            return;
        }
        let Some(transition) = self.transition.take() else {
            return;
        };
        match transition.kind() {
            TransitionKind::Reveal => self.statuses.clear(),
            TransitionKind::Conceal => {
                if !self.settle_pending() {
                    self.statuses.clear();
                }
            }
        }
    }

    fn reset_animation(&mut self) {
        self.statuses.clear();
        self.transition = None;
    }

    /// Classify `revealing` and start the reveal transition.
    fn begin_reveal(&mut self, revealing: Vec<String>) -> usize {
        if revealing.is_empty() || self.config.reduced_motion {
            return 0;
        }
        let count = revealing.len();
        self.statuses.extend(
            revealing
                .into_iter()
                .map(|id| (id, AnimationStatus::Revealing)),
        );
        self.transition = Some(Transition::new(TransitionKind::Reveal, self.config.transition));
        count
    }

    // -------------------------------------------------------------------------
    // Change notification
    // -------------------------------------------------------------------------

    /// Receiver of the rebuild counter. Changes once per completed rebuild.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Number of rebuilds completed since creation.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn refresh(&mut self) {
        self.tree = flatten(&mut self.delegate);
        self.notify();
    }

    fn refresh_with<V: Visitor<D>>(&mut self, visitor: &mut V) {
        self.tree = flatten_with(&mut self.delegate, visitor);
        self.notify();
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
