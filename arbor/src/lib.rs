//! Flattening and expand/collapse animation engine for tree views.
//!
//! The caller owns the tree and exposes it through a [`TreeDelegate`]. A
//! [`TreeController`] flattens the visible part of that tree into an indexed
//! list of [`TreeNode`]s for virtualized rendering, and runs expand/collapse
//! operations that classify the rows entering or leaving visibility as
//! revealing or concealing. Rendering, layout and input stay with the caller.

pub mod animation;
pub mod config;
pub mod controller;
pub mod delegate;
pub mod error;
pub mod flatten;
pub mod guides;
pub mod node;
pub mod settle;

pub use animation::{AnimationStatus, Easing, TransitionConfig};
pub use config::TreeConfig;
pub use controller::{Row, TreeController};
pub use delegate::TreeDelegate;
pub use error::{Result, TreeError};
pub use flatten::{Descend, Expanded, Visitor, flatten, flatten_with};
pub use guides::{GuideMetrics, IndentGuide};
pub use node::{FlatTree, TreeNode};
pub use settle::Settle;

pub mod prelude {
    pub use crate::animation::{AnimationStatus, Easing, TransitionConfig};
    pub use crate::config::TreeConfig;
    pub use crate::controller::{Row, TreeController};
    pub use crate::delegate::TreeDelegate;
    pub use crate::error::TreeError;
    pub use crate::guides::{GuideMetrics, IndentGuide};
    pub use crate::node::{FlatTree, TreeNode};
    pub use crate::settle::Settle;
}
