//! Controller configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{Easing, TransitionConfig};

/// Configuration for a [`TreeController`](crate::TreeController).
///
/// Deserializable so hosts can keep it in their own settings files; missing
/// fields fall back to the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Reveal/conceal transition.
    pub transition: TransitionConfig,

    /// When true, nothing is ever classified revealing or concealing and
    /// collapses commit immediately.
    pub reduced_motion: bool,
}

impl TreeConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transition duration and easing.
    pub fn transition(mut self, duration: Duration, easing: Easing) -> Self {
        self.transition = TransitionConfig::new(duration, easing);
        self
    }

    /// Enable or disable reduced motion.
    pub fn reduced_motion(mut self, enabled: bool) -> Self {
        self.reduced_motion = enabled;
        self
    }
}
