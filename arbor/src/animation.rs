//! Reveal/conceal classification and the transition clock.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Per-item animation classification for the current operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AnimationStatus {
    /// Not animating.
    #[default]
    Idle,
    /// Entering visibility.
    Revealing,
    /// Leaving visibility; still present in the flat list until the
    /// transition completes.
    Concealing,
}

impl AnimationStatus {
    /// Whether the node is animating at all.
    pub fn is_animating(self) -> bool {
        !matches!(self, AnimationStatus::Idle)
    }

    /// Visibility factor for a row at eased `progress` (0.0 to 1.0).
    pub fn factor(self, progress: f32) -> f32 {
        match self {
            AnimationStatus::Idle => 1.0,
            AnimationStatus::Revealing => progress,
            AnimationStatus::Concealing => 1.0 - progress,
        }
    }
}

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Duration and curve of the reveal/conceal transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), Easing::default())
    }
}

/// Direction of a running transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Reveal,
    Conceal,
}

/// A running transition.
///
/// Progress is fed either by the rendering layer's animation driver
/// ([`Transition::advance`]) or derived from wall time ([`Transition::tick`]).
#[derive(Debug, Clone)]
pub struct Transition {
    kind: TransitionKind,
    config: TransitionConfig,
    start: Instant,
    progress: f32,
}

impl Transition {
    pub fn new(kind: TransitionKind, config: TransitionConfig) -> Self {
        Self {
            kind,
            config,
            start: Instant::now(),
            progress: 0.0,
        }
    }

    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    /// Raw (linear) progress.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Progress after easing.
    pub fn eased(&self) -> f32 {
        self.config.easing.apply(self.progress)
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Set progress directly. Values are clamped to 0.0..=1.0 and never
    /// move backwards.
    pub fn advance(&mut self, progress: f32) {
        let progress = if progress.is_nan() {
            self.progress
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.progress = self.progress.max(progress);
    }

    /// Derive progress from the time elapsed since the transition started.
    pub fn tick(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.start);
        let progress = if self.config.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f32() / self.config.duration.as_secs_f32()
        };
        self.advance(progress);
    }
}
