//! Time-driven progress from 0 to 1

use crate::easing::Ease;

/// A single tween of a progress value from 0 to 1 over `duration` seconds.
///
/// Time is fed in by the frame loop through [`advance`](Self::advance); the
/// tween never reads a clock itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    /// Negative or non-finite durations are treated as zero
    pub fn new(duration: f32, ease: Ease) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            duration,
            elapsed: 0.0,
            ease,
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// A tween with no duration finishes as soon as it starts
    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0
    }

    /// Linear progress in [0, 1]
    pub fn linear_progress(&self) -> f32 {
        if self.is_instant() {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Eased progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.ease.apply(self.linear_progress())
    }

    pub fn is_finished(&self) -> bool {
        self.linear_progress() >= 1.0
    }

    /// Advance by `dt` seconds and return the eased progress
    pub fn advance(&mut self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        self.progress()
    }
}
