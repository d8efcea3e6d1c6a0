//! Smoothed scroll position.
//!
//! Raw wheel deltas never reach the scroll bindings directly: each delta
//! retargets an eased glide, and the glide's current value is the scroll
//! position every trigger reads. The glide must be advanced before any
//! trigger evaluation on the same frame.

use std::time::Instant;

use crate::animation::EasingFunction;

/// Eased scroll position driven by wheel deltas.
pub struct SmoothScroll {
    current: f32,
    from: f32,
    target: f32,
    max: f32,
    duration: f32,
    glide_started: Option<Instant>,
}

impl SmoothScroll {
    /// Create a smooth scroller with the given glide duration in seconds.
    #[must_use]
    pub fn new(duration: f32, max: f32) -> Self {
        Self {
            current: 0.0,
            from: 0.0,
            target: 0.0,
            max: max.max(0.0),
            duration: duration.max(1e-3),
            glide_started: None,
        }
    }

    /// Update the scrollable range, re-clamping the target.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.target = self.target.clamp(0.0, self.max);
        self.current = self.current.clamp(0.0, self.max);
    }

    /// Apply a wheel delta: move the target and restart the glide from the
    /// current position.
    pub fn scroll_by(&mut self, delta: f32, now: Instant) {
        self.target = (self.target + delta).clamp(0.0, self.max);
        self.from = self.current;
        self.glide_started = Some(now);
    }

    /// Advance the glide and return the smoothed scroll position.
    pub fn update(&mut self, now: Instant) -> f32 {
        if let Some(started) = self.glide_started {
            let t = now.saturating_duration_since(started).as_secs_f32()
                / self.duration;
            let eased = EasingFunction::ExpoOut.evaluate(t);
            self.current = self.from + (self.target - self.from) * eased;
            if t >= 1.0 {
                self.current = self.target;
                self.glide_started = None;
            }
        }
        self.current
    }

    /// The smoothed position as of the last update.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// The glide's destination.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }
}
