//! Scroll-progress observers.
//!
//! A [`ScrollTrigger`] maps the smoothed scroll position to a progress
//! value in [0, 1] over a fixed document range, linearly and monotonically.
//! Scrubbed bindings read the progress every frame; play-once behaviors use
//! [`OnceTrigger`] instead.

/// How trigger progress follows the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scrub {
    /// Progress tracks the scroll position exactly.
    Immediate,
    /// Progress eases toward the raw value with the given time constant in
    /// seconds (catches up in roughly that long).
    Damped(f32),
}

/// Progress observer over a scroll range `[start, end]`.
#[derive(Debug, Clone)]
pub struct ScrollTrigger {
    start: f32,
    end: f32,
    scrub: Scrub,
    progress: f32,
}

impl ScrollTrigger {
    /// Create a trigger over `[start, end]` document scroll units.
    #[must_use]
    pub fn new(start: f32, end: f32, scrub: Scrub) -> Self {
        Self {
            start,
            end,
            scrub,
            progress: 0.0,
        }
    }

    /// Raw progress for a scroll position: linear within the range, clamped
    /// outside it.
    pub fn raw_progress(&self, scroll: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll >= self.end { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / span).clamp(0.0, 1.0)
    }

    /// Advance the trigger one frame and return the (possibly damped)
    /// progress.
    pub fn update(&mut self, scroll: f32, dt: f32) -> f32 {
        let raw = self.raw_progress(scroll);
        self.progress = match self.scrub {
            Scrub::Immediate => raw,
            Scrub::Damped(tau) => {
                let alpha = 1.0 - (-dt / tau.max(1e-3)).exp();
                self.progress + (raw - self.progress) * alpha
            }
        };
        self.progress
    }

    /// Recompute the range after a layout change, keeping current progress.
    pub fn refresh(&mut self, start: f32, end: f32) {
        self.start = start;
        self.end = end;
    }

    /// Start of the scroll range.
    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    /// End of the scroll range.
    #[inline]
    pub fn end(&self) -> f32 {
        self.end
    }
}

/// Fires exactly once, the first time the scroll position crosses the
/// threshold.
#[derive(Debug, Clone)]
pub struct OnceTrigger {
    threshold: f32,
    fired: bool,
}

impl OnceTrigger {
    /// Create a trigger that fires at the given scroll position.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            fired: false,
        }
    }

    /// Returns `true` on the single frame the threshold is first crossed.
    pub fn update(&mut self, scroll: f32) -> bool {
        if !self.fired && scroll >= self.threshold {
            self.fired = true;
            return true;
        }
        false
    }

    /// Update the threshold after a layout change. An already-fired trigger
    /// stays fired.
    pub fn refresh(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    /// Whether the trigger has fired.
    #[inline]
    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_linear_and_clamped() {
        let trigger = ScrollTrigger::new(100.0, 1100.0, Scrub::Immediate);
        assert_eq!(trigger.raw_progress(0.0), 0.0);
        assert_eq!(trigger.raw_progress(100.0), 0.0);
        assert_eq!(trigger.raw_progress(600.0), 0.5);
        assert_eq!(trigger.raw_progress(1100.0), 1.0);
        assert_eq!(trigger.raw_progress(9999.0), 1.0);
    }

    #[test]
    fn progress_is_monotone_in_scroll() {
        let trigger = ScrollTrigger::new(0.0, 1000.0, Scrub::Immediate);
        let mut previous = 0.0;
        for step in 0..50 {
            let p = trigger.raw_progress(step as f32 * 30.0);
            assert!(p >= previous);
            previous = p;
        }
    }

    #[test]
    fn damped_scrub_catches_up_without_overshoot() {
        let mut trigger = ScrollTrigger::new(0.0, 1000.0, Scrub::Damped(1.0));
        // Scroll jumps straight to the end; progress follows over time.
        let mut previous = 0.0;
        for _ in 0..600 {
            let p = trigger.update(1000.0, 1.0 / 60.0);
            assert!(p >= previous);
            assert!(p <= 1.0);
            previous = p;
        }
        assert!(previous > 0.99, "damped progress never caught up");
    }

    #[test]
    fn immediate_scrub_is_reversible() {
        let mut trigger = ScrollTrigger::new(0.0, 1000.0, Scrub::Immediate);
        assert_eq!(trigger.update(500.0, 0.016), 0.5);
        assert_eq!(trigger.update(250.0, 0.016), 0.25);
        assert_eq!(trigger.update(0.0, 0.016), 0.0);
    }

    #[test]
    fn refresh_rescales_progress_to_the_new_range() {
        let mut trigger = ScrollTrigger::new(0.0, 1000.0, Scrub::Immediate);
        let _ = trigger.update(500.0, 0.016);
        trigger.refresh(0.0, 2000.0);
        assert_eq!(trigger.update(500.0, 0.016), 0.25);
    }

    #[test]
    fn once_trigger_fires_exactly_once() {
        let mut once = OnceTrigger::new(750.0);
        assert!(!once.update(0.0));
        assert!(!once.update(749.0));
        assert!(once.update(750.0));
        assert!(!once.update(800.0));
        assert!(!once.update(700.0));
        assert!(once.has_fired());
    }

    #[test]
    fn degenerate_range_is_a_step() {
        let trigger = ScrollTrigger::new(500.0, 500.0, Scrub::Immediate);
        assert_eq!(trigger.raw_progress(499.0), 0.0);
        assert_eq!(trigger.raw_progress(500.0), 1.0);
    }
}
