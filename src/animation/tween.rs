//! Property tweens and the timeline that drives them.
//!
//! A tween maps one scalar channel (a dish transform component or a page
//! element property) from a start to an end value over a duration, with an
//! optional delay and easing. The timeline tracks active tweens, samples
//! them once per frame into a pre-allocated buffer, and reports completions
//! so the engine can run hand-off logic (loader removal, dish phase
//! transitions).

use std::time::Instant;

use super::easing::EasingFunction;
use crate::page::{ElementRef, Property};

/// The scalar value a tween writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Dish group vertical position.
    DishPositionY,
    /// Dish group depth position.
    DishPositionZ,
    /// Entrance rotation around the horizontal axis.
    DishRotationX,
    /// Entrance rotation around the vertical axis.
    DishRotationY,
    /// A page element property.
    Element(ElementRef, Property),
}

/// One property tween: `from` → `to` over `duration` seconds after `delay`.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    /// Target channel.
    pub channel: Channel,
    /// Start value.
    pub from: f32,
    /// End value.
    pub to: f32,
    /// Delay in seconds before the tween starts producing samples.
    pub delay: f32,
    /// Duration in seconds.
    pub duration: f32,
    /// Easing curve.
    pub easing: EasingFunction,
}

impl Tween {
    /// Create a tween with no delay and the default easing.
    #[must_use]
    pub fn new(channel: Channel, from: f32, to: f32, duration: f32) -> Self {
        Self {
            channel,
            from,
            to,
            delay: 0.0,
            duration,
            easing: EasingFunction::DEFAULT,
        }
    }

    /// Set the start delay in seconds.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }
}

/// Add `step * index` to each tween's delay, in order.
pub fn stagger(tweens: &mut [Tween], step: f32) {
    for (i, tween) in tweens.iter_mut().enumerate() {
        tween.delay += step * i as f32;
    }
}

/// An active tween being played.
#[derive(Debug)]
struct ActiveTween {
    tween: Tween,
    queued_at: Instant,
    done: bool,
}

impl ActiveTween {
    /// Raw progress in [0, 1], or `None` while still in the delay window.
    fn progress(&self, now: Instant) -> Option<f32> {
        let elapsed =
            now.saturating_duration_since(self.queued_at).as_secs_f32();
        let local = elapsed - self.tween.delay;
        if local < 0.0 {
            return None;
        }
        if self.tween.duration <= 0.0 {
            return Some(1.0);
        }
        Some((local / self.tween.duration).min(1.0))
    }
}

/// Timeline managing the set of active tweens.
///
/// Buffers are pre-allocated; `update` performs no allocation in the
/// steady state.
pub struct Timeline {
    active: Vec<ActiveTween>,
    samples: Vec<(Channel, f32)>,
    completed: Vec<Channel>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: Vec::with_capacity(16),
            samples: Vec::with_capacity(16),
            completed: Vec::with_capacity(4),
        }
    }

    /// Queue a tween starting at `now`.
    ///
    /// Preempts any active tween on the same channel: the newcomer owns the
    /// channel from this frame on, so two writers never race.
    pub fn add(&mut self, tween: Tween, now: Instant) {
        for active in &mut self.active {
            if active.tween.channel == tween.channel {
                active.done = true;
            }
        }
        self.active.push(ActiveTween {
            tween,
            queued_at: now,
            done: false,
        });
    }

    /// Queue several tweens at once.
    pub fn add_all(
        &mut self,
        tweens: impl IntoIterator<Item = Tween>,
        now: Instant,
    ) {
        for tween in tweens {
            self.add(tween, now);
        }
    }

    /// Sample all active tweens at `now`.
    ///
    /// Fills the sample buffer with one `(channel, value)` pair per running
    /// tween (none while a tween is still delayed) and the completion list
    /// with channels whose tween finished this frame, final sample
    /// included. Returns `true` while any tween remains active.
    pub fn update(&mut self, now: Instant) -> bool {
        self.samples.clear();
        self.completed.clear();
        self.active.retain(|a| !a.done);

        for active in &mut self.active {
            let Some(t) = active.progress(now) else {
                continue;
            };
            let eased = active.tween.easing.evaluate(t);
            let value = active.tween.from
                + (active.tween.to - active.tween.from) * eased;
            self.samples.push((active.tween.channel, value));

            if t >= 1.0 {
                active.done = true;
                self.completed.push(active.tween.channel);
            }
        }

        self.active.iter().any(|a| !a.done)
    }

    /// Samples produced by the last `update`.
    #[inline]
    pub fn samples(&self) -> &[(Channel, f32)] {
        &self.samples
    }

    /// Channels whose tween completed during the last `update`.
    #[inline]
    pub fn completed(&self) -> &[Channel] {
        &self.completed
    }

    /// Whether any tween is queued or running.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.active.iter().any(|a| !a.done)
    }

    /// Drop all tweens without emitting final samples.
    pub fn cancel(&mut self) {
        self.active.clear();
        self.samples.clear();
        self.completed.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const CH: Channel = Channel::DishPositionY;

    fn sample_for(timeline: &Timeline, channel: Channel) -> Option<f32> {
        timeline
            .samples()
            .iter()
            .find(|(c, _)| *c == channel)
            .map(|(_, v)| *v)
    }

    #[test]
    fn linear_tween_samples_midpoint() {
        let start = Instant::now();
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(CH, -3.0, 0.0, 2.0)
                .with_easing(EasingFunction::Linear),
            start,
        );

        assert!(timeline.update(start + Duration::from_secs(1)));
        assert!((sample_for(&timeline, CH).unwrap() - (-1.5)).abs() < 1e-5);
    }

    #[test]
    fn delayed_tween_emits_nothing_until_it_starts() {
        let start = Instant::now();
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(CH, 0.0, 1.0, 1.0).with_delay(0.5),
            start,
        );

        let _ = timeline.update(start + Duration::from_millis(100));
        assert!(timeline.samples().is_empty());
        assert!(timeline.is_animating());

        let _ = timeline.update(start + Duration::from_millis(600));
        assert!(sample_for(&timeline, CH).is_some());
    }

    #[test]
    fn completion_emits_final_sample_then_retires() {
        let start = Instant::now();
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(CH, 1.0, 0.0, 1.0).with_easing(EasingFunction::Linear),
            start,
        );

        let still = timeline.update(start + Duration::from_secs(2));
        assert!(!still);
        assert_eq!(sample_for(&timeline, CH), Some(0.0));
        assert_eq!(timeline.completed(), &[CH]);

        let _ = timeline.update(start + Duration::from_secs(3));
        assert!(timeline.samples().is_empty());
        assert!(!timeline.is_animating());
    }

    #[test]
    fn same_channel_tween_preempts_the_running_one() {
        let start = Instant::now();
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(CH, 0.0, 10.0, 10.0)
                .with_easing(EasingFunction::Linear),
            start,
        );
        timeline.add(
            Tween::new(CH, 5.0, 6.0, 1.0).with_easing(EasingFunction::Linear),
            start + Duration::from_secs(1),
        );

        let _ = timeline.update(start + Duration::from_millis(1500));
        // Only the newcomer samples.
        assert_eq!(timeline.samples().len(), 1);
        let v = sample_for(&timeline, CH).unwrap();
        assert!((v - 5.5).abs() < 1e-5);
    }

    #[test]
    fn independent_channels_run_concurrently() {
        let start = Instant::now();
        let mut timeline = Timeline::new();
        timeline.add(
            Tween::new(Channel::DishRotationX, 0.5, 0.0, 2.5),
            start,
        );
        timeline.add(
            Tween::new(Channel::DishRotationY, -0.5, 0.0, 2.5),
            start,
        );

        let _ = timeline.update(start + Duration::from_secs(1));
        assert_eq!(timeline.samples().len(), 2);
    }

    #[test]
    fn stagger_spaces_delays_by_the_step() {
        let mut tweens: Vec<Tween> = (0..4)
            .map(|i| {
                Tween::new(
                    Channel::Element(
                        ElementRef::EditorialChild(i),
                        Property::Opacity,
                    ),
                    0.0,
                    1.0,
                    1.0,
                )
            })
            .collect();
        stagger(&mut tweens, 0.2);

        for (i, tween) in tweens.iter().enumerate() {
            assert!((tween.delay - 0.2 * i as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let start = Instant::now();
        let mut timeline = Timeline::new();
        timeline.add(Tween::new(CH, 0.0, 1.0, 0.0), start);

        let _ = timeline.update(start);
        assert_eq!(sample_for(&timeline, CH), Some(1.0));
        assert_eq!(timeline.completed(), &[CH]);
    }
}
