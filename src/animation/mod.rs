//! Tween-based animation: easing curves, the property timeline, and the
//! entrance sequence.

pub mod easing;
pub mod intro;
pub mod tween;

pub use easing::EasingFunction;
pub use intro::intro_tweens;
pub use tween::{stagger, Channel, Timeline, Tween};
