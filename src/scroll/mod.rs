//! Scroll plumbing: the smoothed scroll position, progress triggers over
//! document ranges, and the binding table that maps scroll to page and
//! scene state.

pub mod bindings;
pub mod smooth;
pub mod trigger;

pub use bindings::{pin_distance, scene_index, tilt_rotation, ScrollBindings};
pub use smooth::SmoothScroll;
pub use trigger::{OnceTrigger, ScrollTrigger, Scrub};
