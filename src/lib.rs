// Crate-wide lints live in Cargo.toml ([lints]).

//! Scroll-driven hero scene and page animation engine built on wgpu.
//!
//! Plume renders a layered 3D dish with additive steam particles and drives
//! a whole single-page experience from one smoothed scroll position:
//! entrance tweens, a scrubbed hero exit, staggered reveals, parallax, a
//! pinned horizontal gallery, and hard-cut tour scenes.
//!
//! # Key entry points
//!
//! - [`engine::App`] - the assembled experience
//! - [`page::PageLayout`] - the declarative page model bindings resolve
//!   against
//! - [`options::Options`] - runtime configuration (scene, intro timing,
//!   scroll, tilt)
//! - [`scroll::ScrollBindings`] - the scroll/pointer binding table
//!
//! # Architecture
//!
//! Everything runs on the single frame clock. Each frame the smooth scroll
//! advances, the binding table reads it, the tween timeline samples, and
//! the per-frame filters (pointer follow, idle float) run last; the GPU
//! pass then draws shadow, plate, and steam in painter's order with no
//! depth attachment.

pub mod animation;
pub mod assets;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod page;
pub mod renderer;
pub mod scene;
pub mod scroll;
