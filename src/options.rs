//! Runtime configuration with TOML preset support.
//!
//! Every tuned constant of the experience (scene layout, intro timing,
//! scroll behavior, card tilt) lives here. All sub-structs use
//! `#[serde(default)]` so a partial TOML file overriding one table works.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlumeError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera and scene construction parameters.
    pub scene: SceneOptions,
    /// Intro (entrance) animation timing.
    pub intro: IntroOptions,
    /// Scroll-linked behavior parameters.
    pub scroll: ScrollOptions,
    /// Menu card tilt parameters.
    pub tilt: TiltOptions,
}

/// Camera and scene construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Camera distance back along the principal axis.
    pub camera_distance: f32,
    /// Number of steam particles.
    pub particle_count: usize,
    /// Window clear color (linear RGBA).
    pub background: [f32; 4],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            fovy: 35.0,
            camera_distance: 10.0,
            particle_count: 40,
            background: [0.043, 0.03, 0.025, 1.0],
        }
    }
}

/// Intro (entrance) animation timing, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntroOptions {
    /// Loader overlay fade duration.
    pub loader_fade: f32,
    /// Delay before the loader fade starts.
    pub loader_delay: f32,
    /// Dish drop-in duration.
    pub dish_drop: f32,
    /// Vertical start offset of the drop-in.
    pub dish_drop_offset: f32,
    /// Dish rotation settle duration.
    pub dish_settle: f32,
    /// Rotation start offset (x, y) in radians.
    pub dish_tilt_offset: [f32; 2],
    /// Hero title fade duration.
    pub title_fade: f32,
    /// Delay before the title fade starts.
    pub title_delay: f32,
}

impl Default for IntroOptions {
    fn default() -> Self {
        Self {
            loader_fade: 1.2,
            loader_delay: 0.5,
            dish_drop: 2.2,
            dish_drop_offset: -3.0,
            dish_settle: 2.5,
            dish_tilt_offset: [0.5, -0.5],
            title_fade: 1.5,
            title_delay: 1.0,
        }
    }
}

/// Scroll-linked behavior parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollOptions {
    /// Smooth-scroll glide duration in seconds.
    pub smooth_duration: f32,
    /// Scroll distance over which the hero exit scrubs, in document units.
    pub hero_exit_end: f32,
    /// Hero exit target position (y, z).
    pub hero_exit_target: [f32; 2],
    /// Viewport-height fraction at which the editorial reveal fires.
    pub reveal_viewport_fraction: f32,
    /// Per-child reveal duration in seconds.
    pub reveal_duration: f32,
    /// Stagger between children in seconds.
    pub reveal_stagger: f32,
    /// Vertical start offset of revealed children.
    pub reveal_offset: f32,
    /// Maximum parallax offset as a percentage of image height.
    pub parallax_percent: f32,
    /// Extra horizontal travel of the gallery, as a viewport-width
    /// fraction.
    pub gallery_overshoot: f32,
    /// Damped-scrub time constant in seconds.
    pub scrub_damping: f32,
    /// Pin lookahead in scroll units.
    pub anticipate_pin: f32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            smooth_duration: 1.2,
            hero_exit_end: 1000.0,
            hero_exit_target: [-5.0, -5.0],
            reveal_viewport_fraction: 0.75,
            reveal_duration: 1.0,
            reveal_stagger: 0.2,
            reveal_offset: 50.0,
            parallax_percent: 20.0,
            gallery_overshoot: 0.2,
            scrub_damping: 1.0,
            anticipate_pin: 1.0,
        }
    }
}

/// Menu card tilt parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TiltOptions {
    /// Degrees of rotation at the card edge.
    pub strength: f32,
    /// Follow tween duration in seconds.
    pub follow_duration: f32,
    /// Release (spring back) duration in seconds.
    pub release_duration: f32,
}

impl Default for TiltOptions {
    fn default() -> Self {
        Self {
            strength: 15.0,
            follow_duration: 0.5,
            release_duration: 0.8,
        }
    }
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PlumeError::Io`] on read failure or
    /// [`PlumeError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, PlumeError> {
        let content = std::fs::read_to_string(path).map_err(PlumeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| PlumeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`PlumeError::Io`] on write failure or
    /// [`PlumeError::OptionsParse`] on serialization failure.
    pub fn save(&self, path: &Path) -> Result<(), PlumeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PlumeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PlumeError::Io)?;
        }
        std::fs::write(path, content).map_err(PlumeError::Io)
    }
}
