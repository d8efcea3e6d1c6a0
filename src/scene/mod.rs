//! Hero scene entities: the dish group and the steam particle field.

use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

/// Common scale factor applied to both dish quads.
pub const DISH_SCALE: f32 = 3.5;
/// Fraction of the pointer excursion the dish tilts toward.
pub const POINTER_TILT: f32 = 0.3;
/// Per-frame damping of the pointer-follow filter. Guarantees monotone
/// convergence without oscillation.
pub const POINTER_DAMPING: f32 = 0.05;
/// Amplitude of the idle floating motion.
pub const FLOAT_AMPLITUDE: f32 = 0.0008;

/// Exponential approach of `current` toward `target`.
///
/// With `damping` in (0, 1] the sequence is monotone and never overshoots.
#[inline]
#[must_use]
pub fn approach(current: f32, target: f32, damping: f32) -> f32 {
    current + (target - current) * damping
}

/// Host-side mirror of the steam shader's vertical offset.
///
/// `(t * (0.2 + 0.2 * seed)) mod 4.0` — wraps every 4 units so a particle
/// rises forever without its offset growing unbounded.
#[inline]
#[must_use]
pub fn steam_vertical_offset(seed: f32, t: f32) -> f32 {
    (t * (0.2 + 0.2 * seed)) % 4.0
}

/// Who is currently allowed to drive the dish position.
///
/// The entrance tween and the hero-exit scroll binding both target the dish
/// position; this state machine makes their hand-off explicit instead of
/// letting the two write sources race frame by frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DishPhase {
    /// Entrance animation owns the position; scroll writes are rejected.
    Entering,
    /// At rest; idle float applies.
    Idle,
    /// Hero-exit scrub owns the position.
    ScrollDriven,
}

/// Layout of one textured quad inside the dish group.
#[derive(Debug, Clone, Copy)]
pub struct QuadSpec {
    /// Edge length before the group scale factor.
    pub size: f32,
    /// Offset from the group origin.
    pub offset: Vec3,
    /// Uniform opacity multiplier.
    pub opacity: f32,
    /// Whether the quad is the non-occluding shadow layer.
    pub is_shadow: bool,
}

/// Shadow quad: larger, semi-transparent, behind and below the plate.
pub const SHADOW_QUAD: QuadSpec = QuadSpec {
    size: 1.2,
    offset: Vec3::new(0.0, -0.2, -0.5),
    opacity: 0.6,
    is_shadow: true,
};

/// Plate quad: unit size, blended by its own texture alpha.
pub const PLATE_QUAD: QuadSpec = QuadSpec {
    size: 1.0,
    offset: Vec3::ZERO,
    opacity: 1.0,
    is_shadow: false,
};

/// The composite dish entity: two layered quads sharing one transform.
///
/// Rotation is split into a `base` component (settled by the entrance tween)
/// and a `pointer` component (the per-frame exponential follow), summed at
/// render time, so the tween and the follow filter never write the same
/// field.
pub struct DishGroup {
    /// Current group position. Rest position is the origin.
    pub position: Vec3,
    /// Accumulated idle-float bob, kept apart from `position` so the
    /// hero-exit scrub writing `position` never cancels it.
    pub float_offset: f32,
    /// Entrance-tweened rotation component (settles to zero).
    pub base_rotation: Vec2,
    /// Pointer-follow rotation component.
    pub pointer_rotation: Vec2,
    /// Current ownership phase.
    pub phase: DishPhase,
}

impl Default for DishGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl DishGroup {
    /// Create the dish at rest, awaiting its entrance animation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            float_offset: 0.0,
            base_rotation: Vec2::ZERO,
            pointer_rotation: Vec2::ZERO,
            phase: DishPhase::Entering,
        }
    }

    /// Mark the entrance animation as finished; scroll writes may begin.
    pub fn finish_entrance(&mut self) {
        if self.phase == DishPhase::Entering {
            self.phase = DishPhase::Idle;
        }
    }

    /// Combined rotation (x tilt, y turn) in radians.
    pub fn rotation(&self) -> Vec2 {
        self.base_rotation + self.pointer_rotation
    }

    /// Advance the pointer-follow filter one frame.
    ///
    /// The x tilt follows the vertical pointer axis and the y turn the
    /// horizontal one, each approaching `POINTER_TILT` times the pointer.
    pub fn smooth_toward_pointer(&mut self, pointer_x: f32, pointer_y: f32) {
        self.pointer_rotation.x = approach(
            self.pointer_rotation.x,
            pointer_y * POINTER_TILT,
            POINTER_DAMPING,
        );
        self.pointer_rotation.y = approach(
            self.pointer_rotation.y,
            pointer_x * POINTER_TILT,
            POINTER_DAMPING,
        );
    }

    /// Idle floating bob, accumulated only while no other writer owns the
    /// position. Lives in its own offset channel so the per-frame scroll
    /// write to `position` cannot zero it out.
    pub fn float(&mut self, time: f32) {
        if self.phase == DishPhase::Idle {
            self.float_offset += time.sin() * FLOAT_AMPLITUDE;
        }
    }

    /// Apply the hero-exit scrub at `progress` in [0, 1], interpolating the
    /// position toward `(target_y, target_z)`.
    ///
    /// Returns `false` (leaving the position untouched) while the entrance
    /// animation still owns the dish.
    pub fn scroll_exit(
        &mut self,
        progress: f32,
        target_y: f32,
        target_z: f32,
    ) -> bool {
        if self.phase == DishPhase::Entering {
            return false;
        }
        let p = progress.clamp(0.0, 1.0);
        self.position.y = target_y * p;
        self.position.z = target_z * p;
        self.phase = if p > 0.0 {
            DishPhase::ScrollDriven
        } else {
            DishPhase::Idle
        };
        true
    }

    /// Model matrix for one of the group's quads. The idle-float offset is
    /// summed into the position here, at render time.
    pub fn quad_model(&self, quad: &QuadSpec) -> Mat4 {
        let rot = self.rotation();
        let size = quad.size * DISH_SCALE;
        let position = self.position + Vec3::new(0.0, self.float_offset, 0.0);
        Mat4::from_translation(position)
            * Mat4::from_euler(glam::EulerRot::XYZ, rot.x, rot.y, 0.0)
            * Mat4::from_translation(quad.offset)
            * Mat4::from_scale(Vec3::new(size, size, 1.0))
    }
}

/// One steam particle: a fixed start position and a baked random seed.
///
/// Doubles as the GPU instance layout; must match the WGSL `Particle`
/// struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SteamParticle {
    /// Start position within the emission box.
    pub position: [f32; 3],
    /// Random seed in [0, 1); drives speed, phase, and sprite size.
    pub seed: f32,
}

/// Fixed-size buffer of independently-seeded steam particles.
///
/// Positions are immutable; the rendered position is a pure function of the
/// seed and elapsed time, evaluated in the vertex shader.
pub struct SteamField {
    /// The seeded particles.
    pub particles: Vec<SteamParticle>,
    /// World offset of the whole field.
    pub origin: Vec3,
}

impl SteamField {
    /// Seed `count` particles within the emission box:
    /// x in [-1.5, 1.5], y in [-1, 1], z fixed at 2 (in front of the dish).
    pub fn seeded<R: Rng>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| SteamParticle {
                position: [
                    rng.random_range(-1.5..1.5),
                    rng.random_range(-1.0..1.0),
                    2.0,
                ],
                seed: rng.random_range(0.0..1.0),
            })
            .collect();

        Self {
            particles,
            origin: Vec3::new(0.0, 0.5, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn steam_offset_never_grows_unbounded() {
        for seed_step in 0..10 {
            let seed = seed_step as f32 / 10.0;
            for time_step in 0..2000 {
                let t = time_step as f32 * 0.37;
                let offset = steam_vertical_offset(seed, t);
                assert!(
                    (0.0..4.0).contains(&offset),
                    "offset {offset} out of [0,4) at seed {seed}, t {t}"
                );
            }
        }
    }

    #[test]
    fn pointer_smoothing_converges_without_overshoot() {
        let mut dish = DishGroup::new();
        let target = 0.3; // pointer pinned at x = 1.0
        let mut previous = 0.0;
        for _ in 0..600 {
            dish.smooth_toward_pointer(1.0, 0.0);
            let current = dish.pointer_rotation.y;
            assert!(current >= previous, "not monotone");
            assert!(current <= target + 1e-6, "overshot the target");
            previous = current;
        }
        assert!((previous - target).abs() < 1e-3);
    }

    #[test]
    fn particles_are_seeded_inside_the_emission_box() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let field = SteamField::seeded(40, &mut rng);
        assert_eq!(field.particles.len(), 40);
        for p in &field.particles {
            assert!((-1.5..1.5).contains(&p.position[0]));
            assert!((-1.0..1.0).contains(&p.position[1]));
            assert_eq!(p.position[2], 2.0);
            assert!((0.0..1.0).contains(&p.seed));
        }
    }

    #[test]
    fn scroll_writes_are_rejected_while_entering() {
        let mut dish = DishGroup::new();
        assert!(!dish.scroll_exit(0.5, -5.0, -5.0));
        assert_eq!(dish.position, Vec3::ZERO);

        dish.finish_entrance();
        assert!(dish.scroll_exit(0.5, -5.0, -5.0));
        assert_eq!(dish.position.y, -2.5);
        assert_eq!(dish.position.z, -2.5);
        assert_eq!(dish.phase, DishPhase::ScrollDriven);

        // Scrubbing back to the top returns the dish to idle.
        assert!(dish.scroll_exit(0.0, -5.0, -5.0));
        assert_eq!(dish.phase, DishPhase::Idle);
    }

    #[test]
    fn float_applies_only_when_idle() {
        let mut dish = DishGroup::new();
        dish.float(1.0);
        assert_eq!(dish.float_offset, 0.0);

        dish.finish_entrance();
        dish.float(1.0);
        let expected = 1.0_f32.sin() * FLOAT_AMPLITUDE;
        assert!((dish.float_offset - expected).abs() < 1e-9);
    }

    #[test]
    fn idle_float_accumulates_across_scroll_writes() {
        let mut dish = DishGroup::new();
        dish.finish_entrance();

        // The scroll binding writes the position every frame, even at the
        // top of the page; the bob must still build up to a visible offset.
        let mut max_offset = 0.0_f32;
        for frame in 0..600 {
            let t = frame as f32 / 60.0;
            assert!(dish.scroll_exit(0.0, -5.0, -5.0));
            dish.float(t);
            max_offset = max_offset.max(dish.float_offset.abs());
        }
        assert!(
            max_offset > FLOAT_AMPLITUDE * 10.0,
            "bob never accumulated: max offset {max_offset}"
        );

        // And it survives into the rendered transform.
        let y = dish.quad_model(&PLATE_QUAD).w_axis.y;
        assert!((y - dish.float_offset).abs() < 1e-6);
    }

    #[test]
    fn shadow_quad_sits_behind_and_below_the_plate() {
        assert!(SHADOW_QUAD.offset.z < PLATE_QUAD.offset.z);
        assert!(SHADOW_QUAD.offset.y < PLATE_QUAD.offset.y);
        assert!(SHADOW_QUAD.size > PLATE_QUAD.size);
        assert_eq!(SHADOW_QUAD.opacity, 0.6);
    }
}
