//! Easing functions for animation interpolation.
//!
//! Covers the curves the page animations need: decelerating power eases for
//! reveals, a cubic Hermite for the dish drop-in, an elastic overshoot for
//! the card tilt release, and the exponential glide used by smooth scroll.

use std::f32::consts::TAU;

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-out.
    CubicOut,
    /// Quartic ease-out (sharper deceleration than cubic).
    QuartOut,
    /// Cubic Hermite interpolation with configurable control points.
    /// Formula: c1·3t(1-t)² + c2·3(1-t)t² + t³
    CubicHermite {
        /// First control point.
        c1: f32,
        /// Second control point.
        c2: f32,
    },
    /// Elastic ease-out: overshoots the target and oscillates into place.
    ElasticOut {
        /// Overshoot amplitude (>= 1).
        amplitude: f32,
        /// Oscillation period as a fraction of the duration.
        period: f32,
    },
    /// Exponential ease-out clamped to 1: `min(1, 1.001 - 2^(-10t))`.
    /// The smooth-scroll glide curve.
    ExpoOut,
}

impl EasingFunction {
    /// Default easing: CubicHermite with a natural ease-out feel.
    pub const DEFAULT: EasingFunction =
        EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Entrance curve for the dish drop-in: slow start, acceleration,
    /// settled finish.
    pub const ENTRANCE: EasingFunction =
        EasingFunction::CubicHermite { c1: 0.2, c2: 1.0 };

    /// The card-tilt release curve: one bounce past zero, then settle.
    pub const TILT_RELEASE: EasingFunction = EasingFunction::ElasticOut {
        amplitude: 1.0,
        period: 0.5,
    };

    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. Elastic variants may return values
    /// above 1.0 mid-curve; all variants hit 0 at t=0 and 1 at t=1.
    #[inline]
    #[must_use]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            EasingFunction::QuartOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt * omt
            }
            EasingFunction::CubicHermite { c1, c2 } => {
                // f(t) = c1·3t(1-t)² + c2·3(1-t)t² + t³
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
            EasingFunction::ElasticOut { amplitude, period } => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                let a = amplitude.max(1.0);
                let p = *period;
                let s = p / TAU * (1.0 / a).asin();
                a * 2.0_f32.powf(-10.0 * t) * ((t - s) * TAU / p).sin() + 1.0
            }
            EasingFunction::ExpoOut => {
                (1.001 - 2.0_f32.powf(-10.0 * t)).min(1.0)
            }
        }
    }
}

impl Default for EasingFunction {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}
