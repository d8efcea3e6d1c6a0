//! Pointer and viewport state fed by window events.
//!
//! Both slots are written by event handlers and read once per frame by the
//! render stage; everything runs on the single frame clock, so plain fields
//! suffice (a multi-threaded port would need a lock per slot).

/// Normalized pointer position.
///
/// Both axes are in [-1, 1] with y inverted so positive is up: the viewport
/// center maps to (0, 0) and the top-left corner to (-1, 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    /// Horizontal position, -1 at the left edge, +1 at the right.
    pub x: f32,
    /// Vertical position, +1 at the top edge, -1 at the bottom.
    pub y: f32,
}

impl PointerState {
    /// Update from a window-space cursor position in pixels.
    pub fn set_from_window(&mut self, px: f32, py: f32, viewport: Viewport) {
        let w = viewport.width.max(1) as f32;
        let h = viewport.height.max(1) as f32;
        self.x = ((px / w) * 2.0 - 1.0).clamp(-1.0, 1.0);
        self.y = (-((py / h) * 2.0 - 1.0)).clamp(-1.0, 1.0);
    }
}

/// Current window size in physical pixels.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height ratio.
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Height as f32, for scroll-range math.
    pub fn height_f(&self) -> f32 {
        self.height as f32
    }

    /// Width as f32.
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_maps_to_origin() {
        let mut pointer = PointerState::default();
        pointer.set_from_window(640.0, 360.0, Viewport::new(1280, 720));
        assert!(pointer.x.abs() < 1e-6);
        assert!(pointer.y.abs() < 1e-6);
    }

    #[test]
    fn top_left_maps_to_minus_one_plus_one() {
        let mut pointer = PointerState::default();
        pointer.set_from_window(0.0, 0.0, Viewport::new(1280, 720));
        assert_eq!(pointer.x, -1.0);
        assert_eq!(pointer.y, 1.0);
    }

    #[test]
    fn coordinates_stay_in_range_for_any_viewport_position() {
        let viewport = Viewport::new(1000, 500);
        let mut pointer = PointerState::default();
        for px in [0.0, 1.0, 250.0, 999.0, 1000.0] {
            for py in [0.0, 1.0, 250.0, 499.0, 500.0] {
                pointer.set_from_window(px, py, viewport);
                assert!((-1.0..=1.0).contains(&pointer.x));
                assert!((-1.0..=1.0).contains(&pointer.y));
            }
        }
    }
}
