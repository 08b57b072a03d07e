//! Incremental drag rotation and wheel zoom.
//!
//! This is not a sphere-projected arcball. Each pointer-move delta `(dx, dy)`
//! becomes `R_y(dx·k) · R_x(dy·k)` and is left-multiplied onto the stored
//! orientation, so the composition order of successive drags matters.

use glam::Mat4;

/// Accumulated model orientation. Never reset.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RotationAccumulator {
    orientation: Mat4,
    /// Degrees of rotation per pixel of pointer motion.
    sensitivity_deg: f32,
}

impl Default for RotationAccumulator {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl RotationAccumulator {
    pub fn new(sensitivity_deg: f32) -> Self {
        Self {
            orientation: Mat4::IDENTITY,
            sensitivity_deg,
        }
    }

    #[inline]
    pub fn orientation(&self) -> Mat4 {
        self.orientation
    }

    /// Rotation produced by a single pointer delta.
    pub fn delta_rotation(&self, dx: f32, dy: f32) -> Mat4 {
        let k = self.sensitivity_deg;
        Mat4::from_rotation_y((dx * k).to_radians()) * Mat4::from_rotation_x((dy * k).to_radians())
    }

    /// `orientation ← delta · orientation`
    pub fn apply_delta(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.orientation = self.delta_rotation(dx, dy) * self.orientation;
    }
}

/// Remembers the last pointer position while a button is held.
///
/// Moves are no-ops unless the latch is set.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DragLatch {
    last: Option<(f32, f32)>,
}

impl DragLatch {
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn press(&mut self, x: f32, y: f32) {
        self.last = Some((x, y));
    }

    /// Returns the pixel delta since the previous position, if dragging.
    pub fn moved(&mut self, x: f32, y: f32) -> Option<(f32, f32)> {
        let (lx, ly) = self.last?;
        self.last = Some((x, y));
        Some((x - lx, y - ly))
    }

    pub fn release(&mut self) {
        self.last = None;
    }
}

/// Camera distance driven by the wheel, clamped to `[min, max]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Zoom {
    distance: f32,
    min: f32,
    max: f32,
    /// Distance units per pixel of wheel delta.
    sensitivity: f32,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(5.0, 1.5, 20.0, 0.01)
    }
}

impl Zoom {
    pub fn new(initial: f32, min: f32, max: f32, sensitivity: f32) -> Self {
        Self {
            distance: initial.clamp(min, max),
            min,
            max,
            sensitivity,
        }
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Positive `delta_y` (scroll toward the user) moves the camera away.
    pub fn apply_wheel(&mut self, delta_y: f32) {
        if !delta_y.is_finite() {
            return;
        }
        self.distance = (self.distance + delta_y * self.sensitivity).clamp(self.min, self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn assert_mat_eq(a: Mat4, b: Mat4) {
        for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-5);
        }
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn starts_at_identity() {
        assert_eq!(RotationAccumulator::default().orientation(), Mat4::IDENTITY);
    }

    #[test]
    fn horizontal_drag_rotates_about_y() {
        let mut acc = RotationAccumulator::default();
        acc.apply_delta(180.0, 0.0); // 90°

        let x = acc.orientation().transform_vector3(Vec3::X);
        assert_relative_eq!(x.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(x.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn successive_deltas_left_multiply() {
        let mut acc = RotationAccumulator::default();
        let r1 = acc.delta_rotation(10.0, 4.0);
        let r2 = acc.delta_rotation(-3.0, 7.0);

        acc.apply_delta(10.0, 4.0);
        acc.apply_delta(-3.0, 7.0);

        assert_mat_eq(acc.orientation(), r2 * r1);
    }

    #[test]
    fn perpendicular_drags_do_not_commute() {
        let mut a = RotationAccumulator::default();
        a.apply_delta(60.0, 0.0);
        a.apply_delta(0.0, 60.0);

        let mut b = RotationAccumulator::default();
        b.apply_delta(0.0, 60.0);
        b.apply_delta(60.0, 0.0);

        let pa = a.orientation().transform_vector3(Vec3::Z);
        let pb = b.orientation().transform_vector3(Vec3::Z);
        assert!(pa.distance(pb) > 1e-3);
    }

    #[test]
    fn zero_delta_leaves_orientation_untouched() {
        let mut acc = RotationAccumulator::default();
        acc.apply_delta(5.0, 5.0);
        let before = acc.orientation();
        acc.apply_delta(0.0, 0.0);
        assert_eq!(acc.orientation(), before);
    }

    // ── drag latch ────────────────────────────────────────────────────────

    #[test]
    fn move_without_press_yields_nothing() {
        let mut latch = DragLatch::default();
        assert_eq!(latch.moved(10.0, 10.0), None);
    }

    #[test]
    fn deltas_are_relative_to_previous_move() {
        let mut latch = DragLatch::default();
        latch.press(100.0, 100.0);
        assert_eq!(latch.moved(110.0, 95.0), Some((10.0, -5.0)));
        assert_eq!(latch.moved(112.0, 95.0), Some((2.0, 0.0)));

        latch.release();
        assert!(!latch.is_dragging());
        assert_eq!(latch.moved(0.0, 0.0), None);
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn wheel_moves_distance_linearly() {
        let mut zoom = Zoom::default();
        zoom.apply_wheel(100.0);
        assert_relative_eq!(zoom.distance(), 6.0, epsilon = 1e-6);
        zoom.apply_wheel(-200.0);
        assert_relative_eq!(zoom.distance(), 4.0, epsilon = 1e-6);
    }

    #[test]
    fn zoom_saturates_at_bounds() {
        let mut zoom = Zoom::default();
        zoom.apply_wheel(1.0e6);
        assert_eq!(zoom.distance(), 20.0);
        zoom.apply_wheel(-1.0e6);
        assert_eq!(zoom.distance(), 1.5);
    }

    #[test]
    fn non_finite_wheel_is_ignored() {
        let mut zoom = Zoom::default();
        zoom.apply_wheel(f32::NAN);
        assert_eq!(zoom.distance(), 5.0);
    }
}
