//! Keyboard-driven rectangle offset with a reject-not-clamp boundary policy.

/// Arrow-key direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Offset of an axis-aligned square centered at `(x, y)` in NDC.
///
/// A step is applied only if the moved edge stays inside `[-1, 1]`.
/// Steps that would cross are dropped entirely; the rectangle never snaps
/// to the boundary.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RectController {
    x: f64,
    y: f64,
    half: f64,
    step: f64,
}

impl Default for RectController {
    fn default() -> Self {
        Self::new(0.1, 0.01)
    }
}

impl RectController {
    pub fn new(half: f64, step: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            half,
            step,
        }
    }

    /// Starts at an explicit offset. Useful for boundary tests.
    pub fn at(x: f64, y: f64, half: f64, step: f64) -> Self {
        Self { x, y, half, step }
    }

    #[inline]
    pub fn offset(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Corners `(left, bottom, right, top)` in NDC.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x - self.half, self.y - self.half, self.x + self.half, self.y + self.half)
    }

    /// Returns `true` if the rectangle moved.
    pub fn step(&mut self, dir: Direction) -> bool {
        let (h, s) = (self.half, self.step);

        let allowed = match dir {
            Direction::Up => self.y + h + s <= 1.0,
            Direction::Down => self.y - h - s >= -1.0,
            Direction::Left => self.x - h - s >= -1.0,
            Direction::Right => self.x + h + s <= 1.0,
        };

        if !allowed {
            log::trace!("rect step {dir:?} rejected at ({:.3}, {:.3})", self.x, self.y);
            return false;
        }

        match dir {
            Direction::Up => self.y += s,
            Direction::Down => self.y -= s,
            Direction::Left => self.x -= s,
            Direction::Right => self.x += s,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn starts_centered() {
        assert_eq!(RectController::default().offset(), (0.0, 0.0));
    }

    #[test]
    fn each_direction_moves_one_step() {
        let mut r = RectController::default();
        assert!(r.step(Direction::Right));
        assert!(r.step(Direction::Up));
        assert_abs_diff_eq!(r.offset().0, 0.01, epsilon = 1e-12);
        assert_abs_diff_eq!(r.offset().1, 0.01, epsilon = 1e-12);

        assert!(r.step(Direction::Left));
        assert!(r.step(Direction::Down));
        assert_abs_diff_eq!(r.offset().0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(r.offset().1, 0.0, epsilon = 1e-12);
    }

    // ── boundary policy ───────────────────────────────────────────────────

    #[test]
    fn rejects_instead_of_clamping_near_the_edge() {
        // right edge at 0.995; one more step would land at 1.005
        let mut r = RectController::at(0.895, 0.0, 0.1, 0.01);
        assert!(!r.step(Direction::Right));
        assert_eq!(r.offset(), (0.895, 0.0));
    }

    #[test]
    fn rejects_at_every_edge() {
        for (x, y, dir) in [
            (0.0, 0.895, Direction::Up),
            (0.0, -0.895, Direction::Down),
            (-0.895, 0.0, Direction::Left),
            (0.895, 0.0, Direction::Right),
        ] {
            let mut r = RectController::at(x, y, 0.1, 0.01);
            assert!(!r.step(dir), "{dir:?} should be rejected");
            assert_eq!(r.offset(), (x, y));
        }
    }

    #[test]
    fn repeated_steps_stop_inside_bounds() {
        let mut r = RectController::default();
        let mut moves = 0;
        while r.step(Direction::Right) {
            moves += 1;
            assert!(moves < 1000);
        }

        let (_, _, right, _) = r.bounds();
        assert!(right <= 1.0 + 1e-9);
        assert!(right > 1.0 - 0.01 - 1e-9);
    }
}
