use glam::Vec2;

use super::PixelRect;

/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Whole viewport as a pixel rect.
    pub fn full_rect(self) -> PixelRect {
        PixelRect::new(0, 0, self.width.max(0.0) as u32, self.height.max(0.0) as u32)
    }

    /// NDC extent of one physical pixel on each axis.
    pub fn ndc_per_pixel(self) -> Vec2 {
        if !self.is_valid() {
            return Vec2::ZERO;
        }
        Vec2::new(2.0 / self.width, 2.0 / self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::new(0.0, 10.0).is_valid());
        assert!(!Viewport::new(f32::INFINITY, 10.0).is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }

    #[test]
    fn full_rect_covers_viewport() {
        assert_eq!(Viewport::new(700.0, 500.0).full_rect(), PixelRect::new(0, 0, 700, 500));
    }

    #[test]
    fn ndc_per_pixel_spans_two_units() {
        let vp = Viewport::new(400.0, 200.0);
        assert_eq!(vp.ndc_per_pixel(), Vec2::new(0.005, 0.01));
        assert_eq!(Viewport::new(0.0, 200.0).ndc_per_pixel(), Vec2::ZERO);
    }
}
