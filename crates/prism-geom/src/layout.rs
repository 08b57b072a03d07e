//! Square drawable region and its four quadrants, in physical pixels.
//!
//! Pixel rectangles use a top-left origin; the renderer feeds them straight
//! into `set_viewport` / `set_scissor_rect`.

/// Integer pixel rectangle, top-left origin.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Clips to a `width × height` target. Returns an empty rect if disjoint.
    pub fn clamp_to(&self, width: u32, height: u32) -> Self {
        let x0 = self.x.min(width);
        let y0 = self.y.min(height);
        let x1 = self.x.saturating_add(self.width).min(width);
        let y1 = self.y.saturating_add(self.height).min(height);
        Self::new(x0, y0, x1 - x0, y1 - y0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Quadrant {
    pub corner: Corner,
    pub rect: PixelRect,
}

/// Largest square anchored at the top-left corner.
pub fn square_region(width: u32, height: u32) -> PixelRect {
    let side = width.min(height);
    PixelRect::new(0, 0, side, side)
}

/// Splits the square region into four quadrants that tile it exactly.
///
/// For odd sides the right/bottom halves get the extra pixel.
pub fn quadrants(width: u32, height: u32) -> [Quadrant; 4] {
    let side = square_region(width, height).width;
    let near = side / 2;
    let far = side - near;

    [
        Quadrant { corner: Corner::TopLeft, rect: PixelRect::new(0, 0, near, near) },
        Quadrant { corner: Corner::TopRight, rect: PixelRect::new(near, 0, far, near) },
        Quadrant { corner: Corner::BottomLeft, rect: PixelRect::new(0, near, near, far) },
        Quadrant { corner: Corner::BottomRight, rect: PixelRect::new(near, near, far, far) },
    ]
}
