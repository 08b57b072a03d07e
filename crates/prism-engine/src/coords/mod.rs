//! Coordinate types shared across the engine renderers.
//!
//! Two spaces are in play:
//! - Physical pixels, origin top-left, +Y down. Used for viewports and scissor rects.
//! - Normalized device coordinates, `[-1, 1]` with +Y up. Used for all 2D geometry.

mod viewport;

pub use prism_geom::layout::PixelRect;
pub use viewport::Viewport;
