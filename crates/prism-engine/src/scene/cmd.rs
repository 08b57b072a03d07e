use glam::Vec2;

use crate::paint::Color;

/// Renderer-agnostic 2D draw command, coordinates in NDC.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Connected polyline through `points`.
    LineStrip { points: Vec<Vec2>, color: Color },

    /// Independent segments.
    Lines { segments: Vec<[Vec2; 2]>, color: Color },

    /// Square point sprites `size_px` physical pixels wide.
    Points { points: Vec<Vec2>, size_px: f32, color: Color },

    /// Convex polygon, filled as a fan around the first vertex.
    Fill { polygon: Vec<Vec2>, color: Color },
}

impl DrawCmd {
    /// Number of input points carried by the command.
    pub fn point_count(&self) -> usize {
        match self {
            DrawCmd::LineStrip { points, .. } | DrawCmd::Points { points, .. } => points.len(),
            DrawCmd::Lines { segments, .. } => segments.len() * 2,
            DrawCmd::Fill { polygon, .. } => polygon.len(),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DrawCmd::LineStrip { color, .. }
            | DrawCmd::Lines { color, .. }
            | DrawCmd::Points { color, .. }
            | DrawCmd::Fill { color, .. } => *color,
        }
    }
}
