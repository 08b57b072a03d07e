use glam::{DVec2, Vec2};

use crate::paint::Color;

use super::DrawCmd;

/// Recorded draw stream for a frame.
///
/// Commands are painted in insertion order. Push helpers drop commands that
/// could not produce a visible primitive (too few points, non-finite values),
/// so renderers never see NaN geometry.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push_line_strip<I>(&mut self, points: I, color: Color)
    where
        I: IntoIterator<Item = DVec2>,
    {
        let Some(points) = collect_finite(points, 2) else { return };
        self.items.push(DrawCmd::LineStrip { points, color });
    }

    pub fn push_segment(&mut self, a: DVec2, b: DVec2, color: Color) {
        let Some(pts) = collect_finite([a, b], 2) else { return };
        self.items.push(DrawCmd::Lines { segments: vec![[pts[0], pts[1]]], color });
    }

    pub fn push_points<I>(&mut self, points: I, size_px: f32, color: Color)
    where
        I: IntoIterator<Item = DVec2>,
    {
        if !(size_px.is_finite() && size_px > 0.0) {
            return;
        }
        let Some(points) = collect_finite(points, 1) else { return };
        self.items.push(DrawCmd::Points { points, size_px, color });
    }

    /// Axis-aligned rectangle from `min` (bottom-left) to `max` (top-right).
    pub fn push_rect(&mut self, min: DVec2, max: DVec2, color: Color) {
        self.push_polygon(
            [min, DVec2::new(max.x, min.y), max, DVec2::new(min.x, max.y)],
            color,
        );
    }

    pub fn push_polygon<I>(&mut self, polygon: I, color: Color)
    where
        I: IntoIterator<Item = DVec2>,
    {
        let Some(polygon) = collect_finite(polygon, 3) else { return };
        self.items.push(DrawCmd::Fill { polygon, color });
    }
}

fn collect_finite<I>(points: I, min_len: usize) -> Option<Vec<Vec2>>
where
    I: IntoIterator<Item = DVec2>,
{
    let points: Vec<Vec2> = points.into_iter().map(|p| p.as_vec2()).collect();
    if points.len() < min_len || !points.iter().all(|p| p.is_finite()) {
        return None;
    }
    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> DVec2 {
        DVec2::new(x, y)
    }

    #[test]
    fn preserves_insertion_order() {
        let mut dl = DrawList::new();
        dl.push_segment(p(0.0, 0.0), p(1.0, 1.0), Color::RED);
        dl.push_points([p(0.5, 0.5)], 8.0, Color::YELLOW);
        dl.push_rect(p(-0.1, -0.1), p(0.1, 0.1), Color::GREEN);

        let kinds: Vec<_> = dl
            .items()
            .iter()
            .map(|c| match c {
                DrawCmd::Lines { .. } => "lines",
                DrawCmd::Points { .. } => "points",
                DrawCmd::Fill { .. } => "fill",
                DrawCmd::LineStrip { .. } => "strip",
            })
            .collect();
        assert_eq!(kinds, vec!["lines", "points", "fill"]);
    }

    #[test]
    fn rejects_non_finite_geometry() {
        let mut dl = DrawList::new();
        dl.push_line_strip([p(0.0, 0.0), p(f64::NAN, 1.0)], Color::WHITE);
        dl.push_segment(p(f64::INFINITY, 0.0), p(0.0, 0.0), Color::WHITE);
        assert!(dl.is_empty());
    }

    #[test]
    fn rejects_too_few_points() {
        let mut dl = DrawList::new();
        dl.push_line_strip([p(0.0, 0.0)], Color::WHITE);
        dl.push_polygon([p(0.0, 0.0), p(1.0, 0.0)], Color::WHITE);
        dl.push_points(std::iter::empty(), 4.0, Color::WHITE);
        assert!(dl.is_empty());
    }

    #[test]
    fn rejects_zero_point_size() {
        let mut dl = DrawList::new();
        dl.push_points([p(0.0, 0.0)], 0.0, Color::WHITE);
        assert!(dl.is_empty());
    }

    #[test]
    fn rect_has_four_corners_counter_clockwise() {
        let mut dl = DrawList::new();
        dl.push_rect(p(-0.5, -0.25), p(0.5, 0.25), Color::RED);

        let DrawCmd::Fill { polygon, .. } = &dl.items()[0] else {
            panic!("expected a fill");
        };
        assert_eq!(polygon.len(), 4);
        assert_eq!(polygon[0], Vec2::new(-0.5, -0.25));
        assert_eq!(polygon[2], Vec2::new(0.5, 0.25));
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut dl = DrawList::new();
        dl.push_segment(p(0.0, 0.0), p(1.0, 0.0), Color::RED);
        dl.clear();
        assert_eq!(dl.len(), 0);
    }
}
