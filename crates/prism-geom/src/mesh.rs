//! CPU-side geometry builders.
//!
//! Vertex types here are plain `glam` values; the engine converts them into
//! its own `#[repr(C)]` GPU layouts.

use glam::{DVec2, Vec2, Vec3};

use crate::intersect::Circle;

/// Segment count used for circle outlines.
pub const CIRCLE_SEGMENTS: usize = 100;

/// Closed outline as a line strip: `segments + 1` points, first == last.
pub fn circle_outline(circle: &Circle, segments: usize) -> Vec<DVec2> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let theta = (i % segments) as f64 / segments as f64 * std::f64::consts::TAU;
            circle.center + DVec2::new(theta.cos(), theta.sin()) * circle.radius
        })
        .collect()
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TexVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedMesh {
    pub vertices: Vec<TexVertex>,
    pub indices: Vec<u16>,
}

/// Square pyramid with its base on `y = 0` and apex at `(0, height, 0)`.
///
/// Base UVs cover the full texture. The four sides each take a vertical
/// quarter strip of the texture with the apex at the strip's center top.
pub fn square_pyramid(half: f32, height: f32) -> IndexedMesh {
    let h = half;
    let b0 = Vec3::new(-h, 0.0, -h);
    let b1 = Vec3::new(h, 0.0, -h);
    let b2 = Vec3::new(h, 0.0, h);
    let b3 = Vec3::new(-h, 0.0, h);
    let apex = Vec3::new(0.0, height, 0.0);

    let v = |position: Vec3, u: f32, v: f32| TexVertex { position, uv: Vec2::new(u, v) };

    let mut vertices = vec![v(b0, 0.0, 1.0), v(b1, 1.0, 1.0), v(b2, 1.0, 0.0), v(b3, 0.0, 0.0)];

    // front, right, back, left
    let sides = [(b3, b2), (b2, b1), (b1, b0), (b0, b3)];
    for (i, (a, b)) in sides.into_iter().enumerate() {
        let u0 = i as f32 * 0.25;
        let u1 = u0 + 0.25;
        vertices.push(v(a, u0, 0.0));
        vertices.push(v(b, u1, 0.0));
        vertices.push(v(apex, u0 + 0.125, 1.0));
    }

    let mut indices: Vec<u16> = vec![0, 1, 2, 0, 2, 3];
    indices.extend(4..16);

    IndexedMesh { vertices, indices }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AxisLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: [f32; 4],
}

/// X (red), Y (green) and Z (blue) lines from `-length` to `+length`.
pub fn axes(length: f32) -> [AxisLine; 3] {
    let line = |dir: Vec3, color: [f32; 4]| AxisLine { from: -dir * length, to: dir * length, color };
    [
        line(Vec3::X, [1.0, 0.0, 0.0, 1.0]),
        line(Vec3::Y, [0.0, 1.0, 0.0, 1.0]),
        line(Vec3::Z, [0.0, 0.0, 1.0, 1.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ── circle ────────────────────────────────────────────────────────────

    #[test]
    fn circle_outline_is_closed_and_on_radius() {
        let c = Circle::new(DVec2::new(0.2, -0.1), 0.3);
        let pts = circle_outline(&c, CIRCLE_SEGMENTS);

        assert_eq!(pts.len(), CIRCLE_SEGMENTS + 1);
        assert_eq!(pts.first(), pts.last());
        for p in &pts {
            assert_abs_diff_eq!(p.distance(c.center), 0.3, epsilon = 1e-12);
        }
    }

    // ── pyramid ───────────────────────────────────────────────────────────

    #[test]
    fn pyramid_has_expected_counts() {
        let mesh = square_pyramid(0.5, 1.0);
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.indices.len(), 18);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn pyramid_apexes_sit_in_quarter_centers() {
        let mesh = square_pyramid(0.5, 1.0);
        let apex_us: Vec<f32> = mesh
            .vertices
            .iter()
            .filter(|v| v.position == Vec3::new(0.0, 1.0, 0.0))
            .map(|v| v.uv.x)
            .collect();

        assert_eq!(apex_us, vec![0.125, 0.375, 0.625, 0.875]);
    }

    #[test]
    fn pyramid_base_lies_on_ground_plane() {
        let mesh = square_pyramid(0.5, 1.0);
        for v in &mesh.vertices[..4] {
            assert_eq!(v.position.y, 0.0);
            assert_eq!(v.position.x.abs(), 0.5);
        }
    }

    // ── axes ──────────────────────────────────────────────────────────────

    #[test]
    fn axes_are_symmetric_and_colored() {
        let [x, y, z] = axes(1.8);
        assert_eq!(x.from, Vec3::new(-1.8, 0.0, 0.0));
        assert_eq!(x.to, Vec3::new(1.8, 0.0, 0.0));
        assert_eq!(y.color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(z.to, Vec3::new(0.0, 0.0, 1.8));
    }
}
