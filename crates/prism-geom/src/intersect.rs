//! Circle / finite segment intersection.
//!
//! The segment is parametrized as `P(t) = P0 + t·D` with `D = P1 - P0` and
//! `t ∈ [0, 1]`. Substituting into `|P(t) - C|² = r²` gives the quadratic
//! `a·t² + b·t + c = 0` with:
//!
//! - `a = |D|²`
//! - `b = 2·D·(P0 - C)`
//! - `c = |P0 - C|² - r²`
//!
//! Roots outside `[0, 1]` lie on the infinite line but not on the segment and
//! are dropped. A zero discriminant is a tangent and yields a single hit.

use glam::DVec2;

/// Circle in NDC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub const fn new(center: DVec2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// A circle is usable once it has a finite, strictly positive radius.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite() && self.radius > 0.0
    }
}

/// Finite line segment in NDC.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    #[inline]
    pub const fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.end - self.start
    }

    /// Point at parameter `t` along the segment.
    #[inline]
    pub fn at(&self, t: f64) -> DVec2 {
        self.start + self.direction() * t
    }

    /// Zero-length segments have no direction and cannot be intersected.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction().length_squared() == 0.0
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && !self.is_degenerate()
    }
}

/// One intersection point with its segment parameter.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hit {
    pub point: DVec2,
    pub t: f64,
}

/// Zero, one or two hits, ordered by increasing `t`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionSet {
    hits: Vec<Hit>,
}

impl IntersectionSet {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    #[inline]
    pub fn hits(&self) -> &[Hit] {
        &self.hits
    }

    pub fn points(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.hits.iter().map(|h| h.point)
    }

    /// Human-readable status line, two decimals per coordinate.
    ///
    /// `Intersection: none` or `Intersection: count=N (x, y) (x, y)`.
    pub fn describe(&self) -> String {
        if self.hits.is_empty() {
            return "Intersection: none".to_string();
        }

        let points = self
            .hits
            .iter()
            .map(|h| format!("({:.2}, {:.2})", h.point.x, h.point.y))
            .collect::<Vec<_>>()
            .join(" ");

        format!("Intersection: count={} {points}", self.hits.len())
    }
}

/// Intersects a circle with a finite segment.
///
/// Degenerate segments (`P0 == P1`) and non-finite inputs yield an empty set.
pub fn intersect(circle: &Circle, segment: &Segment) -> IntersectionSet {
    let d = segment.direction();
    let f = segment.start - circle.center;

    let a = d.length_squared();
    if a == 0.0 || !a.is_finite() {
        return IntersectionSet::empty();
    }

    let b = 2.0 * d.dot(f);
    let c = f.length_squared() - circle.radius * circle.radius;

    let disc = b * b - 4.0 * a * c;
    if disc.is_nan() || disc < 0.0 {
        return IntersectionSet::empty();
    }

    let sqrt_disc = disc.sqrt();
    let t1 = (-b - sqrt_disc) / (2.0 * a);
    let t2 = (-b + sqrt_disc) / (2.0 * a);

    let mut hits = Vec::with_capacity(2);

    if (0.0..=1.0).contains(&t1) {
        hits.push(Hit { point: segment.at(t1), t: t1 });
    }

    // Strict: a tangent produces t1 == t2 and must be reported once.
    if disc > 0.0 && (0.0..=1.0).contains(&t2) {
        hits.push(Hit { point: segment.at(t2), t: t2 });
    }

    IntersectionSet { hits }
}
