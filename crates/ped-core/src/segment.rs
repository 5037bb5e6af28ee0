//! Line segments — the primitive for walls and obstacle edges.

use std::fmt;

use crate::Point;

/// A wall or obstacle edge between two endpoints.
///
/// Immutable value type, owned by whichever container holds it (usually the
/// collision geometry).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSegment {
    pub p1: Point,
    pub p2: Point,
}

impl LineSegment {
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }

    #[inline]
    pub fn length_square(&self) -> f64 {
        (self.p2 - self.p1).norm_square()
    }

    #[inline]
    pub fn center(&self) -> Point {
        (self.p1 + self.p2) * 0.5
    }

    /// The point on this segment closest to `p`.
    ///
    /// Projects `p` onto the carrying line and clamps the parameter to the
    /// segment.  A degenerate (zero-length) segment returns `p1`.
    pub fn shortest_point(&self, p: Point) -> Point {
        let dir = self.p2 - self.p1;
        let len_square = dir.norm_square();
        if len_square <= f64::EPSILON {
            return self.p1;
        }
        let t = ((p - self.p1).dot(dir) / len_square).clamp(0.0, 1.0);
        self.p1 + dir * t
    }

    /// Distance from `p` to the nearest point on this segment.
    #[inline]
    pub fn dist_to(&self, p: Point) -> f64 {
        (p - self.shortest_point(p)).norm()
    }

    /// Signed component of `v` perpendicular to this segment's direction;
    /// positive when `v` points to the left of p1→p2.
    #[inline]
    pub fn normal_component(&self, v: Point) -> f64 {
        (self.p2 - self.p1).normalized().cross(v)
    }

    /// Segment-segment intersection test, touching endpoints included.
    ///
    /// Used by the models' line-of-sight filter: a neighbor whose connecting
    /// segment crosses any wall is invisible and exerts no influence.
    pub fn intersects(&self, other: LineSegment) -> bool {
        let d1 = orient(other.p1, other.p2, self.p1);
        let d2 = orient(other.p1, other.p2, self.p2);
        let d3 = orient(self.p1, self.p2, other.p1);
        let d4 = orient(self.p1, self.p2, other.p2);

        if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
            && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
        {
            return true;
        }

        // Collinear touching cases.
        (d1 == 0.0 && on_segment(other.p1, other.p2, self.p1))
            || (d2 == 0.0 && on_segment(other.p1, other.p2, self.p2))
            || (d3 == 0.0 && on_segment(self.p1, self.p2, other.p1))
            || (d4 == 0.0 && on_segment(self.p1, self.p2, other.p2))
    }
}

/// Signed area of the triangle (a, b, q); positive when q is left of a→b.
#[inline]
fn orient(a: Point, b: Point, q: Point) -> f64 {
    (b - a).cross(q - a)
}

/// Whether `q`, known to be collinear with a→b, lies within its bounding box.
#[inline]
fn on_segment(a: Point, b: Point, q: Point) -> bool {
    q.x >= a.x.min(b.x) && q.x <= a.x.max(b.x) && q.y >= a.y.min(b.y) && q.y <= a.y.max(b.y)
}

impl fmt::Display for LineSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -- {}]", self.p1, self.p2)
    }
}
