//! Convex polygons with logarithmic containment tests.
//!
//! # Containment algorithm
//!
//! The polygon is treated as a fan of triangles around `points[0]`.  A
//! containment query binary-searches the fan for the wedge whose two rays
//! bracket the query point, then runs a single orientation test against the
//! boundary edge of that wedge.  O(log n) per query instead of the O(n)
//! edge-crossing walk — containment is tested per agent per iteration against
//! multiple areas, so this is on the hot path.
//!
//! Points exactly on the boundary count as **outside**: queries collapsing
//! onto the first or last fan ray are rejected up front, and the final edge
//! test is strict.

use crate::Point;

/// An ordered, counter-clockwise sequence of points with a precomputed
/// centroid.
///
/// Invariant (not validated at construction — caller's responsibility): the
/// points form a convex, non-self-intersecting loop in counter-clockwise
/// order.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvexPolygon {
    points: Vec<Point>,
    centroid: Point,
}

impl ConvexPolygon {
    /// Build from counter-clockwise boundary points, computing the centroid
    /// as the vertex average.
    pub fn new(points: Vec<Point>) -> Self {
        let centroid = if points.is_empty() {
            Point::ZERO
        } else {
            points.iter().fold(Point::ZERO, |acc, &p| acc + p) / points.len() as f64
        };
        Self { points, centroid }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Strict containment test; boundary points are outside.
    pub fn is_inside(&self, p: Point) -> bool {
        let pts = &self.points;
        let n = pts.len();
        if n < 3 {
            return false;
        }

        // On or right of the first fan ray, on or left of the last: outside.
        if orient(pts[0], pts[1], p) <= 0.0 {
            return false;
        }
        if orient(pts[0], pts[n - 1], p) >= 0.0 {
            return false;
        }

        // Bisect for the wedge (pts[0], pts[lo], pts[lo + 1]) containing p.
        let mut lo = 1;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if orient(pts[0], pts[mid], p) >= 0.0 {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        orient(pts[lo], pts[lo + 1], p) > 0.0
    }

    /// Center and radius of a circle containing the whole polygon.
    ///
    /// Broad-phase culling helper: a point farther than `radius` from
    /// `center` cannot be inside.  The circle is centered on the centroid
    /// and is not minimal.
    pub fn containing_circle(&self) -> (Point, f64) {
        let radius = self
            .points
            .iter()
            .map(|&p| (p - self.centroid).norm())
            .fold(0.0, f64::max);
        (self.centroid, radius)
    }
}

/// Signed area of the triangle (a, b, q); positive when q is left of a→b.
#[inline]
fn orient(a: Point, b: Point, q: Point) -> f64 {
    (b - a).cross(q - a)
}
