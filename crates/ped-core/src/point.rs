//! 2-D point/vector type used for positions, velocities, and forces.
//!
//! `Point` uses `f64` throughout.  Crowd models are sensitive to force
//! cancellation at small separations, so we do not repeat the single-precision
//! trade-off made for city-scale coordinates elsewhere.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2-D coordinate or vector with double-precision components.
///
/// Immutable value type: all operations return new points.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scalar (dot) product.
    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2-D cross product (z-component of the 3-D cross product).  Positive
    /// when `other` lies counter-clockwise of `self`.
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn norm_square(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.norm_square().sqrt()
    }

    /// Norm and unit vector in one pass.
    ///
    /// Returns `(0.0, Point::ZERO)` for vectors shorter than machine epsilon
    /// instead of dividing by (nearly) zero.  Every operational model relies
    /// on this to stay finite when two agents occupy the same coordinates.
    #[inline]
    pub fn norm_and_normalized(self) -> (f64, Point) {
        let norm = self.norm();
        if norm > f64::EPSILON {
            (norm, self / norm)
        } else {
            (0.0, Point::ZERO)
        }
    }

    /// Unit vector, or `Point::ZERO` for a (near-)null vector.
    #[inline]
    pub fn normalized(self) -> Point {
        self.norm_and_normalized().1
    }

    /// Rotate 90° counter-clockwise.  Used for tangents and corridor tests.
    #[inline]
    pub fn rotate90_deg(self) -> Point {
        Point::new(-self.y, self.x)
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    #[inline]
    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
