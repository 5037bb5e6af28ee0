//! Wall-segment collision geometry.
//!
//! Walls are an unordered soup of line segments indexed by an R-tree.  The
//! operational models run two query shapes against it every iteration:
//!
//! - "all segments within distance d of a point" (wall repulsion), and
//! - "does this segment cross any wall" (line-of-sight filtering).
//!
//! Both use the R-tree for the broad phase and exact segment math from
//! `ped-core` for the narrow phase.

use ped_core::{LineSegment, Point};
use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::error::{GeometryError, GeometryResult};

/// Broad-phase radius used by [`CollisionGeometry::segments_near`] when the
/// caller has no model-specific cutoff.  Walls farther away than this exert
/// no meaningful force under any of the supported models.
const APPROX_QUERY_DISTANCE: f64 = 5.0;

/// R-tree entry wrapping a wall segment.
#[derive(Clone, Debug)]
struct SegmentEntry(LineSegment);

impl RTreeObject for SegmentEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let LineSegment { p1, p2 } = self.0;
        AABB::from_corners(
            [p1.x.min(p2.x), p1.y.min(p2.y)],
            [p1.x.max(p2.x), p1.y.max(p2.y)],
        )
    }
}

impl PointDistance for SegmentEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let d = self.0.dist_to(Point::new(point[0], point[1]));
        d * d
    }
}

/// Immutable set of wall segments with spatial indexing.
///
/// Built once via [`CollisionGeometryBuilder`] and shared read-only by all
/// per-agent model evaluations, so queries take `&self`.
#[derive(Clone, Debug)]
pub struct CollisionGeometry {
    segments: Vec<LineSegment>,
    index: RTree<SegmentEntry>,
}

impl CollisionGeometry {
    /// All wall segments within `distance` of `pos`, exact.
    pub fn segments_within(&self, pos: Point, distance: f64) -> Vec<LineSegment> {
        self.index
            .locate_within_distance([pos.x, pos.y], distance * distance)
            .map(|entry| entry.0)
            .collect()
    }

    /// Wall segments close enough to `pos` to matter for force evaluation.
    #[inline]
    pub fn segments_near(&self, pos: Point) -> Vec<LineSegment> {
        self.segments_within(pos, APPROX_QUERY_DISTANCE)
    }

    /// Whether `segment` crosses (or touches) any wall.
    pub fn intersects_any(&self, segment: LineSegment) -> bool {
        let envelope = SegmentEntry(segment).envelope();
        self.index
            .locate_in_envelope_intersecting(&envelope)
            .any(|entry| entry.0.intersects(segment))
    }

    /// Iterate over every wall segment, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineSegment> {
        self.segments.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Accumulates wall segments, then builds the indexed geometry.
#[derive(Default, Debug)]
pub struct CollisionGeometryBuilder {
    segments: Vec<LineSegment>,
}

impl CollisionGeometryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one wall segment from `(x1, y1)` to `(x2, y2)`.
    pub fn add_line_segment(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.segments
            .push(LineSegment::new(Point::new(x1, y1), Point::new(x2, y2)));
        self
    }

    /// Build the geometry, bulk-loading the R-tree.
    ///
    /// Zero-length segments are rejected: they carry no direction and would
    /// produce NaN wall normals in the models.
    pub fn build(self) -> GeometryResult<CollisionGeometry> {
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.length_square() <= f64::EPSILON {
                return Err(GeometryError::DegenerateSegment { index });
            }
        }
        let index = RTree::bulk_load(self.segments.iter().copied().map(SegmentEntry).collect());
        Ok(CollisionGeometry { segments: self.segments, index })
    }
}
