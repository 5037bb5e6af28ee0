//! Unit tests for collision geometry and areas.

#[cfg(test)]
mod collision {
    use ped_core::{LineSegment, Point};

    use crate::collision::CollisionGeometryBuilder;
    use crate::error::GeometryError;

    fn corridor() -> crate::CollisionGeometry {
        // 10 m × 4 m corridor, open at both ends.
        let mut builder = CollisionGeometryBuilder::new();
        builder
            .add_line_segment(0.0, 0.0, 10.0, 0.0)
            .add_line_segment(0.0, 4.0, 10.0, 4.0);
        builder.build().unwrap()
    }

    #[test]
    fn segments_within_distance() {
        let geometry = corridor();
        // Center of the corridor: both walls are exactly 2 m away.
        let hits = geometry.segments_within(Point::new(5.0, 2.0), 2.5);
        assert_eq!(hits.len(), 2);
        let hits = geometry.segments_within(Point::new(5.0, 2.0), 1.5);
        assert!(hits.is_empty());
    }

    #[test]
    fn segments_within_is_exact_not_aabb() {
        // A diagonal wall whose bounding box contains the query point but
        // whose segment is farther away than the query radius.
        let mut builder = CollisionGeometryBuilder::new();
        builder.add_line_segment(0.0, 0.0, 10.0, 10.0);
        let geometry = builder.build().unwrap();
        // (8, 2) is inside the AABB but 4.24 m from the segment.
        assert!(geometry.segments_within(Point::new(8.0, 2.0), 3.0).is_empty());
        assert_eq!(geometry.segments_within(Point::new(8.0, 2.0), 5.0).len(), 1);
    }

    #[test]
    fn intersects_any_detects_crossing() {
        let geometry = corridor();
        let crossing = LineSegment::new(Point::new(5.0, -1.0), Point::new(5.0, 1.0));
        assert!(geometry.intersects_any(crossing));
        let inside = LineSegment::new(Point::new(1.0, 2.0), Point::new(9.0, 2.0));
        assert!(!geometry.intersects_any(inside));
    }

    #[test]
    fn zero_length_segment_rejected() {
        let mut builder = CollisionGeometryBuilder::new();
        builder
            .add_line_segment(0.0, 0.0, 1.0, 0.0)
            .add_line_segment(2.0, 2.0, 2.0, 2.0);
        match builder.build() {
            Err(GeometryError::DegenerateSegment { index }) => assert_eq!(index, 1),
            other => panic!("expected DegenerateSegment, got {other:?}"),
        }
    }

    #[test]
    fn empty_geometry_answers_queries() {
        let geometry = CollisionGeometryBuilder::new().build().unwrap();
        assert!(geometry.is_empty());
        assert!(geometry.segments_near(Point::ZERO).is_empty());
        assert!(!geometry.intersects_any(LineSegment::new(Point::ZERO, Point::new(1.0, 1.0))));
    }
}

#[cfg(test)]
mod area {
    use ped_core::{AreaId, ConvexPolygon, Point};

    use crate::area::AreasBuilder;
    use crate::error::GeometryError;

    fn square(x: f64, y: f64, side: f64) -> ConvexPolygon {
        ConvexPolygon::new(vec![
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ])
    }

    #[test]
    fn containment_and_labels() {
        let mut builder = AreasBuilder::new();
        builder
            .add_area(AreaId(0), square(0.0, 0.0, 2.0), vec!["exit".into()])
            .add_area(AreaId(1), square(5.0, 0.0, 2.0), vec!["waiting".into(), "exit".into()]);
        let areas = builder.build().unwrap();

        assert_eq!(areas.len(), 2);
        let exit = areas.get(AreaId(0)).unwrap();
        assert!(exit.contains(Point::new(1.0, 1.0)));
        assert!(!exit.contains(Point::new(3.0, 1.0)));
        assert!(exit.has_label("exit"));
        assert!(!exit.has_label("waiting"));
        assert_eq!(areas.with_label("exit").count(), 2);
        assert_eq!(areas.with_label("waiting").count(), 1);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut builder = AreasBuilder::new();
        builder
            .add_area(AreaId(3), square(0.0, 0.0, 1.0), vec![])
            .add_area(AreaId(3), square(2.0, 0.0, 1.0), vec![]);
        match builder.build() {
            Err(GeometryError::DuplicateAreaId(id)) => assert_eq!(id, AreaId(3)),
            other => panic!("expected DuplicateAreaId, got {other:?}"),
        }
    }

    #[test]
    fn malformed_polygon_rejected() {
        let line = ConvexPolygon::new(vec![Point::ZERO, Point::new(1.0, 0.0)]);
        let mut builder = AreasBuilder::new();
        builder.add_area(AreaId(0), line, vec![]);
        match builder.build() {
            Err(GeometryError::MalformedPolygon { id, count }) => {
                assert_eq!(id, AreaId(0));
                assert_eq!(count, 2);
            }
            other => panic!("expected MalformedPolygon, got {other:?}"),
        }
    }

    #[test]
    fn empty_areas() {
        let areas = crate::Areas::empty();
        assert!(areas.is_empty());
        assert!(areas.get(AreaId(0)).is_none());
    }
}
