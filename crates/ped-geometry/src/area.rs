//! Labelled convex areas.
//!
//! Areas are informational regions of the walkable space: waiting zones,
//! exits, measurement fields.  The simulation core never acts on them; it
//! only answers containment queries so the embedding application can react
//! (e.g. mark an agent as arrived once it enters an exit area).

use std::collections::HashMap;

use ped_core::{AreaId, ConvexPolygon, Point};

use crate::error::{GeometryError, GeometryResult};

/// A convex polygon with an id and free-form labels.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    pub id: AreaId,
    pub labels: Vec<String>,
    pub polygon: ConvexPolygon,
}

impl Area {
    /// Whether `pos` lies strictly inside this area.
    #[inline]
    pub fn contains(&self, pos: Point) -> bool {
        self.polygon.is_inside(pos)
    }

    /// Whether this area carries `label`.
    #[inline]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

/// All areas of a simulation, keyed by id.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Areas {
    areas: HashMap<AreaId, Area>,
}

impl Areas {
    /// An area set with no areas in it.
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, id: AreaId) -> Option<&Area> {
        self.areas.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }

    /// All areas carrying `label`, in unspecified order.
    pub fn with_label<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Area> {
        self.areas.values().filter(move |area| area.has_label(label))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// Accumulates areas, validating on build.
#[derive(Default, Debug)]
pub struct AreasBuilder {
    areas: Vec<Area>,
}

impl AreasBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_area(&mut self, id: AreaId, polygon: ConvexPolygon, labels: Vec<String>) -> &mut Self {
        self.areas.push(Area { id, labels, polygon });
        self
    }

    /// Build the area set, rejecting duplicate ids and degenerate polygons.
    pub fn build(self) -> GeometryResult<Areas> {
        let mut areas = HashMap::with_capacity(self.areas.len());
        for area in self.areas {
            let count = area.polygon.points().len();
            if count < 3 {
                return Err(GeometryError::MalformedPolygon { id: area.id, count });
            }
            if areas.contains_key(&area.id) {
                return Err(GeometryError::DuplicateAreaId(area.id));
            }
            areas.insert(area.id, area);
        }
        Ok(Areas { areas })
    }
}
