use geo::{Coord, Rect};
use rstar::{RTreeObject, AABB};

/// A unit's bounding box in an R-tree, associated with a catalog slot by index.
#[derive(Debug, Clone)]
pub(crate) struct UnitEnvelope {
    slot: usize, // Index of the corresponding unit in the catalog
    rect: Rect<f64>,
}

impl UnitEnvelope {
    pub(crate) fn new(slot: usize, rect: Rect<f64>) -> Self {
        Self { slot, rect }
    }

    /// Get the catalog slot of the corresponding unit.
    #[inline] pub(crate) fn slot(&self) -> usize { self.slot }

    /// Point query envelope for locating a coordinate.
    #[inline]
    pub(crate) fn point_query(point: Coord<f64>) -> AABB<[f64; 2]> {
        AABB::from_point([point.x, point.y])
    }
}

impl RTreeObject for UnitEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.rect.min().into(), self.rect.max().into())
    }
}
