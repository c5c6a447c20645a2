use geo::{Coord, Rect};
use serde::Serialize;

use crate::error::AnalysisError;

/// Bounding extent and center of one boundary ring, in degrees.
///
/// The center is the midpoint of the extrema, not an area-weighted centroid.
/// Units are small, roughly convex parcels, so the box center is close enough
/// and cheap to derive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometrySummary {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
    pub center_lat: f64,
    pub center_lng: f64,
    pub lat_range: f64,
    pub lng_range: f64,
}

impl GeometrySummary {
    /// Center as a coordinate (`x` = longitude, `y` = latitude).
    #[inline] pub fn center(&self) -> Coord<f64> { Coord { x: self.center_lng, y: self.center_lat } }

    /// Bounding box as a rectangle (`x` = longitude, `y` = latitude).
    #[inline]
    pub fn bounds(&self) -> Rect<f64> {
        Rect::new(
            Coord { x: self.min_lng, y: self.min_lat },
            Coord { x: self.max_lng, y: self.max_lat },
        )
    }

    /// Check whether a coordinate lies within the bounding box (edges included).
    #[inline]
    pub fn contains(&self, point: Coord<f64>) -> bool {
        (self.min_lng..=self.max_lng).contains(&point.x)
            && (self.min_lat..=self.max_lat).contains(&point.y)
    }
}

/// Summarize an outer ring of `(lng, lat)` vertices.
///
/// The ring needs at least 3 distinct positions; repeated vertices, including
/// a closing vertex equal to the first, are not counted. Any NaN or infinite
/// coordinate rejects the whole ring.
pub fn summarize(ring: &[Coord<f64>]) -> Result<GeometrySummary, AnalysisError> {
    if let Some(index) = ring.iter().position(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(AnalysisError::NonFiniteCoordinate { index })
    }

    let count = distinct_vertices(ring, 3);
    if count < 3 {
        return Err(AnalysisError::TooFewVertices { count })
    }

    let (min, max) = ring.iter().fold(
        (Coord { x: f64::INFINITY, y: f64::INFINITY }, Coord { x: f64::NEG_INFINITY, y: f64::NEG_INFINITY }),
        |(min, max), c| (
            Coord { x: min.x.min(c.x), y: min.y.min(c.y) },
            Coord { x: max.x.max(c.x), y: max.y.max(c.y) },
        ),
    );

    Ok(GeometrySummary {
        min_lat: min.y,
        max_lat: max.y,
        min_lng: min.x,
        max_lng: max.x,
        center_lat: (min.y + max.y) / 2.0,
        center_lng: (min.x + max.x) / 2.0,
        lat_range: max.y - min.y,
        lng_range: max.x - min.x,
    })
}

/// Count distinct positions in a ring, stopping once `limit` are found.
fn distinct_vertices(ring: &[Coord<f64>], limit: usize) -> usize {
    let mut seen: Vec<Coord<f64>> = Vec::with_capacity(limit);
    for c in ring {
        if !seen.contains(c) {
            seen.push(*c);
            if seen.len() == limit { break }
        }
    }
    seen.len()
}
