use std::{borrow::Borrow, fmt, sync::Arc};

use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::unit::UnitKey;

/// Reference number of a registrant record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrantId(Arc<str>);

impl RegistrantId {
    pub fn new(id: impl Into<Arc<str>>) -> Self { Self(id.into()) }

    #[inline] pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for RegistrantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RegistrantId {
    fn borrow(&self) -> &str { &self.0 }
}

impl From<&str> for RegistrantId {
    fn from(id: &str) -> Self { Self::new(id) }
}

impl From<String> for RegistrantId {
    fn from(id: String) -> Self { Self::new(id) }
}

/// A registrant as supplied by the datastore layer. The unit key is taken as
/// already canonical; it is never passed through the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registrant {
    pub id: RegistrantId,
    pub unit_key: UnitKey,
    /// Surveyed position, when the record has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Registrant {
    pub fn new(id: impl Into<RegistrantId>, unit_key: impl Into<UnitKey>) -> Self {
        Self { id: id.into(), unit_key: unit_key.into(), latitude: None, longitude: None, label: None }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The surveyed position, if both coordinates are present and finite.
    pub fn surveyed(&self) -> Option<Coord<f64>> {
        match (self.latitude, self.longitude) {
            (Some(y), Some(x)) if x.is_finite() && y.is_finite() => Some(Coord { x, y }),
            _ => None,
        }
    }
}

/// Where a marker's position came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerSource {
    /// Synthesized around the unit's center.
    Scattered,
    /// Copied from the registrant's surveyed position.
    Surveyed,
}

/// A registrant positioned for one render pass. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub registrant_id: RegistrantId,
    pub latitude: f64,
    pub longitude: f64,
    pub unit_key: UnitKey,
    /// Index within the unit's scattered group; `None` for surveyed markers.
    pub ordinal: Option<usize>,
    pub source: MarkerSource,
}

impl PlacedMarker {
    /// Position as a coordinate (`x` = longitude, `y` = latitude).
    #[inline] pub fn position(&self) -> Coord<f64> { Coord { x: self.longitude, y: self.latitude } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surveyed_requires_both_finite_coordinates() {
        let r = Registrant::new("REG-1", "Purok 5, Upper Jasaan");
        assert_eq!(r.surveyed(), None);
        assert_eq!(r.clone().with_location(8.5, 124.5).surveyed(), Some(Coord { x: 124.5, y: 8.5 }));
        assert_eq!(r.clone().with_location(f64::NAN, 124.5).surveyed(), None);

        let mut half = r;
        half.latitude = Some(8.5);
        assert_eq!(half.surveyed(), None);
    }

    #[test]
    fn deserialize_minimal_record() {
        let r: Registrant = serde_json::from_str(r#"{ "id": "RSBSA-10-43-12-001", "unit_key": "Purok 5, Upper Jasaan" }"#).unwrap();
        assert_eq!(r.id.as_str(), "RSBSA-10-43-12-001");
        assert_eq!(r.unit_key.as_str(), "Purok 5, Upper Jasaan");
        assert_eq!(r.label, None);
    }
}
