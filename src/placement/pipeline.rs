use ahash::AHashMap;
use log::debug;

use crate::{
    catalog::Catalog,
    placement::{Jitter, MarkerSource, PlacedMarker, Registrant, RegistrantId, ScatterPlacer},
    unit::UnitKey,
};

/// Registrants dropped because their unit has no usable boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct UnplacedGroup {
    pub unit_key: UnitKey,
    pub registrants: Vec<RegistrantId>,
}

/// Result of one placement run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    pub markers: Vec<PlacedMarker>,
    pub unplaced: Vec<UnplacedGroup>,
}

impl Placement {
    /// Number of registrants that received no marker.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.iter().map(|group| group.registrants.len()).sum()
    }
}

/// Place every registrant on the map.
///
/// Registrants with a surveyed position keep it. The rest are grouped by unit
/// key (groups in order of first appearance, members in input order) and
/// member `i` of a group of `n` is scattered with ordinal `i` of `n` around
/// the unit's center. Groups whose unit is missing from the catalog are
/// reported in [`Placement::unplaced`] instead of getting a position.
///
/// Every call recomputes all positions from scratch.
pub fn place_all<J: Jitter>(
    registrants: &[Registrant],
    catalog: &Catalog,
    placer: &mut ScatterPlacer<J>,
) -> Placement {
    let mut placement = Placement::default();
    let mut groups: Vec<(&UnitKey, Vec<&Registrant>)> = Vec::new();
    let mut slots: AHashMap<&UnitKey, usize> = AHashMap::new();

    for registrant in registrants {
        if let Some(position) = registrant.surveyed() {
            placement.markers.push(PlacedMarker {
                registrant_id: registrant.id.clone(),
                latitude: position.y,
                longitude: position.x,
                unit_key: registrant.unit_key.clone(),
                ordinal: None,
                source: MarkerSource::Surveyed,
            });
            continue
        }

        let slot = *slots.entry(&registrant.unit_key).or_insert_with(|| {
            groups.push((&registrant.unit_key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(registrant);
    }

    for (key, members) in groups {
        let Some(summary) = catalog.lookup(key) else {
            debug!("[placement] no boundary for '{key}', dropping {} registrants", members.len());
            placement.unplaced.push(UnplacedGroup {
                unit_key: key.clone(),
                registrants: members.iter().map(|r| r.id.clone()).collect(),
            });
            continue
        };

        let total = members.len();
        for (ordinal, registrant) in members.into_iter().enumerate() {
            let position = placer.place(summary, key, ordinal, total);
            placement.markers.push(PlacedMarker {
                registrant_id: registrant.id.clone(),
                latitude: position.y,
                longitude: position.x,
                unit_key: key.clone(),
                ordinal: Some(ordinal),
                source: MarkerSource::Scattered,
            });
        }
    }

    debug!(
        "[placement] placed {} of {} registrants ({} unplaced)",
        placement.markers.len(), registrants.len(), placement.unplaced_count(),
    );

    placement
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use geo::Coord;
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    use super::*;
    use crate::{
        catalog::BoundaryFeature,
        config::ScatterConfig,
        placement::RandomJitter,
        unit::Resolver,
    };

    fn catalog() -> Catalog {
        let resolver = Resolver::new(
            [("Purok 5".to_owned(), UnitKey::from("Purok 5, Upper Jasaan"))],
            [UnitKey::from("Purok 5, Upper Jasaan")],
        ).with_label_fields(["Name".to_owned()]);

        let ring = vec![
            Coord { x: 124.0, y: 8.0 },
            Coord { x: 124.01, y: 8.0 },
            Coord { x: 124.01, y: 8.01 },
            Coord { x: 124.0, y: 8.01 },
        ];
        Catalog::build(
            [BoundaryFeature::new(ring, json!({ "Name": "Purok 5" }).as_object().cloned().unwrap())],
            &resolver,
        )
    }

    fn placer() -> ScatterPlacer<RandomJitter<StdRng>> {
        ScatterPlacer::new(ScatterConfig::default(), RandomJitter::with_rng(StdRng::seed_from_u64(5)))
    }

    #[test]
    fn group_yields_one_marker_per_registrant() {
        let registrants = (0..7)
            .map(|i| Registrant::new(format!("REG-{i}"), "Purok 5, Upper Jasaan"))
            .collect::<Vec<_>>();
        let placement = place_all(&registrants, &catalog(), &mut placer());

        assert_eq!(placement.markers.len(), 7);
        assert!(placement.unplaced.is_empty());

        let ordinals = placement.markers.iter().map(|m| m.ordinal.unwrap()).collect::<HashSet<_>>();
        assert_eq!(ordinals, (0..7).collect::<HashSet<_>>());
        for m in &placement.markers {
            assert_eq!(m.source, MarkerSource::Scattered);
            assert!((m.latitude - 8.005).abs() <= 0.004 + 1e-12);
            assert!((m.longitude - 124.005).abs() <= 0.004 + 1e-12);
        }
    }

    #[test]
    fn ordinals_follow_input_order_within_group() {
        let registrants = vec![
            Registrant::new("a", "Purok 5, Upper Jasaan"),
            Registrant::new("x", "Elsewhere"),
            Registrant::new("b", "Purok 5, Upper Jasaan"),
            Registrant::new("c", "Purok 5, Upper Jasaan"),
        ];
        let placement = place_all(&registrants, &catalog(), &mut placer());
        let ordinals = placement.markers.iter()
            .map(|m| (m.registrant_id.as_str(), m.ordinal))
            .collect::<Vec<_>>();
        assert_eq!(ordinals, vec![("a", Some(0)), ("b", Some(1)), ("c", Some(2))]);
    }

    #[test]
    fn unknown_unit_is_reported_not_placed() {
        let registrants = vec![
            Registrant::new("1", "Purok 9, Nowhere"),
            Registrant::new("2", "Purok 5, Upper Jasaan"),
            Registrant::new("3", "Purok 9, Nowhere"),
        ];
        let placement = place_all(&registrants, &catalog(), &mut placer());
        assert_eq!(placement.markers.len(), 1);
        assert_eq!(placement.unplaced_count(), 2);
        assert_eq!(placement.unplaced, vec![UnplacedGroup {
            unit_key: "Purok 9, Nowhere".into(),
            registrants: vec!["1".into(), "3".into()],
        }]);
    }

    #[test]
    fn surveyed_registrants_keep_their_position() {
        let registrants = vec![
            Registrant::new("s", "Purok 5, Upper Jasaan").with_location(8.0021, 124.0087),
            Registrant::new("a", "Purok 5, Upper Jasaan"),
            Registrant::new("t", "Purok 9, Nowhere").with_location(9.1, 125.2),
        ];
        let placement = place_all(&registrants, &catalog(), &mut placer());
        assert_eq!(placement.markers.len(), 3);
        assert_eq!(placement.unplaced_count(), 0);

        let surveyed = placement.markers.iter().find(|m| m.registrant_id.as_str() == "s").unwrap();
        assert_eq!((surveyed.latitude, surveyed.longitude), (8.0021, 124.0087));
        assert_eq!(surveyed.source, MarkerSource::Surveyed);
        assert_eq!(surveyed.ordinal, None);

        // The only scattered member is alone in its group.
        let scattered = placement.markers.iter().find(|m| m.registrant_id.as_str() == "a").unwrap();
        assert_eq!(scattered.ordinal, Some(0));
    }

    #[test]
    fn empty_input() {
        let placement = place_all(&[], &catalog(), &mut placer());
        assert!(placement.markers.is_empty() && placement.unplaced.is_empty());
    }
}
