// End-to-end runs over the public API: GeoJSON boundaries in, markers and
// camera commands out.

use std::io::Write;

use geoplace::{
    read_boundaries_file, CameraCommand, FeatureRef, MapConfig, MapEvent, MapSession, MarkerSource,
    Registrant, RegistrantId, SelectionState, Style, UnitKey,
};

const CONFIG: &str = r##"{
    "units": [
        { "key": "Purok 5, Upper Jasaan", "aliases": ["Purok 5"] },
        { "key": "Purok 1, Lower Jasaan", "aliases": ["Purok 1"] },
        { "key": "Purok 10, Lower Jasaan", "aliases": ["Purok 10"] }
    ],
    "label_fields": ["Name", "PUROK"],
    "camera": { "default_center": { "lat": 8.65, "lng": 124.75 } }
}"##;

const BOUNDARIES: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "Name": "Purok 5" },
            "geometry": { "type": "Polygon", "coordinates": [[[124.0, 8.0], [124.01, 8.0], [124.01, 8.01], [124.0, 8.01], [124.0, 8.0]]] }
        },
        {
            "type": "Feature",
            "properties": { "PUROK": "PUROK 10 (Riverside)" },
            "geometry": { "type": "Polygon", "coordinates": [[[124.02, 8.0], [124.03, 8.0], [124.03, 8.01], [124.02, 8.01], [124.02, 8.0]]] }
        },
        {
            "type": "Feature",
            "properties": { "Name": "Sitio Unmapped" },
            "geometry": { "type": "Polygon", "coordinates": [[[124.04, 8.0], [124.05, 8.0], [124.05, 8.01], [124.04, 8.0]]] }
        },
        {
            "type": "Feature",
            "properties": { "Name": "Purok 1" },
            "geometry": { "type": "Polygon", "coordinates": [[[124.06, 8.0], [124.07, 8.0], [124.06, 8.0]]] }
        }
    ]
}"#;

fn loaded_session() -> MapSession {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BOUNDARIES.as_bytes()).unwrap();

    let mut session = MapSession::new(MapConfig::from_json_str(CONFIG).unwrap()).unwrap();
    let report = session.rebuild_catalog(read_boundaries_file(file.path()).unwrap()).clone();
    assert_eq!(report.features, 4);
    assert_eq!(report.unresolved, vec!["Sitio Unmapped".to_owned()]);
    assert_eq!(report.degenerate.len(), 1);
    assert_eq!(report.degenerate[0].key.as_str(), "Purok 1, Lower Jasaan");
    session
}

#[test]
fn three_registrants_scatter_inside_purok_five() {
    let mut session = loaded_session();
    let summary = *session.catalog().lookup("Purok 5, Upper Jasaan").unwrap();
    assert!((summary.center_lat - 8.005).abs() < 1e-12);
    assert!((summary.center_lng - 124.005).abs() < 1e-12);
    assert!((summary.lat_range - 0.01).abs() < 1e-12);
    assert!((summary.lng_range - 0.01).abs() < 1e-12);

    let placement = session.place_all(vec![
        Registrant::new("RSBSA-001", "Purok 5, Upper Jasaan"),
        Registrant::new("RSBSA-002", "Purok 5, Upper Jasaan"),
        Registrant::new("RSBSA-003", UnitKey::from_parts("Purok 5", "Upper Jasaan")),
    ]);

    assert_eq!(placement.markers.len(), 3);
    for marker in &placement.markers {
        assert_eq!(marker.source, MarkerSource::Scattered);
        assert!((marker.latitude - 8.005).abs() <= 0.004 + 1e-12);
        assert!((marker.longitude - 124.005).abs() <= 0.004 + 1e-12);
    }
}

#[test]
fn registrants_of_degenerate_unit_are_left_out() {
    let mut session = loaded_session();
    let placement = session.place_all(vec![
        Registrant::new("RSBSA-010", "Purok 1, Lower Jasaan"),
        Registrant::new("RSBSA-011", "Purok 10, Lower Jasaan"),
    ]);
    assert_eq!(placement.markers.len(), 1);
    assert_eq!(placement.markers[0].unit_key.as_str(), "Purok 10, Lower Jasaan");
    assert_eq!(placement.unplaced_count(), 1);
}

#[test]
fn data_panel_and_map_share_one_selection() {
    let mut session = loaded_session();
    session.place_all(vec![
        Registrant::new("RSBSA-001", "Purok 5, Upper Jasaan"),
        Registrant::new("RSBSA-002", "Purok 10, Lower Jasaan"),
    ]);
    let unit = UnitKey::from("Purok 5, Upper Jasaan");
    let marker = RegistrantId::from("RSBSA-002");

    // Choropleth click, twice: one camera command.
    assert!(session.select_unit(&unit));
    assert!(!session.select_unit(&unit));
    let events = session.drain_events();
    let commands = events.iter().filter(|e| matches!(e, MapEvent::Camera(_))).count();
    assert_eq!(commands, 1);
    assert!(matches!(events[0], MapEvent::Camera(CameraCommand::FitBounds { max_zoom, .. }) if max_zoom == 17.0));

    // Data panel asks to show a registrant: the unit selection is replaced.
    assert!(session.focus(&marker));
    assert_eq!(session.selection(), &SelectionState::Marker(marker.clone()));
    let styles = session.config().styles;
    assert_eq!(session.style_for(&FeatureRef::Marker(marker.clone())), Style::Marker(styles.marker.selected));
    assert_eq!(session.style_for(&FeatureRef::Unit(unit.clone())), Style::Polygon(styles.polygon.default));

    // Unknown targets change nothing.
    session.drain_events();
    assert!(!session.focus(&"RSBSA-999".into()));
    assert!(!session.select_unit(&"Purok 3, Upper Jasaan".into()));
    assert!(session.drain_events().is_empty());
    assert!(session.selection().zoomed());

    // Exit goes back to the configured home view.
    assert!(session.exit_zoom());
    assert!(!session.selection().zoomed());
    let events = session.drain_events();
    assert!(matches!(
        events[0],
        MapEvent::Camera(CameraCommand::Reset { center, zoom }) if center.x == 124.75 && center.y == 8.65 && zoom == 14.0
    ));
    assert_eq!(events[1], MapEvent::SelectionChanged(SelectionState::Idle));
}

#[test]
fn hover_restores_selection_style_on_leave() {
    let mut session = loaded_session();
    let unit = UnitKey::from("Purok 10, Lower Jasaan");
    let other = UnitKey::from("Purok 5, Upper Jasaan");
    let styles = session.config().styles.polygon;

    session.select_unit(&unit);
    session.hover_unit(&other);
    assert_eq!(session.unit_style(&other), styles.hover);
    session.leave_unit(&other);
    assert_eq!(session.unit_style(&other), styles.default);

    session.hover_unit(&unit);
    session.leave_unit(&unit);
    assert_eq!(session.unit_style(&unit), styles.selected);
}

#[test]
fn seeded_configuration_repeats_positions_across_sessions() {
    let config = MapConfig::from_json_str(&CONFIG.replacen("\"label_fields\"", "\"scatter\": { \"seed\": 2024 }, \"label_fields\"", 1)).unwrap();
    assert_eq!(config.scatter.seed, Some(2024));

    let boundaries = geoplace::read_boundaries_geojson(BOUNDARIES.as_bytes()).unwrap();
    let registrants = (0..5)
        .map(|i| Registrant::new(format!("RSBSA-{i:03}"), "Purok 10, Lower Jasaan"))
        .collect::<Vec<_>>();

    let run = || {
        let mut session = MapSession::new(config.clone()).unwrap();
        session.rebuild_catalog(boundaries.clone());
        session.place_all(registrants.clone()).markers.clone()
    };
    assert_eq!(run(), run());
}
