use std::sync::Arc;

use ahash::AHashMap;
use geo::Coord;
use log::{info, warn};

use crate::{
    catalog::{BoundaryFeature, Catalog, CatalogReport},
    config::MapConfig,
    error::ConfigError,
    placement::{place_all, JitterSource, PlacedMarker, Placement, Registrant, RegistrantId, ScatterPlacer},
    selection::{FeatureRef, MapEvent, MarkerStyle, PolygonStyle, SelectionMachine, SelectionState, Style},
    unit::{Resolver, UnitKey},
};

/// Home position used when neither the configuration nor any boundary
/// provides one.
const FALLBACK_HOME: Coord<f64> = Coord { x: 0.0, y: 0.0 };

/// One logical map: the boundary catalog, the latest placement run and the
/// selection shared by the polygon view, the marker view and the data panel.
///
/// All state changes go through `&mut self`; outbound camera and selection
/// events are queued and taken with [`MapSession::drain_events`].
#[derive(Debug)]
pub struct MapSession {
    config: MapConfig,
    resolver: Resolver,
    catalog: Arc<Catalog>,
    placer: ScatterPlacer<JitterSource>,
    registrants: Vec<Registrant>,
    placement: Placement,
    marker_index: AHashMap<RegistrantId, usize>,
    selection: SelectionMachine,
}

impl MapSession {
    /// Create a session with an empty catalog and no registrants, after
    /// checking the configuration.
    pub fn new(config: MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            resolver: Resolver::from_config(&config),
            catalog: Arc::new(Catalog::empty()),
            placer: ScatterPlacer::from_config(config.scatter),
            registrants: Vec::new(),
            placement: Placement::default(),
            marker_index: AHashMap::new(),
            selection: SelectionMachine::new(config.camera, config.styles),
            config,
        })
    }

    /// Replace the distance jitter, e.g. with a seeded one for stable output.
    pub fn with_jitter(mut self, jitter: JitterSource) -> Self {
        self.placer = ScatterPlacer::new(self.config.scatter, jitter);
        self
    }

    #[inline] pub fn config(&self) -> &MapConfig { &self.config }

    #[inline] pub fn resolver(&self) -> &Resolver { &self.resolver }

    /// Shared handle to the current catalog.
    #[inline] pub fn catalog(&self) -> Arc<Catalog> { Arc::clone(&self.catalog) }

    #[inline] pub fn selection(&self) -> &SelectionState { self.selection.state() }

    #[inline] pub fn placement(&self) -> &Placement { &self.placement }

    #[inline] pub fn markers(&self) -> &[PlacedMarker] { &self.placement.markers }

    pub fn marker(&self, id: &RegistrantId) -> Option<&PlacedMarker> {
        self.marker_index.get(id).map(|&i| &self.placement.markers[i])
    }

    /// Load a new set of boundaries and re-place the current registrants.
    pub fn rebuild_catalog(&mut self, features: impl IntoIterator<Item = BoundaryFeature>) -> &CatalogReport {
        self.catalog = Arc::new(Catalog::build(features, &self.resolver));
        if self.selection.hovered().is_some_and(|key| !self.catalog.contains_key(key)) {
            self.selection.clear_hover();
        }
        self.replace_markers();
        self.catalog.report()
    }

    /// Replace the registrant list and recompute every marker.
    pub fn place_all(&mut self, registrants: Vec<Registrant>) -> &Placement {
        self.registrants = registrants;
        self.replace_markers();
        &self.placement
    }

    /// Select a unit polygon. Unknown keys and re-selection are no-ops.
    pub fn select_unit(&mut self, key: &UnitKey) -> bool {
        let bounds = self.catalog.lookup(key).map(|summary| summary.bounds());
        self.selection.select_unit(key, bounds)
    }

    /// Select a marker. Unknown ids and re-selection are no-ops.
    pub fn select_marker(&mut self, id: &RegistrantId) -> bool {
        let point = self.marker(id).map(PlacedMarker::position);
        self.selection.select_marker(id, point)
    }

    /// Show a registrant on the map at the data panel's request.
    #[inline]
    pub fn focus(&mut self, id: &RegistrantId) -> bool {
        self.select_marker(id)
    }

    /// Select whichever unit contains a clicked coordinate.
    pub fn select_at(&mut self, point: Coord<f64>) -> bool {
        match self.catalog.locate(point).cloned() {
            Some(key) => self.select_unit(&key),
            None => false,
        }
    }

    /// Clear the selection and return to the home view.
    pub fn exit_zoom(&mut self) -> bool {
        let home = self.home();
        self.selection.exit_zoom(home)
    }

    /// Pointer entered a unit polygon; unknown keys are ignored.
    pub fn hover_unit(&mut self, key: &UnitKey) -> bool {
        if !self.catalog.contains_key(key) { return false }
        self.selection.hover(key);
        true
    }

    /// Pointer left a unit polygon.
    pub fn leave_unit(&mut self, key: &UnitKey) {
        self.selection.leave(key);
    }

    pub fn unit_style(&self, key: &UnitKey) -> PolygonStyle {
        self.selection.unit_style(key)
    }

    pub fn marker_style(&self, id: &RegistrantId) -> MarkerStyle {
        self.selection.marker_style(id)
    }

    /// Style of any feature under the current selection and hover.
    pub fn style_for(&self, feature: &FeatureRef) -> Style {
        match feature {
            FeatureRef::Unit(key) => Style::Polygon(self.unit_style(key)),
            FeatureRef::Marker(id) => Style::Marker(self.marker_style(id)),
        }
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        self.selection.drain_events()
    }

    /// The configured home position, else the center of all boundaries.
    pub fn home(&self) -> Coord<f64> {
        self.config.camera.default_center.map(Coord::<f64>::from)
            .or_else(|| self.catalog.bounds().map(|bounds| bounds.center()))
            .unwrap_or(FALLBACK_HOME)
    }

    fn replace_markers(&mut self) {
        self.placement = place_all(&self.registrants, &self.catalog, &mut self.placer);
        self.marker_index = AHashMap::with_capacity(self.placement.markers.len());
        for (i, marker) in self.placement.markers.iter().enumerate() {
            if self.marker_index.insert(marker.registrant_id.clone(), i).is_some() {
                warn!("[session] duplicate registrant id '{}', focusing the last marker", marker.registrant_id);
            }
        }

        if !self.placement.unplaced.is_empty() {
            info!(
                "[session] {} registrants in {} units have no boundary",
                self.placement.unplaced_count(), self.placement.unplaced.len(),
            );
        }

        // A selection whose target disappeared falls back to the home view.
        let stale = match self.selection.state() {
            SelectionState::Idle => false,
            SelectionState::Unit(key) => !self.catalog.contains_key(key),
            SelectionState::Marker(id) => !self.marker_index.contains_key(id),
        };
        if stale {
            let home = self.home();
            self.selection.exit_zoom(home);
        }
    }
}
