use geo::{Coord, Rect};
use log::debug;

use crate::{
    config::CameraConfig,
    placement::RegistrantId,
    selection::{CameraCommand, MapEvent, MarkerStyle, PolygonStyle, SelectionState, StyleConfig},
    unit::UnitKey,
};

/// Selection, hover and camera state shared by the polygon view, the marker
/// view and the external data panel.
///
/// Transitions take the target's geometry as already looked up by the caller;
/// `None` means the target is unknown and the transition is a no-op. Every
/// effective transition queues a camera command and a selection-changed
/// event, drained with [`SelectionMachine::drain_events`].
#[derive(Debug, Clone)]
pub struct SelectionMachine {
    state: SelectionState,
    hover: Option<UnitKey>,
    camera: CameraConfig,
    styles: StyleConfig,
    events: Vec<MapEvent>,
}

impl SelectionMachine {
    pub fn new(camera: CameraConfig, styles: StyleConfig) -> Self {
        Self { state: SelectionState::Idle, hover: None, camera, styles, events: Vec::new() }
    }

    #[inline] pub fn state(&self) -> &SelectionState { &self.state }

    #[inline] pub fn hovered(&self) -> Option<&UnitKey> { self.hover.as_ref() }

    /// Select a unit and fit the camera to its bounds.
    /// Returns false when nothing changed.
    pub fn select_unit(&mut self, key: &UnitKey, bounds: Option<Rect<f64>>) -> bool {
        let Some(bounds) = bounds else {
            debug!("[selection] ignoring unknown unit '{key}'");
            return false
        };
        if self.state.selected_unit() == Some(key) { return false }

        self.transition(
            SelectionState::Unit(key.clone()),
            CameraCommand::FitBounds { bounds, padding: self.camera.padding, max_zoom: self.camera.max_zoom },
        );
        true
    }

    /// Select a marker and fly the camera to it.
    /// Returns false when nothing changed.
    pub fn select_marker(&mut self, id: &RegistrantId, point: Option<Coord<f64>>) -> bool {
        let Some(point) = point else {
            debug!("[selection] ignoring unknown marker '{id}'");
            return false
        };
        if self.state.selected_marker() == Some(id) { return false }

        self.transition(
            SelectionState::Marker(id.clone()),
            CameraCommand::FlyTo { point, zoom: self.camera.marker_zoom, duration: self.camera.fly_duration() },
        );
        true
    }

    /// Clear the selection and reset the camera to `home`.
    /// Returns false when already idle.
    pub fn exit_zoom(&mut self, home: Coord<f64>) -> bool {
        if !self.state.zoomed() { return false }

        self.transition(
            SelectionState::Idle,
            CameraCommand::Reset { center: home, zoom: self.camera.default_zoom },
        );
        true
    }

    /// Pointer entered a unit polygon.
    pub fn hover(&mut self, key: &UnitKey) {
        self.hover = Some(key.clone());
    }

    /// Pointer left a unit polygon. A stale leave for a unit other than the
    /// hovered one is ignored.
    pub fn leave(&mut self, key: &UnitKey) {
        if self.hover.as_ref() == Some(key) { self.hover = None }
    }

    /// Forget the hovered unit, e.g. after the boundaries were replaced.
    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    /// Style of a unit polygon under the current selection and hover.
    /// Once the pointer leaves, the result falls back to whatever the
    /// selection implies.
    pub fn unit_style(&self, key: &UnitKey) -> PolygonStyle {
        let styles = &self.styles.polygon;
        if self.state.selected_unit() == Some(key) {
            styles.selected
        } else if self.hover.as_ref() == Some(key) {
            styles.hover
        } else {
            styles.default
        }
    }

    /// Style of a marker under the current selection.
    pub fn marker_style(&self, id: &RegistrantId) -> MarkerStyle {
        let styles = &self.styles.marker;
        if self.state.selected_marker() == Some(id) { styles.selected } else { styles.default }
    }

    /// Take all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }

    fn transition(&mut self, next: SelectionState, command: CameraCommand) {
        debug!("[selection] {:?} -> {:?}", self.state, next);
        self.state = next;
        self.events.push(MapEvent::Camera(command));
        self.events.push(MapEvent::SelectionChanged(self.state.clone()));
    }
}
