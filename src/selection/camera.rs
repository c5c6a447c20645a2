use std::time::Duration;

use geo::{Coord, Rect};

use crate::selection::SelectionState;

/// Camera instruction for the presentation layer. Coordinates use
/// `x` = longitude, `y` = latitude.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraCommand {
    /// Fit the view to a unit's bounds, keeping `padding` pixels free and not
    /// zooming in past `max_zoom`.
    FitBounds { bounds: Rect<f64>, padding: [f64; 2], max_zoom: f64 },
    /// Animate to a point at a fixed zoom.
    FlyTo { point: Coord<f64>, zoom: f64, duration: Duration },
    /// Return to the home view.
    Reset { center: Coord<f64>, zoom: f64 },
}

/// Outbound notification produced by a selection transition.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    Camera(CameraCommand),
    SelectionChanged(SelectionState),
}
