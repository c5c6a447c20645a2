use serde::Serialize;

use crate::{placement::RegistrantId, unit::UnitKey};

/// The single active selection of a map session.
///
/// A unit and a marker are never selected together, and the view is zoomed
/// exactly when something is selected; the enum makes both rules structural.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "target", rename_all = "snake_case")]
pub enum SelectionState {
    /// Nothing selected, default camera.
    #[default]
    Idle,
    /// A polygon is selected and the camera is fit to its bounds.
    Unit(UnitKey),
    /// A marker is selected and the camera has flown to it.
    Marker(RegistrantId),
}

impl SelectionState {
    pub fn selected_unit(&self) -> Option<&UnitKey> {
        match self {
            Self::Unit(key) => Some(key),
            _ => None,
        }
    }

    pub fn selected_marker(&self) -> Option<&RegistrantId> {
        match self {
            Self::Marker(id) => Some(id),
            _ => None,
        }
    }

    #[inline] pub fn zoomed(&self) -> bool { !matches!(self, Self::Idle) }
}
