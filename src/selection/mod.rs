mod camera;
mod color;
mod machine;
mod state;
mod style;

pub use camera::{CameraCommand, MapEvent};
pub use color::Rgb;
pub use machine::SelectionMachine;
pub use state::SelectionState;
pub use style::{FeatureRef, MarkerStyle, MarkerStyles, PolygonStyle, PolygonStyles, Style, StyleConfig};
