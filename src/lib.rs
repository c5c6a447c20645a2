#![doc = "Geo-attribution and marker placement for administrative-unit boundary maps"]
mod catalog;
mod config;
mod error;
mod geom;
mod io;
mod placement;
mod selection;
mod session;
mod unit;

#[doc(inline)]
pub use catalog::{BoundaryFeature, Catalog, CatalogReport, DegenerateUnit};

#[doc(inline)]
pub use config::{CameraConfig, LatLng, MapConfig, ScatterConfig, UnitConfig};

#[doc(inline)]
pub use error::{AnalysisError, ConfigError, ParseColorError};

#[doc(inline)]
pub use geom::{summarize, GeometrySummary};

#[doc(inline)]
pub use io::{read_boundaries_file, read_boundaries_geojson, write_markers_geojson};

#[doc(inline)]
pub use placement::{
    place_all, scatter_point, Jitter, JitterSource, MarkerSource, PlacedMarker, Placement,
    RandomJitter, Registrant, RegistrantId, ScatterPlacer, SeededJitter, UnplacedGroup,
};

#[doc(inline)]
pub use selection::{
    CameraCommand, FeatureRef, MapEvent, MarkerStyle, MarkerStyles, PolygonStyle, PolygonStyles,
    Rgb, SelectionMachine, SelectionState, Style, StyleConfig,
};

#[doc(inline)]
pub use session::MapSession;

#[doc(inline)]
pub use unit::{Properties, Resolution, Resolver, UnitKey};
