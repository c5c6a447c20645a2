mod geojson;

pub use geojson::{read_boundaries_file, read_boundaries_geojson, write_markers_geojson};
