pub mod catalog;
pub mod place;

use std::path::Path;

use anyhow::Result;
use geoplace::MapConfig;

/// Load the configuration file, or the built-in defaults when none is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<MapConfig> {
    match path {
        Some(path) => MapConfig::from_path(path),
        None => Ok(MapConfig::default()),
    }
}
