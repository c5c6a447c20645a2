use std::{collections::HashMap, path::Path, time::Duration};

use anyhow::{Context, Result};
use geo::Coord;
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, selection::StyleConfig, unit::UnitKey};

/// Property names tried, in order, when looking for a unit label on a boundary feature.
const DEFAULT_LABEL_FIELDS: &[&str] = &["Name", "name", "NAME", "Purok", "purok", "PUROK", "label", "Label"];

/// Everything the engine needs to know about one deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// The enumeration of valid unit keys with their short-form aliases.
    pub units: Vec<UnitConfig>,
    /// Feature properties that may hold a unit label, highest priority first.
    pub label_fields: Vec<String>,
    pub scatter: ScatterConfig,
    pub camera: CameraConfig,
    pub styles: StyleConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            units: Vec::new(),
            label_fields: DEFAULT_LABEL_FIELDS.iter().map(|&s| s.to_owned()).collect(),
            scatter: ScatterConfig::default(),
            camera: CameraConfig::default(),
            styles: StyleConfig::default(),
        }
    }
}

/// One known unit and the short forms that refer to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConfig {
    pub key: UnitKey,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl UnitConfig {
    pub fn new(key: impl Into<UnitKey>, aliases: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { key: key.into(), aliases: aliases.into_iter().map(Into::into).collect() }
    }
}

/// Parameters of the scatter placement around a unit's center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Largest offset as a fraction of the unit's extent on each axis.
    pub spread: f64,
    /// Lower bound of the random distance fraction.
    pub min_distance: f64,
    /// Upper bound of the random distance fraction.
    pub max_distance: f64,
    /// Derive distance fractions from `(seed, unit, ordinal)` instead of a
    /// fresh random draw, so markers stay put across runs.
    pub seed: Option<u64>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self { spread: 0.4, min_distance: 0.3, max_distance: 1.0, seed: None }
    }
}

/// A latitude/longitude pair as written in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coord<f64> {
    fn from(p: LatLng) -> Self { Coord { x: p.lng, y: p.lat } }
}

/// Camera behaviour for the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Pixel padding `[x, y]` kept around a unit when fitting its bounds.
    pub padding: [f64; 2],
    /// Zoom ceiling when fitting a unit's bounds.
    pub max_zoom: f64,
    /// Zoom level when flying to a marker.
    pub marker_zoom: f64,
    pub fly_duration_secs: f64,
    /// Home position; falls back to the center of all boundaries.
    pub default_center: Option<LatLng>,
    pub default_zoom: f64,
}

impl CameraConfig {
    /// Marker fly-to duration. Negative or non-finite values mean no animation.
    #[inline]
    pub fn fly_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.fly_duration_secs).unwrap_or(Duration::ZERO)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            padding: [50.0, 50.0],
            max_zoom: 17.0,
            marker_zoom: 18.0,
            fly_duration_secs: 1.5,
            default_center: None,
            default_zoom: 14.0,
        }
    }
}

impl MapConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse map configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read map configuration {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid map configuration {}", path.display()))
    }

    /// Check the unit enumeration and numeric parameters for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label_fields.is_empty() { return Err(ConfigError::NoLabelFields) }

        // Keys and aliases share one namespace: a short form may not name two units.
        let mut owners: HashMap<&str, &UnitKey> = HashMap::new();
        for unit in &self.units {
            if unit.key.is_empty() { return Err(ConfigError::EmptyKey) }
            if owners.insert(unit.key.as_str(), &unit.key).is_some() {
                return Err(ConfigError::DuplicateKey(unit.key.clone()))
            }
        }
        for unit in &self.units {
            for alias in &unit.aliases {
                let alias = alias.trim();
                if alias.is_empty() { return Err(ConfigError::EmptyAlias(unit.key.clone())) }
                match owners.insert(alias, &unit.key) {
                    Some(first) if first != &unit.key => {
                        return Err(ConfigError::DuplicateAlias {
                            alias: alias.to_owned(),
                            first: first.clone(),
                            second: unit.key.clone(),
                        })
                    }
                    _ => {}
                }
            }
        }

        let s = &self.scatter;
        if !(s.spread > 0.0 && s.spread <= 0.5) {
            return Err(ConfigError::Scatter(format!("spread must be in (0, 0.5], got {}", s.spread)))
        }
        if !(0.0 <= s.min_distance && s.min_distance <= s.max_distance && s.max_distance <= 1.0) {
            return Err(ConfigError::Scatter(format!(
                "distance range must satisfy 0 <= min <= max <= 1, got [{}, {}]",
                s.min_distance, s.max_distance
            )))
        }

        let c = &self.camera;
        if c.padding.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(ConfigError::Camera(format!("padding must be non-negative, got {:?}", c.padding)))
        }
        for (name, zoom) in [("max_zoom", c.max_zoom), ("marker_zoom", c.marker_zoom), ("default_zoom", c.default_zoom)] {
            if !zoom.is_finite() || zoom < 0.0 {
                return Err(ConfigError::Camera(format!("{name} must be a non-negative number, got {zoom}")))
            }
        }
        if !c.fly_duration_secs.is_finite() || c.fly_duration_secs < 0.0 {
            return Err(ConfigError::Camera(format!("fly_duration_secs must be non-negative, got {}", c.fly_duration_secs)))
        }
        if let Some(center) = c.default_center {
            if !(-90.0..=90.0).contains(&center.lat) || !(-180.0..=180.0).contains(&center.lng) {
                return Err(ConfigError::Camera(format!("default_center out of range: {center:?}")))
            }
        }

        Ok(())
    }

    /// The known unit keys, in configuration order.
    pub fn unit_keys(&self) -> impl Iterator<Item = &UnitKey> {
        self.units.iter().map(|unit| &unit.key)
    }
}
