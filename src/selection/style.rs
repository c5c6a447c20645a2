use serde::{Deserialize, Serialize};

use crate::{placement::RegistrantId, selection::Rgb, unit::UnitKey};

/// Render style of a unit polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub fill: Rgb,
    pub fill_opacity: f64,
    pub stroke: Rgb,
    pub weight: f64,
}

/// Render style of a registrant marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub radius: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonStyles {
    pub default: PolygonStyle,
    pub selected: PolygonStyle,
    /// Transient style of a hovered unit that is not selected.
    pub hover: PolygonStyle,
}

impl Default for PolygonStyles {
    fn default() -> Self {
        Self {
            default: PolygonStyle { fill: Rgb::new(0x33, 0x88, 0xff), fill_opacity: 0.2, stroke: Rgb::new(0x33, 0x88, 0xff), weight: 2.0 },
            selected: PolygonStyle { fill: Rgb::new(0xff, 0x78, 0x00), fill_opacity: 0.5, stroke: Rgb::new(0xff, 0x78, 0x00), weight: 4.0 },
            hover: PolygonStyle { fill: Rgb::new(0xff, 0xd1, 0x66), fill_opacity: 0.35, stroke: Rgb::new(0x66, 0x66, 0x66), weight: 3.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyles {
    pub default: MarkerStyle,
    pub selected: MarkerStyle,
}

impl Default for MarkerStyles {
    fn default() -> Self {
        Self {
            default: MarkerStyle { fill: Rgb::new(0x2a, 0x9d, 0x8f), stroke: Rgb::new(0xff, 0xff, 0xff), radius: 6.0, weight: 1.0 },
            selected: MarkerStyle { fill: Rgb::new(0xe6, 0x39, 0x46), stroke: Rgb::new(0xff, 0xff, 0xff), radius: 10.0, weight: 3.0 },
        }
    }
}

/// Style table shared by the polygon and marker views.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub polygon: PolygonStyles,
    pub marker: MarkerStyles,
}

/// A feature the presentation layer asks a style for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureRef {
    Unit(UnitKey),
    Marker(RegistrantId),
}

/// Style of either kind of feature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Polygon(PolygonStyle),
    Marker(MarkerStyle),
}
