use thiserror::Error;

use crate::unit::UnitKey;

/// Reasons a boundary ring cannot be summarized.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("ring has {count} distinct vertices, at least 3 are required")]
    TooFewVertices { count: usize },

    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
}

/// Problems found while validating a [`crate::MapConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unit key must not be empty")]
    EmptyKey,

    #[error("duplicate unit key '{0}'")]
    DuplicateKey(UnitKey),

    #[error("unit '{0}' has an empty alias")]
    EmptyAlias(UnitKey),

    #[error("alias '{alias}' is claimed by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: UnitKey,
        second: UnitKey,
    },

    #[error("label_fields must name at least one property")]
    NoLabelFields,

    #[error("invalid scatter parameters: {0}")]
    Scatter(String),

    #[error("invalid camera parameters: {0}")]
    Camera(String),
}

/// A color string that is not of the form `#rrggbb`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color '{0}', expected #rrggbb")]
pub struct ParseColorError(pub String);
