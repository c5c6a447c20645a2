use std::{f64::consts::TAU, hash::BuildHasher};

use ahash::RandomState;
use geo::Coord;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{config::ScatterConfig, geom::GeometrySummary, unit::UnitKey};

/// Source of the distance fraction that pushes a marker away from its unit's center.
pub trait Jitter {
    /// Distance fraction for one marker, within `[min, max]`.
    fn distance_fraction(&mut self, key: &UnitKey, ordinal: usize, min: f64, max: f64) -> f64;
}

/// Fresh random draw on every call; markers move slightly between runs.
#[derive(Debug, Clone)]
pub struct RandomJitter<R = StdRng> {
    rng: R,
}

impl RandomJitter {
    pub fn new() -> Self { Self { rng: StdRng::from_os_rng() } }
}

impl Default for RandomJitter {
    fn default() -> Self { Self::new() }
}

impl<R: Rng> RandomJitter<R> {
    pub fn with_rng(rng: R) -> Self { Self { rng } }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn distance_fraction(&mut self, _key: &UnitKey, _ordinal: usize, min: f64, max: f64) -> f64 {
        if !(min < max) { return min }
        self.rng.random_range(min..=max)
    }
}

/// Deterministic fraction derived from `(seed, unit key, ordinal)`: the same
/// registrant slot lands on the same spot on every run of the same build.
#[derive(Debug, Clone)]
pub struct SeededJitter {
    hasher: RandomState,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self { hasher: RandomState::with_seeds(seed, 0x9e37_79b9_7f4a_7c15, 0xbf58_476d_1ce4_e5b9, 0x94d0_49bb_1331_11eb) }
    }
}

impl Jitter for SeededJitter {
    fn distance_fraction(&mut self, key: &UnitKey, ordinal: usize, min: f64, max: f64) -> f64 {
        if !(min < max) { return min }
        let seed = BuildHasher::hash_one(&self.hasher, (key.as_str(), ordinal));
        StdRng::seed_from_u64(seed).random_range(min..=max)
    }
}

/// Jitter chosen at runtime from configuration.
#[derive(Debug, Clone)]
pub enum JitterSource {
    Random(RandomJitter),
    Seeded(SeededJitter),
}

impl JitterSource {
    /// Seeded when a seed is given, random otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::Seeded(SeededJitter::new(seed)),
            None => Self::Random(RandomJitter::new()),
        }
    }
}

impl Jitter for JitterSource {
    fn distance_fraction(&mut self, key: &UnitKey, ordinal: usize, min: f64, max: f64) -> f64 {
        match self {
            Self::Random(jitter) => jitter.distance_fraction(key, ordinal, min, max),
            Self::Seeded(jitter) => jitter.distance_fraction(key, ordinal, min, max),
        }
    }
}

/// Offset a point from the center of `summary` by angle `ordinal / total`
/// of a full turn and by `fraction` of `spread` times the unit's extent.
///
/// With `spread` and `fraction` at most 1 the result stays inside the
/// bounding box. It is not guaranteed to be inside the polygon itself when the
/// unit is non-convex.
pub fn scatter_point(summary: &GeometrySummary, ordinal: usize, total: usize, spread: f64, fraction: f64) -> Coord<f64> {
    debug_assert!(total > 0, "total must be at least 1");
    let angle = ordinal as f64 / total.max(1) as f64 * TAU;

    let max_lat_offset = summary.lat_range * spread;
    let max_lng_offset = summary.lng_range * spread;

    Coord {
        x: summary.center_lng + angle.cos() * max_lng_offset * fraction,
        y: summary.center_lat + angle.sin() * max_lat_offset * fraction,
    }
}

/// Spreads the members of a unit around its center so they do not stack.
#[derive(Debug, Clone)]
pub struct ScatterPlacer<J = JitterSource> {
    config: ScatterConfig,
    jitter: J,
}

impl ScatterPlacer<JitterSource> {
    /// Placer using the configured parameters and seed.
    pub fn from_config(config: ScatterConfig) -> Self {
        Self::new(config, JitterSource::from_seed(config.seed))
    }
}

impl<J: Jitter> ScatterPlacer<J> {
    pub fn new(config: ScatterConfig, jitter: J) -> Self {
        Self { config, jitter }
    }

    #[inline] pub fn config(&self) -> &ScatterConfig { &self.config }

    /// Position for member `ordinal` of a group of `total` in unit `key`.
    ///
    /// The jitter's fraction is kept within `[min_distance, max_distance]`;
    /// an inverted range yields `max_distance` rather than panicking.
    pub fn place(&mut self, summary: &GeometrySummary, key: &UnitKey, ordinal: usize, total: usize) -> Coord<f64> {
        let ScatterConfig { spread, min_distance, max_distance, .. } = self.config;
        let fraction = self.jitter
            .distance_fraction(key, ordinal, min_distance, max_distance)
            .max(min_distance)
            .min(max_distance);
        scatter_point(summary, ordinal, total, spread, fraction)
    }
}
