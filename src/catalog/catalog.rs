use std::{borrow::Borrow, hash::Hash};

use ahash::AHashMap;
use geo::{Coord, Intersects, LineString, Point, Polygon, Rect};
use log::{debug, info, warn};
use rstar::RTree;

use crate::{
    error::AnalysisError,
    geom::{summarize, GeometrySummary, UnitEnvelope},
    unit::{Properties, Resolution, Resolver, UnitKey},
};

/// One boundary polygon as supplied by the data layer: an outer ring of
/// `(lng, lat)` vertices and its raw metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryFeature {
    pub ring: Vec<Coord<f64>>,
    pub properties: Properties,
}

impl BoundaryFeature {
    pub fn new(ring: Vec<Coord<f64>>, properties: Properties) -> Self {
        Self { ring, properties }
    }
}

/// A unit whose ring could not be summarized.
#[derive(Debug, Clone, PartialEq)]
pub struct DegenerateUnit {
    pub key: UnitKey,
    pub error: AnalysisError,
}

/// What happened while building a catalog. Nothing here is fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogReport {
    /// Number of input features.
    pub features: usize,
    /// Features without any usable label property.
    pub unlabeled: usize,
    /// Raw labels that matched no alias; these are still cataloged under
    /// their own text.
    pub unresolved: Vec<String>,
    /// Units excluded because their ring was degenerate.
    pub degenerate: Vec<DegenerateUnit>,
    /// Keys seen more than once; the last polygon won.
    pub duplicates: Vec<UnitKey>,
}

/// A unit's boundary and its cached summary.
#[derive(Debug, Clone)]
struct UnitBoundary {
    key: UnitKey,
    polygon: Polygon<f64>,
    summary: GeometrySummary,
    resolved: bool,
}

/// Administrative-unit boundaries keyed by canonical unit key.
///
/// Built once per boundary load and read-only afterwards, so it can be shared
/// behind an `Arc` by concurrent placement runs.
#[derive(Debug, Clone)]
pub struct Catalog {
    units: Vec<UnitBoundary>,
    index: AHashMap<UnitKey, usize>,
    rtree: RTree<UnitEnvelope>,
    report: CatalogReport,
}

impl Default for Catalog {
    fn default() -> Self { Self::empty() }
}

impl Catalog {
    /// A catalog without any units.
    pub fn empty() -> Self {
        Self { units: Vec::new(), index: AHashMap::new(), rtree: RTree::new(), report: CatalogReport::default() }
    }

    /// Resolve and summarize every feature. Features without a label or with
    /// a degenerate ring are skipped; when two features share a key the last
    /// one processed wins.
    pub fn build(features: impl IntoIterator<Item = BoundaryFeature>, resolver: &Resolver) -> Self {
        let mut units: Vec<UnitBoundary> = Vec::new();
        let mut index = AHashMap::new();
        let mut report = CatalogReport::default();

        for feature in features {
            report.features += 1;

            let Some(resolution) = resolver.resolve_properties(&feature.properties) else {
                warn!("[catalog] feature {} has no label in {:?}", report.features - 1, resolver.label_fields());
                report.unlabeled += 1;
                continue
            };
            if let Resolution::Unresolved(label) = &resolution {
                warn!("[catalog] unmapped unit label '{label}'");
                report.unresolved.push(label.clone());
            }
            let resolved = resolution.is_resolved();
            let key = resolution.into_key();

            let summary = match summarize(&feature.ring) {
                Ok(summary) => summary,
                Err(error) => {
                    warn!("[catalog] skipping '{key}': {error}");
                    report.degenerate.push(DegenerateUnit { key, error });
                    continue
                }
            };

            let unit = UnitBoundary {
                polygon: Polygon::new(LineString::from(feature.ring), vec![]),
                key: key.clone(),
                summary,
                resolved,
            };
            match index.get(&key) {
                Some(&slot) => {
                    debug!("[catalog] duplicate unit '{key}', keeping the later polygon");
                    report.duplicates.push(key);
                    units[slot] = unit;
                }
                None => {
                    index.insert(key, units.len());
                    units.push(unit);
                }
            }
        }

        let rtree = RTree::bulk_load(
            units.iter().enumerate()
                .map(|(slot, unit)| UnitEnvelope::new(slot, unit.summary.bounds()))
                .collect()
        );

        info!(
            "[catalog] {} units from {} features ({} unresolved, {} degenerate, {} unlabeled, {} duplicate)",
            units.len(), report.features, report.unresolved.len(), report.degenerate.len(),
            report.unlabeled, report.duplicates.len(),
        );

        Self { units, index, rtree, report }
    }

    /// Get the number of cataloged units.
    #[inline] pub fn len(&self) -> usize { self.units.len() }

    /// Check if there are no units.
    #[inline] pub fn is_empty(&self) -> bool { self.units.is_empty() }

    /// Get the build report.
    #[inline] pub fn report(&self) -> &CatalogReport { &self.report }

    /// Look up the summary of a unit.
    #[inline]
    pub fn lookup<Q>(&self, key: &Q) -> Option<&GeometrySummary>
    where
        UnitKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.units[slot].summary)
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        UnitKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Get the boundary polygon of a unit.
    pub fn polygon<Q>(&self, key: &Q) -> Option<&Polygon<f64>>
    where
        UnitKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.units[slot].polygon)
    }

    /// Check whether a unit's label resolved to a configured key, as opposed
    /// to being cataloged under its raw text.
    pub fn is_mapped<Q>(&self, key: &Q) -> bool
    where
        UnitKey: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).is_some_and(|&slot| self.units[slot].resolved)
    }

    /// Iterate over units and their summaries, in key order.
    pub fn units(&self) -> impl Iterator<Item = (&UnitKey, &GeometrySummary)> {
        let mut units = self.units.iter().collect::<Vec<_>>();
        units.sort_by(|a, b| a.key.cmp(&b.key));
        units.into_iter().map(|unit| (&unit.key, &unit.summary))
    }

    /// Compute the bounding rectangle of all units.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.units.iter()
            .map(|unit| unit.summary.bounds())
            .reduce(|a, b| Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                }
            ))
    }

    /// Find the unit whose polygon contains a coordinate (edges included).
    /// Where polygons overlap, the one cataloged first is returned.
    pub fn locate(&self, point: Coord<f64>) -> Option<&UnitKey> {
        let target = Point::from(point);
        self.rtree.locate_in_envelope_intersecting(&UnitEnvelope::point_query(point))
            .map(|envelope| envelope.slot())
            .filter(|&slot| self.units[slot].polygon.intersects(&target))
            .min()
            .map(|slot| &self.units[slot].key)
    }
}
