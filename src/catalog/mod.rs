mod catalog;

pub use catalog::{BoundaryFeature, Catalog, CatalogReport, DegenerateUnit};
