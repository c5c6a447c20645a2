mod bbox;
mod summary;

pub(crate) use bbox::UnitEnvelope;
pub use summary::{summarize, GeometrySummary};
