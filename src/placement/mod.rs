mod pipeline;
mod registrant;
mod scatter;

pub use pipeline::{place_all, Placement, UnplacedGroup};
pub use registrant::{MarkerSource, PlacedMarker, Registrant, RegistrantId};
pub use scatter::{scatter_point, Jitter, JitterSource, RandomJitter, ScatterPlacer, SeededJitter};
