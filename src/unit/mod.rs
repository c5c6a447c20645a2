mod key;
mod resolve;

pub use key::UnitKey;
pub use resolve::{Properties, Resolution, Resolver};
