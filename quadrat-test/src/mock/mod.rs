//! Mock implementations of the reference lookups
//!
//! Deterministic stand-ins for the network-backed geocoder and name matcher.

mod geocoder;
mod matcher;

pub use geocoder::{MockGeocoder, Region};
pub use matcher::MockNameMatcher;
