pub mod gbif;

pub use gbif::{GbifGeocoder, GbifNameMatchClient, GeocodeLocation};
