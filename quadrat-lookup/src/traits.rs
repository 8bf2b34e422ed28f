//! Capabilities the interpreters consume.
//!
//! Implementations must be shareable across the worker threads of a batch,
//! so every trait requires `Send + Sync`.

use crate::LookupError;
use quadrat_core::{Country, MatchQuery, NameParts, NameUsageMatch, Rank};
use std::sync::Arc;

/// Reverse geocoding: which country contains a point
pub trait Geocoder: Send + Sync {
    /// `None` when the point lies outside every known country or the
    /// lookup could not be answered. Deterministic for a point within one run.
    fn country_at(&self, latitude: f64, longitude: f64) -> Option<Country>;
}

/// Reference taxonomy matching
pub trait NameMatcher: Send + Sync {
    /// `Ok` with `MatchType::None` means the service answered "no match";
    /// `Err` means it could not be asked.
    fn match_name(&self, query: &MatchQuery) -> Result<NameUsageMatch, LookupError>;
}

/// Decomposition of a canonical name into its atomised parts
pub trait NameParser: Send + Sync {
    fn parse(&self, canonical_name: &str, rank: Option<Rank>) -> Option<NameParts>;
}

impl<T: Geocoder + ?Sized> Geocoder for Arc<T> {
    fn country_at(&self, latitude: f64, longitude: f64) -> Option<Country> {
        (**self).country_at(latitude, longitude)
    }
}

impl<T: NameMatcher + ?Sized> NameMatcher for Arc<T> {
    fn match_name(&self, query: &MatchQuery) -> Result<NameUsageMatch, LookupError> {
        (**self).match_name(query)
    }
}

impl<T: NameParser + ?Sized> NameParser for Arc<T> {
    fn parse(&self, canonical_name: &str, rank: Option<Rank>) -> Option<NameParts> {
        (**self).parse(canonical_name, rank)
    }
}
