//! Reference lookups used during interpretation
//!
//! The interpreters only see the [`Geocoder`], [`NameMatcher`] and
//! [`NameParser`] traits. This crate supplies HTTP implementations for a
//! GBIF-compatible API and composes name matching as a cache over a
//! retrying client.

pub mod cache;
pub mod client;
pub mod error;
pub mod parser;
pub mod resilience;
pub mod traits;

pub use cache::{CacheStats, CachedNameMatcher, TtlCache};
pub use client::{GbifGeocoder, GbifNameMatchClient};
pub use error::LookupError;
pub use parser::CanonicalNameParser;
pub use resilience::{with_retry, RetryPolicy, RetryPolicyBuilder, RetryingNameMatcher};
pub use traits::{Geocoder, NameMatcher, NameParser};

use quadrat_core::Config;

/// The production name matcher stack: cache, then retry, then HTTP
pub type DefaultNameMatcher = CachedNameMatcher<RetryingNameMatcher<GbifNameMatchClient>>;

pub fn name_matcher_from_config(config: &Config) -> Result<DefaultNameMatcher, LookupError> {
    let client = GbifNameMatchClient::new(&config.lookup)?;
    let retrying = RetryingNameMatcher::new(client, RetryPolicy::from_config(&config.retry));
    Ok(CachedNameMatcher::from_config(retrying, &config.cache))
}

pub fn geocoder_from_config(config: &Config) -> Result<GbifGeocoder, LookupError> {
    GbifGeocoder::new(&config.lookup, RetryPolicy::from_config(&config.retry))
}
