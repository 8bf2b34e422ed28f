pub mod matcher;
pub mod ttl;

pub use matcher::CachedNameMatcher;
pub use ttl::{CacheStats, TtlCache};
