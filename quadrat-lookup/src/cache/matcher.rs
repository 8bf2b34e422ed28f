use super::ttl::{CacheStats, TtlCache};
use crate::{LookupError, NameMatcher};
use quadrat_core::config::CacheConfig;
use quadrat_core::{MatchQuery, NameUsageMatch};
use std::time::Duration;
use tracing::debug;

/// Memoises answers of the wrapped matcher per exact query.
///
/// Only answers are cached. A failed lookup is retried by the next caller.
pub struct CachedNameMatcher<M> {
    inner: M,
    cache: TtlCache<MatchQuery, NameUsageMatch>,
}

impl<M: NameMatcher> CachedNameMatcher<M> {
    pub fn new(inner: M, max_entries: usize, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(max_entries, ttl),
        }
    }

    pub fn from_config(inner: M, config: &CacheConfig) -> Self {
        Self::new(
            inner,
            config.max_entries,
            Duration::from_secs(config.ttl_minutes.saturating_mul(60)),
        )
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl<M: NameMatcher> NameMatcher for CachedNameMatcher<M> {
    fn match_name(&self, query: &MatchQuery) -> Result<NameUsageMatch, LookupError> {
        self.cache.get_or_try_insert_with(query, || {
            debug!("Name cache miss for {:?}", query.name);
            self.inner.match_name(query)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadrat_core::{MatchType, Rank};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[derive(Default)]
    struct Counting {
        calls: AtomicU32,
        fail: bool,
    }

    impl NameMatcher for Counting {
        fn match_name(&self, query: &MatchQuery) -> Result<NameUsageMatch, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LookupError::Transport("offline".into()));
            }
            Ok(NameUsageMatch {
                match_type: MatchType::Exact,
                scientific_name: query.name.clone(),
                ..Default::default()
            })
        }
    }

    fn query(name: &str) -> MatchQuery {
        MatchQuery {
            name: Some(name.to_string()),
            rank: Some(Rank::Species),
            ..Default::default()
        }
    }

    #[test]
    fn test_repeated_query_hits_cache() {
        let matcher = CachedNameMatcher::new(Counting::default(), 100, Duration::from_secs(60));

        for _ in 0..5 {
            let m = matcher.match_name(&query("Puma concolor")).unwrap();
            assert_eq!(m.scientific_name.as_deref(), Some("Puma concolor"));
        }

        assert_eq!(matcher.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(matcher.stats().hits, 4);
    }

    #[test]
    fn test_key_includes_classification_and_rank() {
        let matcher = CachedNameMatcher::new(Counting::default(), 100, Duration::from_secs(60));

        let plain = query("Abies");
        let mut with_kingdom = plain.clone();
        with_kingdom.kingdom = Some("Plantae".to_string());
        let mut genus_rank = plain.clone();
        genus_rank.rank = Some(Rank::Genus);

        matcher.match_name(&plain).unwrap();
        matcher.match_name(&with_kingdom).unwrap();
        matcher.match_name(&genus_rank).unwrap();

        assert_eq!(matcher.inner.calls.load(Ordering::SeqCst), 3);
        assert_eq!(matcher.len(), 3);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let matcher = CachedNameMatcher::new(
            Counting { fail: true, ..Default::default() },
            100,
            Duration::from_secs(60),
        );

        assert!(matcher.match_name(&query("Puma concolor")).is_err());
        assert!(matcher.match_name(&query("Puma concolor")).is_err());
        assert_eq!(matcher.inner.calls.load(Ordering::SeqCst), 2);
        assert!(matcher.is_empty());
    }

    #[test]
    fn test_from_config_with_huge_ttl() {
        let config = CacheConfig {
            ttl_minutes: u64::MAX,
            ..Default::default()
        };
        let matcher = CachedNameMatcher::from_config(Counting::default(), &config);

        matcher.match_name(&query("Abies alba")).unwrap();
        matcher.match_name(&query("Abies alba")).unwrap();
        assert_eq!(matcher.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let matcher = Arc::new(CachedNameMatcher::new(
            Counting::default(),
            100,
            Duration::from_secs(60),
        ));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let matcher = Arc::clone(&matcher);
                thread::spawn(move || {
                    for name in ["Puma concolor", "Abies alba", "Felis catus"] {
                        matcher.match_name(&query(name)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Concurrent misses may duplicate upstream calls, but never beyond one per thread and key
        let calls = matcher.inner.calls.load(Ordering::SeqCst);
        assert!((3..=24).contains(&calls));
        assert_eq!(matcher.len(), 3);
    }
}
