/// Bounded cache whose entries expire a fixed time after their last access
use dashmap::DashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// A full cache frees this fraction of its capacity per eviction pass
const EVICTION_FRACTION: usize = 10;

struct Entry<V> {
    value: V,
    last_access: Instant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Shared, thread-safe key/value cache.
///
/// When full, expired entries are purged first. If that frees nothing, the
/// least recently accessed tenth of the capacity is evicted in one pass, so
/// the following inserts find room without scanning. No shard lock is held
/// while a loader runs, so concurrent misses for one key may each call the
/// loader.
pub struct TtlCache<K, V> {
    entries: Arc<DashMap<K, Entry<V>>>,
    max_entries: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            max_entries,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn expired(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_access) >= self.ttl
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        match self.entries.get_mut(key) {
            Some(mut entry) if !self.expired(&entry, now) => {
                entry.last_access = now;
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            Some(_) => {}
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        }

        self.entries.remove_if(key, |_, entry| self.expired(entry, now));
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        if self.max_entries == 0 {
            return;
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.evict();
        }
        self.entries.insert(
            key,
            Entry {
                value,
                last_access: Instant::now(),
            },
        );
    }

    /// Cached value, or the loader's value which is then cached.
    /// Loader errors are passed through and nothing is stored.
    pub fn get_or_try_insert_with<E, F>(&self, key: &K, loader: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = loader()?;
        self.insert(key.clone(), value.clone());
        Ok(value)
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !self.expired(entry, now));
    }

    fn evict(&self) {
        self.purge_expired();
        let len = self.entries.len();
        if len < self.max_entries {
            return;
        }

        let batch = (self.max_entries / EVICTION_FRACTION)
            .max(len + 1 - self.max_entries)
            .min(len);
        let mut by_age: Vec<(Instant, K)> = self
            .entries
            .iter()
            .map(|entry| (entry.value().last_access, entry.key().clone()))
            .collect();
        if batch < by_age.len() {
            by_age.select_nth_unstable_by_key(batch - 1, |(last_access, _)| *last_access);
            by_age.truncate(batch);
        }

        for (_, key) in by_age {
            self.entries.remove(&key);
        }
        debug!("Evicted {} of {} cache entries", batch, len);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
