//! Time-expiring result cache
//!
//! Read-heavy list lookups are memoized per key; every mutation invalidates
//! by key prefix. A miss, expiry or eviction only means the caller falls back
//! to its repository, so correctness never depends on the cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// Injectable key/value cache
pub trait ResultCache<V>: Send + Sync {
    /// Value for `key`, if present and unexpired
    fn get(&self, key: &str) -> Option<V>;

    /// Insert or overwrite, restarting the entry's TTL
    fn set(&self, key: &str, value: V);

    /// Current invalidation generation; read it before loading a value
    fn generation(&self) -> u64;

    /// Like `set`, but dropped if any invalidation happened since
    /// `generation` was read. Returns whether the value was stored.
    fn set_if_fresh(&self, key: &str, value: V, generation: u64) -> bool;

    /// Drop every key that starts with `prefix` and advance the generation
    fn invalidate_prefix(&self, prefix: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

// ============================================================================
// TtlCache
// ============================================================================

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

struct State<V> {
    entries: HashMap<String, Entry<V>>,
    generation: u64,
}

/// Bounded in-process cache with a per-entry TTL
///
/// A single mutex guards the map and the generation for every operation, so
/// a fresh-check and its insert cannot interleave with an invalidation.
pub struct TtlCache<V> {
    state: Mutex<State<V>>,
    ttl: Duration,
    max_entries: usize,
}

impl<V> TtlCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            state: Mutex::new(State {
                entries: HashMap::new(),
                generation: 0,
            }),
            ttl: config.ttl,
            max_entries: config.max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<V> TtlCache<V> {
    fn insert(&self, entries: &mut HashMap<String, Entry<V>>, key: &str, value: V) {
        let now = Instant::now();

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            entries.retain(|_, entry| now < entry.expires_at);

            if entries.len() >= self.max_entries {
                let victim = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.expires_at)
                    .map(|(k, _)| k.clone());
                if let Some(victim) = victim {
                    entries.remove(&victim);
                }
            }
        }

        entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }
}

impl<V: Clone + Send> ResultCache<V> for TtlCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        let mut state = self.state.lock();
        let now = Instant::now();

        match state.entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                state.entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: V) {
        let mut state = self.state.lock();
        self.insert(&mut state.entries, key, value);
    }

    fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    fn set_if_fresh(&self, key: &str, value: V, generation: u64) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation {
            return false;
        }
        self.insert(&mut state.entries, key, value);
        true
    }

    fn invalidate_prefix(&self, prefix: &str) {
        let mut state = self.state.lock();
        state.entries.retain(|key, _| !key.starts_with(prefix));
        state.generation = state.generation.wrapping_add(1);
    }
}

// ============================================================================
// NoOpCache
// ============================================================================

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCache;

impl<V> ResultCache<V> for NoOpCache {
    fn get(&self, _key: &str) -> Option<V> {
        None
    }

    fn set(&self, _key: &str, _value: V) {}

    fn generation(&self) -> u64 {
        0
    }

    fn set_if_fresh(&self, _key: &str, _value: V, _generation: u64) -> bool {
        false
    }

    fn invalidate_prefix(&self, _prefix: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cache(ttl: Duration, max_entries: usize) -> TtlCache<Vec<u32>> {
        TtlCache::new(CacheConfig { ttl, max_entries })
    }

    #[test]
    fn test_set_then_get() {
        let cache = cache(DEFAULT_TTL, 10);
        assert_eq!(cache.get("clients:1"), None);

        cache.set("clients:1", vec![1, 2]);
        assert_eq!(cache.get("clients:1"), Some(vec![1, 2]));

        cache.set("clients:1", vec![3]);
        assert_eq!(cache.get("clients:1"), Some(vec![3]));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entries_miss() {
        let cache = cache(Duration::ZERO, 10);
        cache.set("clients:1", vec![1]);
        assert_eq!(cache.get("clients:1"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_prefix_only_removes_matching_keys() {
        let cache = cache(DEFAULT_TTL, 10);
        cache.set("orders:a:1", vec![1]);
        cache.set("orders:a:2", vec![2]);
        cache.set("orders:b:1", vec![3]);
        cache.set("clients:a", vec![4]);

        cache.invalidate_prefix("orders:a");

        assert_eq!(cache.get("orders:a:1"), None);
        assert_eq!(cache.get("orders:a:2"), None);
        assert_eq!(cache.get("orders:b:1"), Some(vec![3]));
        assert_eq!(cache.get("clients:a"), Some(vec![4]));
    }

    #[test]
    fn test_capacity_bound_evicts_nearest_expiry() {
        let cache = cache(DEFAULT_TTL, 2);
        cache.set("k1", vec![1]);
        std::thread::sleep(Duration::from_millis(2));
        cache.set("k2", vec![2]);
        std::thread::sleep(Duration::from_millis(2));
        cache.set("k3", vec![3]);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("k1"), None);
        assert_eq!(cache.get("k2"), Some(vec![2]));
        assert_eq!(cache.get("k3"), Some(vec![3]));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let cache = cache(DEFAULT_TTL, 2);
        cache.set("k1", vec![1]);
        cache.set("k2", vec![2]);
        cache.set("k1", vec![10]);

        assert_eq!(cache.get("k1"), Some(vec![10]));
        assert_eq!(cache.get("k2"), Some(vec![2]));
    }

    #[test]
    fn test_fill_after_invalidation_is_dropped() {
        let cache = cache(DEFAULT_TTL, 10);

        // A reader snapshots the generation, then a writer invalidates
        let generation = cache.generation();
        cache.invalidate_prefix("clients:a");

        assert!(!cache.set_if_fresh("clients:a", vec![1], generation));
        assert_eq!(cache.get("clients:a"), None);

        let generation = cache.generation();
        assert!(cache.set_if_fresh("clients:a", vec![2], generation));
        assert_eq!(cache.get("clients:a"), Some(vec![2]));
    }

    #[test]
    fn test_noop_cache_never_hits() {
        let cache = NoOpCache;
        ResultCache::<u32>::set(&cache, "k", 1);
        assert_eq!(ResultCache::<u32>::get(&cache, "k"), None);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let cache: Arc<dyn ResultCache<String>> = Arc::new(TtlCache::default());
        cache.set("clients:x", "v".to_string());
        assert_eq!(cache.get("clients:x").as_deref(), Some("v"));
        cache.invalidate_prefix("clients:");
        assert_eq!(cache.get("clients:x"), None);
    }
}
