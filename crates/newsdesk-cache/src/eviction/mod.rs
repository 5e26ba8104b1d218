//! Capacity-bounded caches with pluggable eviction policies.
//!
//! Two policies are provided:
//!
//! - [`LruCache`] evicts the least-recently-used entry on overflow.
//! - [`LfuCache`] evicts the entry with the smallest use-count, breaking
//!   ties by evicting the least-recently-touched candidate.
//!
//! Both refresh an entry's recency/frequency state on `get` and on `put`
//! of an existing key, and both serialize all structural mutations on an
//! internal mutex so a single instance can be shared across threads.
//! Entries live until they are explicitly removed or evicted; there is
//! no background expiry.

mod lfu;
mod lru;

pub use lfu::LfuCache;
pub use lru::LruCache;

/// Capacity used when a configured capacity is missing or non-positive.
pub const DEFAULT_CAPACITY: usize = 10;

/// A capacity-bounded key-value cache.
///
/// Implementations guarantee `len() <= capacity()` after every
/// operation, and keep their lookup table and ordering structure mutually
/// consistent: every cached key has exactly one position in the ordering
/// structure and vice versa.
pub trait EvictionCache<K, V>: Send + Sync {
    /// Inserts or replaces the value for `key`, refreshing its
    /// recency/frequency state. If `key` is new and the cache is full,
    /// one entry is evicted per policy first.
    fn put(&self, key: K, value: V);

    /// Returns the cached value for `key`, refreshing its
    /// recency/frequency state. Returns `None` for absent keys.
    fn get(&self, key: &K) -> Option<V>;

    /// Removes `key` from the cache. No-op if absent; calling it twice
    /// is equivalent to calling it once.
    fn remove(&self, key: &K);

    /// Returns the number of cached entries. No effect on ordering.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is cached. No effect on ordering.
    fn contains(&self, key: &K) -> bool;

    /// Returns the capacity bound of this cache.
    fn capacity(&self) -> usize;
}

/// Coerces a configured capacity to a usable bound.
pub(crate) fn effective_capacity(capacity: usize) -> usize {
    if capacity == 0 { DEFAULT_CAPACITY } else { capacity }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shared contract tests run against both policies.
    fn boxed_caches() -> Vec<Box<dyn EvictionCache<i64, String>>> {
        vec![Box::new(LruCache::new(3)), Box::new(LfuCache::new(3))]
    }

    #[test]
    fn test_capacity_invariant_holds_after_every_put() {
        for cache in boxed_caches() {
            for i in 0..50 {
                cache.put(i, format!("value-{i}"));
                assert!(cache.len() <= cache.capacity());
            }
        }
    }

    #[test]
    fn test_replace_keeps_size_and_updates_value() {
        for cache in boxed_caches() {
            cache.put(1, "first".to_string());
            cache.put(1, "second".to_string());
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&1).as_deref(), Some("second"));
        }
    }

    #[test]
    fn test_remove_is_idempotent() {
        for cache in boxed_caches() {
            cache.put(1, "one".to_string());
            cache.put(2, "two".to_string());
            cache.remove(&1);
            assert!(!cache.contains(&1));
            assert_eq!(cache.len(), 1);
            cache.remove(&1);
            assert_eq!(cache.len(), 1);
        }
    }

    #[test]
    fn test_zero_capacity_coerces_to_default() {
        assert_eq!(LruCache::<i64, i64>::new(0).capacity(), DEFAULT_CAPACITY);
        assert_eq!(LfuCache::<i64, i64>::new(0).capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_get_miss_does_not_mutate_size() {
        for cache in boxed_caches() {
            cache.put(1, "one".to_string());
            assert!(cache.get(&99).is_none());
            assert_eq!(cache.len(), 1);
        }
    }
}
