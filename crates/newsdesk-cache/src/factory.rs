//! Construction of eviction caches from configuration values.

use std::hash::Hash;

use crate::eviction::{DEFAULT_CAPACITY, EvictionCache, LfuCache, LruCache};
use crate::policy::EvictionPolicy;

/// Builds eviction caches from a policy name and capacity.
///
/// Pure construction logic with no state. Construction is total: an
/// unknown policy name falls back to LRU and a non-positive capacity
/// falls back to [`DEFAULT_CAPACITY`], so configuration mistakes degrade
/// the cache rather than failing startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheFactory;

impl CacheFactory {
    /// Creates a boxed eviction cache for the given policy name and
    /// capacity.
    #[must_use]
    pub fn create<K, V>(policy_name: &str, capacity: i64) -> Box<dyn EvictionCache<K, V>>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Clone + Send + 'static,
    {
        Self::create_with(EvictionPolicy::from_name(policy_name), capacity)
    }

    /// Creates a boxed eviction cache for an already resolved policy.
    #[must_use]
    pub fn create_with<K, V>(policy: EvictionPolicy, capacity: i64) -> Box<dyn EvictionCache<K, V>>
    where
        K: Eq + Hash + Clone + Send + 'static,
        V: Clone + Send + 'static,
    {
        let capacity = if capacity <= 0 {
            DEFAULT_CAPACITY
        } else {
            capacity as usize
        };
        match policy {
            EvictionPolicy::Lru => Box::new(LruCache::new(capacity)),
            EvictionPolicy::Lfu => Box::new(LfuCache::new(capacity)),
        }
    }
}
