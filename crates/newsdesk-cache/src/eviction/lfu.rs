//! Least-frequently-used cache with recency tie-breaking.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{EvictionCache, effective_capacity};

struct LfuEntry<V> {
    value: V,
    freq: u64,
    stamp: u64,
}

/// Lookup table plus frequency buckets.
///
/// Each bucket is a queue of `(key, stamp)` markers ordered from least-
/// to most-recently touched at that frequency. Touching a key pushes a
/// fresh marker into its new bucket and leaves the old marker behind as
/// a tombstone; markers whose `(freq, stamp)` no longer match the live
/// entry are discarded lazily during eviction. `stale` counts abandoned
/// markers so the buckets can be compacted before they outgrow the map.
struct LfuState<K, V> {
    capacity: usize,
    map: HashMap<K, LfuEntry<V>>,
    buckets: BTreeMap<u64, VecDeque<(K, u64)>>,
    clock: u64,
    stale: usize,
}

impl<K, V> LfuState<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            buckets: BTreeMap::new(),
            clock: 0,
            stale: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn mark(&mut self, key: K, freq: u64, stamp: u64) {
        self.buckets.entry(freq).or_default().push_back((key, stamp));
    }

    /// Evicts the entry with the minimum use-count; among equal counts
    /// the least-recently-touched one goes first.
    fn evict(&mut self) {
        loop {
            let Some(mut bucket) = self.buckets.first_entry() else {
                return;
            };
            let freq = *bucket.key();
            let mut victim: Option<K> = None;
            {
                let queue = bucket.get_mut();
                while let Some((key, stamp)) = queue.pop_front() {
                    let live = self
                        .map
                        .get(&key)
                        .is_some_and(|entry| entry.freq == freq && entry.stamp == stamp);
                    if live {
                        victim = Some(key);
                        break;
                    }
                    self.stale = self.stale.saturating_sub(1);
                }
            }
            if bucket.get().is_empty() {
                bucket.remove();
            }
            if let Some(key) = victim {
                self.map.remove(&key);
                tracing::trace!("lfu eviction");
                return;
            }
        }
    }

    /// Rebuilds the buckets from live entries, dropping every tombstone.
    /// Runs when tombstones outnumber live entries; each marker is
    /// abandoned at most once, so the cost stays amortized constant.
    fn compact(&mut self) {
        let mut live: Vec<(u64, u64, K)> = self
            .map
            .iter()
            .map(|(key, entry)| (entry.freq, entry.stamp, key.clone()))
            .collect();
        live.sort_unstable_by_key(|(freq, stamp, _)| (*freq, *stamp));

        self.buckets.clear();
        self.stale = 0;
        for (freq, stamp, key) in live {
            self.mark(key, freq, stamp);
        }
    }

    fn maybe_compact(&mut self) {
        if self.stale > self.map.len() + self.capacity {
            self.compact();
        }
    }

    /// Bumps the use-count and recency of an existing key.
    fn touch(&mut self, key: &K) {
        let stamp = self.tick();
        let Some(entry) = self.map.get_mut(key) else {
            return;
        };
        entry.freq += 1;
        entry.stamp = stamp;
        let freq = entry.freq;
        self.stale += 1; // the marker in the previous bucket is now dead
        self.mark(key.clone(), freq, stamp);
        self.maybe_compact();
    }
}

/// Capacity-bounded cache evicting the least-frequently-used entry.
///
/// Every `get`, and every `put` of an existing key, increments the key's
/// use-count. On overflow the entry with the smallest use-count is
/// evicted; ties are broken by recency so the least-recently-touched of
/// the coldest entries goes first, which keeps cold-but-reused entries
/// from starving. Bookkeeping is amortized O(1) via lazily cleaned
/// frequency buckets. Structural mutations are serialized on an internal
/// mutex.
pub struct LfuCache<K, V> {
    inner: Mutex<LfuState<K, V>>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache bounded to `capacity` entries. A zero capacity is
    /// coerced to [`super::DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LfuState::new(effective_capacity(capacity))),
        }
    }

    fn state(&self) -> MutexGuard<'_, LfuState<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> EvictionCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn put(&self, key: K, value: V) {
        let mut state = self.state();
        if let Some(entry) = state.map.get_mut(&key) {
            entry.value = value;
            state.touch(&key);
            return;
        }
        if state.map.len() >= state.capacity {
            state.evict();
        }
        let stamp = state.tick();
        state.map.insert(
            key.clone(),
            LfuEntry {
                value,
                freq: 1,
                stamp,
            },
        );
        state.mark(key, 1, stamp);
    }

    fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state();
        if !state.map.contains_key(key) {
            return None;
        }
        state.touch(key);
        state.map.get(key).map(|entry| entry.value.clone())
    }

    fn remove(&self, key: &K) {
        let mut state = self.state();
        if state.map.remove(key).is_some() {
            // Markers for the removed key become tombstones.
            self.prune_after_remove(&mut state);
        }
    }

    fn len(&self) -> usize {
        self.state().map.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.state().map.contains_key(key)
    }

    fn capacity(&self) -> usize {
        self.state().capacity
    }
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn prune_after_remove(&self, state: &mut LfuState<K, V>) {
        state.stale += 1;
        state.maybe_compact();
    }
}
