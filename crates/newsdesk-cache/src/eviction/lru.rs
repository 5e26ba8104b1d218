//! Least-recently-used cache.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{EvictionCache, effective_capacity};

/// Sentinel slot index marking the end of the recency list.
const NIL: usize = usize::MAX;

struct Node<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// Lookup table plus an intrusive doubly linked recency list stored in a
/// slot vector. `head` is the most-recently-used entry, `tail` the
/// least-recently-used. Every key in `map` points at exactly one live
/// slot and every live slot is indexed by exactly one key.
struct LruState<K, V> {
    capacity: usize,
    map: HashMap<K, usize>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
}

impl<K, V> LruState<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }

    fn node(&self, slot: usize) -> &Node<K, V> {
        self.slots[slot]
            .as_ref()
            .expect("linked slot holds a live node")
    }

    fn node_mut(&mut self, slot: usize) -> &mut Node<K, V> {
        self.slots[slot]
            .as_mut()
            .expect("linked slot holds a live node")
    }

    /// Unlinks `slot` from the recency list without freeing it.
    fn detach(&mut self, slot: usize) {
        let (prev, next) = {
            let node = self.node(slot);
            (node.prev, node.next)
        };
        if prev == NIL {
            self.head = next;
        } else {
            self.node_mut(prev).next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.node_mut(next).prev = prev;
        }
    }

    /// Links `slot` at the head of the recency list (most recent).
    fn push_front(&mut self, slot: usize) {
        let old_head = self.head;
        {
            let node = self.node_mut(slot);
            node.prev = NIL;
            node.next = old_head;
        }
        if old_head != NIL {
            self.node_mut(old_head).prev = slot;
        }
        self.head = slot;
        if self.tail == NIL {
            self.tail = slot;
        }
    }

    fn alloc(&mut self, node: Node<K, V>) -> usize {
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(node);
            slot
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    fn release(&mut self, slot: usize) -> Node<K, V> {
        let node = self.slots[slot]
            .take()
            .expect("released slot holds a live node");
        self.free.push(slot);
        node
    }

    /// Evicts the least-recently-used entry. Caller ensures the cache is
    /// not empty.
    fn evict_tail(&mut self) {
        let tail = self.tail;
        self.detach(tail);
        let node = self.release(tail);
        self.map.remove(&node.key);
        tracing::trace!("lru eviction");
    }

    fn touch(&mut self, slot: usize) {
        if self.head != slot {
            self.detach(slot);
            self.push_front(slot);
        }
    }
}

/// Capacity-bounded cache evicting the least-recently-used entry.
///
/// All operations are O(1): the lookup table maps keys to slots in an
/// intrusive doubly linked list ordered from most- to least-recently
/// used. Structural mutations, including the recency refresh performed
/// by `get`, are serialized on an internal mutex.
pub struct LruCache<K, V> {
    inner: Mutex<LruState<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache bounded to `capacity` entries. A zero capacity is
    /// coerced to [`super::DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruState::new(effective_capacity(capacity))),
        }
    }

    fn state(&self) -> MutexGuard<'_, LruState<K, V>> {
        // A poisoned lock only means another thread panicked mid-call;
        // the list/map invariants are restored before any unwind point,
        // so continuing with the inner state is sound.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> EvictionCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn put(&self, key: K, value: V) {
        let mut state = self.state();
        if let Some(&slot) = state.map.get(&key) {
            state.node_mut(slot).value = value;
            state.touch(slot);
            return;
        }
        if state.map.len() >= state.capacity {
            state.evict_tail();
        }
        let slot = state.alloc(Node {
            key: key.clone(),
            value,
            prev: NIL,
            next: NIL,
        });
        state.push_front(slot);
        state.map.insert(key, slot);
    }

    fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state();
        let slot = *state.map.get(key)?;
        state.touch(slot);
        Some(state.node(slot).value.clone())
    }

    fn remove(&self, key: &K) {
        let mut state = self.state();
        if let Some(slot) = state.map.remove(key) {
            state.detach(slot);
            state.release(slot);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = LruCache::new(3);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(3, "three");

        // Touching 1 makes 2 the least recently used.
        assert_eq!(cache.get(&1), Some("one"));
        cache.put(4, "four");

        assert!(!cache.contains(&2));
        assert!(cache.contains(&1));
        assert!(cache.contains(&3));
        assert!(cache.contains(&4));
    }

    #[test]
    fn test_put_refreshes_recency_of_existing_key() {
        let cache = LruCache::new(2);
        cache.put(1, "one");
        cache.put(2, "two");
        cache.put(1, "one again");
        cache.put(3, "three");

        assert!(!cache.contains(&2));
        assert_eq!(cache.get(&1), Some("one again"));
    }

    #[test]
    fn test_remove_then_refill_reuses_slots() {
        let cache = LruCache::new(2);
        cache.put(1, 10);
        cache.put(2, 20);
        cache.remove(&1);
        cache.put(3, 30);
        cache.put(4, 40);

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&2));
        assert_eq!(cache.get(&3), Some(30));
        assert_eq!(cache.get(&4), Some(40));
    }

    #[test]
    fn test_single_entry_cache() {
        let cache = LruCache::new(1);
        cache.put(1, "one");
        cache.put(2, "two");
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains(&1));
        assert_eq!(cache.get(&2), Some("two"));
    }

    #[test]
    fn test_eviction_order_without_intermediate_reads() {
        let cache = LruCache::new(3);
        for i in 1..=6 {
            cache.put(i, i);
        }
        // Oldest three inserts are gone.
        for i in 1..=3 {
            assert!(!cache.contains(&i));
        }
        for i in 4..=6 {
            assert!(cache.contains(&i));
        }
    }

    #[test]
    fn test_shared_across_threads() {
        use std::sync::Arc;

        let cache = Arc::new(LruCache::new(64));
        let mut handles = Vec::new();
        for t in 0..4 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                for i in 0..200 {
                    let key = t * 1000 + i;
                    cache.put(key, key);
                    cache.get(&key);
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker thread");
        }
        assert!(cache.len() <= cache.capacity());
    }
}
