//! Composite cache stores for query results.
//!
//! A composite value is a cached collection of entities (an ordered list
//! or a page with pagination metadata) as opposed to a single cached
//! entity. Each store covers one (entity kind, query shape) pair and is
//! keyed by [`RequestFingerprint`], so a list of comments can never be
//! read back as a page of news and no downcasting exists anywhere.

use std::marker::PhantomData;

use dashmap::DashMap;

use newsdesk_core::{HasId, Page};

use crate::error::CacheError;
use crate::fingerprint::RequestFingerprint;

/// A cached collection of entities that can enumerate its members for
/// invalidation scans.
///
/// The built-in implementations (`Vec<E>` and [`Page<E>`]) always
/// succeed. A custom composite value that cannot enumerate its members
/// must return [`CacheError::UnsupportedCompositeShape`] so the
/// invalidator can drop it conservatively instead of silently skipping
/// it.
pub trait CompositeValue<E: HasId> {
    /// Returns the member entities of this composite value.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnsupportedCompositeShape`] if the members
    /// cannot be enumerated.
    fn try_members(&self) -> Result<&[E], CacheError>;
}

impl<E: HasId> CompositeValue<E> for Vec<E> {
    fn try_members(&self) -> Result<&[E], CacheError> {
        Ok(self)
    }
}

impl<E: HasId> CompositeValue<E> for Page<E> {
    fn try_members(&self) -> Result<&[E], CacheError> {
        Ok(&self.content)
    }
}

/// A store of cached composite values keyed by request fingerprint.
///
/// Entries are created on first miss for a fingerprint and removed
/// wholesale by the invalidator whenever a member entity changes or is
/// deleted. There is no background expiry; the store only shrinks
/// through invalidation.
pub struct CompositeStore<E, V> {
    pub(crate) entries: DashMap<RequestFingerprint, V>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, V> CompositeStore<E, V>
where
    E: HasId,
    V: CompositeValue<E> + Clone,
{
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            _entity: PhantomData,
        }
    }

    /// Returns the cached composite value for a fingerprint.
    #[must_use]
    pub fn get(&self, fingerprint: RequestFingerprint) -> Option<V> {
        self.entries.get(&fingerprint).map(|e| e.value().clone())
    }

    /// Stores a composite value under a fingerprint, replacing any
    /// previous value.
    pub fn insert(&self, fingerprint: RequestFingerprint, value: V) {
        self.entries.insert(fingerprint, value);
    }

    /// Removes the entry for a fingerprint. No-op if absent.
    pub fn remove(&self, fingerprint: RequestFingerprint) {
        self.entries.remove(&fingerprint);
    }

    /// Returns the number of cached composite entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<E, V> Default for CompositeStore<E, V>
where
    E: HasId,
    V: CompositeValue<E> + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::{News, PageRequest};

    fn fp(n: i64) -> RequestFingerprint {
        RequestFingerprint::of(&[n.into()]).expect("fingerprint")
    }

    #[test]
    fn test_insert_get_remove() {
        let store: CompositeStore<News, Vec<News>> = CompositeStore::new();
        let value = vec![News::new("t", "x", "a").with_id(1)];

        store.insert(fp(1), value.clone());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(fp(1)), Some(value));

        store.remove(fp(1));
        assert!(store.get(fp(1)).is_none());
        assert!(store.is_empty());

        // Removing again is a safe no-op.
        store.remove(fp(1));
    }

    #[test]
    fn test_insert_replaces_existing_entry() {
        let store: CompositeStore<News, Vec<News>> = CompositeStore::new();
        store.insert(fp(1), vec![News::new("old", "x", "a").with_id(1)]);
        store.insert(fp(1), vec![News::new("new", "x", "a").with_id(2)]);
        assert_eq!(store.len(), 1);
        let cached = store.get(fp(1)).expect("entry");
        assert_eq!(cached[0].id, 2);
    }

    #[test]
    fn test_page_members() {
        let page = Page::new(
            vec![News::new("t", "x", "a").with_id(7)],
            PageRequest::default(),
            1,
        );
        let members = page.try_members().expect("members");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id(), 7);
    }
}
