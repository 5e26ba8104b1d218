//! Invalidation of composite cache entries by member id.

use newsdesk_core::{EntityId, HasId};

use crate::composite::{CompositeStore, CompositeValue};
use crate::error::CacheError;
use crate::fingerprint::RequestFingerprint;

/// Purges composite (list/page) cache entries containing a given entity.
///
/// The scan is a deliberate linear pass over every stored fingerprint,
/// O(stored fingerprints x average composite size). Composite
/// populations are expected to stay small relative to primary-key cache
/// populations, so an id index is not worth its upkeep here.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompositeCacheInvalidator;

impl CompositeCacheInvalidator {
    /// Removes every composite entry that contains the entity with
    /// `entity_id`, returning the purged fingerprints.
    ///
    /// The scan is not atomic with respect to concurrent inserts: a
    /// fingerprint inserted while the scan runs may or may not be
    /// purged. That race is accepted because a surviving stale entry
    /// self-heals on the next write to its underlying query.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnsupportedCompositeShape`] if any stored
    /// value could not enumerate its members. Such entries are removed
    /// along with the matches before the error is surfaced; dropping a
    /// possibly-unrelated entry beats serving stale data.
    pub fn purge_containing<E, V>(
        store: &CompositeStore<E, V>,
        entity_id: EntityId,
    ) -> Result<Vec<RequestFingerprint>, CacheError>
    where
        E: HasId,
        V: CompositeValue<E> + Clone,
    {
        let mut matched: Vec<RequestFingerprint> = Vec::new();
        let mut shape_error: Option<CacheError> = None;

        // Collect first, remove after: removing while iterating a
        // concurrent map risks deadlocking on the shard being walked.
        for entry in store.entries.iter() {
            match entry.value().try_members() {
                Ok(members) => {
                    if members.iter().any(|member| member.id() == entity_id) {
                        matched.push(*entry.key());
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        fingerprint = entry.key().value(),
                        error = %err,
                        "dropping composite entry with unsupported shape"
                    );
                    matched.push(*entry.key());
                    shape_error = Some(err);
                }
            }
        }

        for fingerprint in &matched {
            store.remove(*fingerprint);
        }

        match shape_error {
            Some(err) => Err(err),
            None => {
                if !matched.is_empty() {
                    tracing::debug!(
                        entity_id,
                        purged = matched.len(),
                        "composite entries invalidated"
                    );
                }
                Ok(matched)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::{News, Page, PageRequest};

    fn fp(n: i64) -> RequestFingerprint {
        RequestFingerprint::of(&[n.into()]).expect("fingerprint")
    }

    fn news(id: EntityId) -> News {
        News::new(format!("title-{id}"), "body", "author").with_id(id)
    }

    #[test]
    fn test_purge_removes_only_entries_containing_the_id() {
        let store: CompositeStore<News, Vec<News>> = CompositeStore::new();
        store.insert(fp(1), vec![news(7), news(8)]);
        store.insert(fp(2), vec![news(9)]);

        let purged =
            CompositeCacheInvalidator::purge_containing(&store, 8).expect("purge succeeds");

        assert_eq!(purged, vec![fp(1)]);
        assert!(store.get(fp(1)).is_none());
        assert!(store.get(fp(2)).is_some());
    }

    #[test]
    fn test_purge_scans_page_values() {
        let store: CompositeStore<News, Page<News>> = CompositeStore::new();
        let request = PageRequest::new(0, 10);
        store.insert(fp(1), Page::new(vec![news(1), news(2)], request, 2));
        store.insert(fp(2), Page::new(vec![news(3)], request, 1));

        let purged = CompositeCacheInvalidator::purge_containing(&store, 2).expect("purge");

        assert_eq!(purged, vec![fp(1)]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_purge_with_no_matches_is_empty() {
        let store: CompositeStore<News, Vec<News>> = CompositeStore::new();
        store.insert(fp(1), vec![news(5)]);

        let purged = CompositeCacheInvalidator::purge_containing(&store, 42).expect("purge");

        assert!(purged.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unsupported_shape_is_dropped_and_surfaced() {
        // A composite value that refuses to enumerate its members.
        #[derive(Clone)]
        struct Opaque;

        impl CompositeValue<News> for Opaque {
            fn try_members(&self) -> Result<&[News], CacheError> {
                Err(CacheError::unsupported_shape("opaque test value"))
            }
        }

        let store: CompositeStore<News, Opaque> = CompositeStore::new();
        store.insert(fp(1), Opaque);

        let err = CompositeCacheInvalidator::purge_containing(&store, 1)
            .expect_err("shape error must surface");

        assert!(err.is_unsupported_shape());
        // The offending entry was dropped conservatively.
        assert!(store.is_empty());
    }
}
