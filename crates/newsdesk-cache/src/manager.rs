//! Coherent cache facade over two related entity kinds.

use newsdesk_core::{EntityId, HasId};

use crate::eviction::EvictionCache;

/// A cache facade over a bound parent/child entity relation, e.g. one
/// news article owning many comments.
///
/// The manager owns one eviction cache per kind, keyed by entity id, and
/// applies cross-relation removal cascades. It does not discover
/// relations itself: the caller, who has access to the authoritative
/// data source, supplies the affected bound ids at call time. This
/// keeps the manager free of data-source dependencies.
pub struct BoundEntityCacheManager<P, C>
where
    P: HasId,
    C: HasId,
{
    parents: Box<dyn EvictionCache<EntityId, P>>,
    children: Box<dyn EvictionCache<EntityId, C>>,
}

impl<P, C> BoundEntityCacheManager<P, C>
where
    P: HasId + Clone + Send + 'static,
    C: HasId + Clone + Send + 'static,
{
    /// Creates a manager over the two given caches.
    #[must_use]
    pub fn new(
        parents: Box<dyn EvictionCache<EntityId, P>>,
        children: Box<dyn EvictionCache<EntityId, C>>,
    ) -> Self {
        Self { parents, children }
    }

    /// Inserts or replaces a parent entity, keyed by its id.
    pub fn put_parent(&self, parent: P) {
        self.parents.put(parent.id(), parent);
    }

    /// Inserts or replaces a child entity, keyed by its id.
    pub fn put_child(&self, child: C) {
        self.children.put(child.id(), child);
    }

    /// Returns the cached parent for an id, refreshing its cache state.
    #[must_use]
    pub fn get_parent(&self, id: EntityId) -> Option<P> {
        self.parents.get(&id)
    }

    /// Returns the cached child for an id, refreshing its cache state.
    #[must_use]
    pub fn get_child(&self, id: EntityId) -> Option<C> {
        self.children.get(&id)
    }

    /// Removes a parent entry, then removes every supplied affected
    /// child id from the child cache.
    ///
    /// The cascade is not atomic across the two caches: a concurrent
    /// reader may observe the parent gone while a child is still
    /// cached. Each cache stays internally consistent at every step.
    pub fn remove_parent(&self, id: EntityId, affected_child_ids: &[EntityId]) {
        self.parents.remove(&id);
        for child_id in affected_child_ids {
            self.children.remove(child_id);
        }
        tracing::debug!(
            parent_id = id,
            children = affected_child_ids.len(),
            "parent removed from cache with child cascade"
        );
    }

    /// Removes a child entry, then removes every supplied affected
    /// parent id from the parent cache. Symmetric to
    /// [`Self::remove_parent`].
    pub fn remove_child(&self, id: EntityId, affected_parent_ids: &[EntityId]) {
        self.children.remove(&id);
        for parent_id in affected_parent_ids {
            self.parents.remove(parent_id);
        }
        tracing::debug!(
            child_id = id,
            parents = affected_parent_ids.len(),
            "child removed from cache with parent cascade"
        );
    }

    /// Returns the number of cached parent entries.
    #[must_use]
    pub fn parent_len(&self) -> usize {
        self.parents.len()
    }

    /// Returns the number of cached child entries.
    #[must_use]
    pub fn child_len(&self) -> usize {
        self.children.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::CacheFactory;
    use newsdesk_core::{Comment, News};

    fn manager() -> BoundEntityCacheManager<News, Comment> {
        BoundEntityCacheManager::new(
            CacheFactory::create("lru", 10),
            CacheFactory::create("lru", 10),
        )
    }

    fn news(id: EntityId) -> News {
        News::new("title", "body", "author").with_id(id)
    }

    fn comment(id: EntityId, news_id: EntityId) -> Comment {
        Comment::new("text", "user", news_id).with_id(id)
    }

    #[test]
    fn test_put_and_get_both_kinds() {
        let manager = manager();
        manager.put_parent(news(1));
        manager.put_child(comment(10, 1));

        assert_eq!(manager.get_parent(1).map(|n| n.id), Some(1));
        assert_eq!(manager.get_child(10).map(|c| c.id), Some(10));
        assert!(manager.get_parent(2).is_none());
    }

    #[test]
    fn test_remove_parent_cascades_to_children() {
        let manager = manager();
        manager.put_parent(news(1));
        manager.put_child(comment(10, 1));
        manager.put_child(comment(11, 1));
        manager.put_child(comment(12, 2));

        manager.remove_parent(1, &[10, 11]);

        assert!(manager.get_parent(1).is_none());
        assert!(manager.get_child(10).is_none());
        assert!(manager.get_child(11).is_none());
        // Unrelated child untouched.
        assert_eq!(manager.get_child(12).map(|c| c.id), Some(12));
    }

    #[test]
    fn test_remove_child_cascades_to_parent() {
        let manager = manager();
        manager.put_parent(news(1));
        manager.put_child(comment(10, 1));

        manager.remove_child(10, &[1]);

        assert!(manager.get_child(10).is_none());
        assert!(manager.get_parent(1).is_none());
    }

    #[test]
    fn test_cascade_with_uncached_ids_is_a_no_op() {
        let manager = manager();
        manager.put_parent(news(1));

        // None of the affected ids are cached; nothing should panic and
        // the parent removal still applies.
        manager.remove_parent(1, &[40, 41]);
        assert_eq!(manager.parent_len(), 0);
        assert_eq!(manager.child_len(), 0);
    }

    #[test]
    fn test_put_replaces_by_id() {
        let manager = manager();
        manager.put_parent(news(1));
        let updated = News::new("updated", "body", "author").with_id(1);
        manager.put_parent(updated);

        assert_eq!(manager.parent_len(), 1);
        assert_eq!(manager.get_parent(1).map(|n| n.title), Some("updated".to_string()));
    }
}
