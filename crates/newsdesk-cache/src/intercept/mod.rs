//! Caching decorators for the repository traits.
//!
//! The decorators wrap a data-access implementation and apply the
//! caching protocol around the four call categories:
//!
//! - **find-by-id**: read through the entity cache.
//! - **find-all / filtered finders**: read through a fingerprint-keyed
//!   composite store; only non-empty results are stored.
//! - **save**: delegate first (generated ids and timestamps are
//!   authoritative), then refresh the entity cache and purge composite
//!   entries whose membership may have changed.
//! - **delete**: resolve affected bound ids from the authoritative
//!   source *before* delegating, then remove the entity entry, purge
//!   its composite stores, and cascade both steps to every bound id.
//!
//! Decorators are composed at construction time; callers hold a plain
//! `DynNews`/`DynComments` and cannot tell a decorated repository from
//! a raw one. The caches never talk to the data source themselves, and
//! data-source errors pass through uncached: a failed read must not be
//! mistaken for an absent value. If the caching layer misbehaves it
//! degrades to always-miss-always-delegate, never to wrong data.

mod comment;
mod news;

pub use comment::CachedCommentRepository;
pub use news::CachedNewsRepository;

use std::sync::Arc;

use newsdesk_core::{Comment, EntityId, News, Page};

use crate::composite::CompositeStore;
use crate::factory::CacheFactory;
use crate::invalidator::CompositeCacheInvalidator;
use crate::manager::BoundEntityCacheManager;
use crate::policy::EvictionPolicy;

/// All cache stores shared by the newsdesk decorators.
///
/// One eviction cache per entity kind (owned by the bound-entity
/// manager) and one composite store per (entity kind, query shape)
/// pair, so no store ever holds values of mixed type.
pub struct ServiceCaches {
    entities: BoundEntityCacheManager<News, Comment>,
    news_pages: CompositeStore<News, Page<News>>,
    news_lists: CompositeStore<News, Vec<News>>,
    comment_pages: CompositeStore<Comment, Page<Comment>>,
    comment_lists: CompositeStore<Comment, Vec<Comment>>,
}

impl ServiceCaches {
    /// Creates the cache bundle with both entity caches built from the
    /// same policy and capacity.
    #[must_use]
    pub fn new(policy: EvictionPolicy, capacity: i64) -> Self {
        Self {
            entities: BoundEntityCacheManager::new(
                CacheFactory::create_with(policy, capacity),
                CacheFactory::create_with(policy, capacity),
            ),
            news_pages: CompositeStore::new(),
            news_lists: CompositeStore::new(),
            comment_pages: CompositeStore::new(),
            comment_lists: CompositeStore::new(),
        }
    }

    /// Creates the cache bundle from a configuration policy name.
    #[must_use]
    pub fn from_name(policy_name: &str, capacity: i64) -> Self {
        Self::new(EvictionPolicy::from_name(policy_name), capacity)
    }

    /// The bound news/comment entity caches.
    #[must_use]
    pub fn entities(&self) -> &BoundEntityCacheManager<News, Comment> {
        &self.entities
    }

    /// The composite store for news pages.
    #[must_use]
    pub fn news_pages(&self) -> &CompositeStore<News, Page<News>> {
        &self.news_pages
    }

    /// The composite store for news lists.
    #[must_use]
    pub fn news_lists(&self) -> &CompositeStore<News, Vec<News>> {
        &self.news_lists
    }

    /// The composite store for comment pages.
    #[must_use]
    pub fn comment_pages(&self) -> &CompositeStore<Comment, Page<Comment>> {
        &self.comment_pages
    }

    /// The composite store for comment lists.
    #[must_use]
    pub fn comment_lists(&self) -> &CompositeStore<Comment, Vec<Comment>> {
        &self.comment_lists
    }

    /// Purges every news composite entry containing the given id.
    ///
    /// A shape error from either store has already dropped the
    /// offending entry; it is logged here and the purge continues with
    /// the other store, preferring over-invalidation to stale data.
    pub(crate) fn purge_news_composites(&self, id: EntityId) {
        if let Err(err) = CompositeCacheInvalidator::purge_containing(&self.news_pages, id) {
            tracing::warn!(id, error = %err, "news page purge hit unsupported shape");
        }
        if let Err(err) = CompositeCacheInvalidator::purge_containing(&self.news_lists, id) {
            tracing::warn!(id, error = %err, "news list purge hit unsupported shape");
        }
    }

    /// Purges every comment composite entry containing the given id.
    pub(crate) fn purge_comment_composites(&self, id: EntityId) {
        if let Err(err) = CompositeCacheInvalidator::purge_containing(&self.comment_pages, id) {
            tracing::warn!(id, error = %err, "comment page purge hit unsupported shape");
        }
        if let Err(err) = CompositeCacheInvalidator::purge_containing(&self.comment_lists, id) {
            tracing::warn!(id, error = %err, "comment list purge hit unsupported shape");
        }
    }
}

/// Shared handle to the cache bundle.
pub type SharedCaches = Arc<ServiceCaches>;
