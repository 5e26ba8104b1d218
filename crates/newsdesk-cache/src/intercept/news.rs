//! Caching decorator for the news repository.

use async_trait::async_trait;

use newsdesk_core::{EntityId, HasId, News, Page, PageRequest};
use newsdesk_storage::{DynComments, DynNews, NewsRepository, StorageError};

use crate::fingerprint::RequestFingerprint;

use super::SharedCaches;

/// A [`NewsRepository`] that reads through the shared caches before
/// delegating to the wrapped repository.
///
/// The comment handle must point at the *raw* comment backend, not a
/// caching decorator: it is used to resolve the authoritative set of
/// bound comment ids before a delete, and must not be answered from
/// cache.
pub struct CachedNewsRepository {
    inner: DynNews,
    comments: DynComments,
    caches: SharedCaches,
    enabled: bool,
}

impl CachedNewsRepository {
    /// Wraps a news repository with caching.
    #[must_use]
    pub fn new(inner: DynNews, comments: DynComments, caches: SharedCaches) -> Self {
        Self {
            inner,
            comments,
            caches,
            enabled: true,
        }
    }

    /// Wraps a news repository with caching disabled; every call
    /// delegates unconditionally.
    #[must_use]
    pub fn disabled(inner: DynNews, comments: DynComments, caches: SharedCaches) -> Self {
        Self {
            inner,
            comments,
            caches,
            enabled: false,
        }
    }
}

#[async_trait]
impl NewsRepository for CachedNewsRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<News>, StorageError> {
        if !self.enabled {
            return self.inner.find_by_id(id).await;
        }
        if let Some(news) = self.caches.entities().get_parent(id) {
            tracing::debug!(id, "news served from cache");
            return Ok(Some(news));
        }
        let found = self.inner.find_by_id(id).await?;
        if let Some(news) = &found {
            self.caches.entities().put_parent(news.clone());
        }
        Ok(found)
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<News>, StorageError> {
        if !self.enabled {
            return self.inner.find_all(request).await;
        }
        let fingerprint = match RequestFingerprint::of_page(request) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                // Refuse to cache rather than conflate unrelated calls.
                tracing::warn!(error = %err, "skipping composite caching for news page");
                return self.inner.find_all(request).await;
            }
        };
        if let Some(page) = self.caches.news_pages().get(fingerprint) {
            tracing::debug!(page = request.page, size = request.size, "news page from cache");
            return Ok(page);
        }
        let page = self.inner.find_all(request).await?;
        if !page.is_empty() {
            self.caches.news_pages().insert(fingerprint, page.clone());
        }
        Ok(page)
    }

    async fn find_all_by_part_text(&self, part: &str) -> Result<Vec<News>, StorageError> {
        if !self.enabled {
            return self.inner.find_all_by_part_text(part).await;
        }
        let fingerprint = match RequestFingerprint::of(&[part.into()]) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                tracing::warn!(error = %err, "skipping composite caching for news filter");
                return self.inner.find_all_by_part_text(part).await;
            }
        };
        if let Some(found) = self.caches.news_lists().get(fingerprint) {
            tracing::debug!(part, "news list from cache");
            return Ok(found);
        }
        let found = self.inner.find_all_by_part_text(part).await?;
        if !found.is_empty() {
            self.caches.news_lists().insert(fingerprint, found.clone());
        }
        Ok(found)
    }

    async fn save(&self, news: News) -> Result<News, StorageError> {
        // Delegate first: generated ids and timestamps are the data
        // source's to decide.
        let saved = self.inner.save(news).await?;
        if self.enabled {
            self.caches.entities().put_parent(saved.clone());
            // Membership of cached pages/lists may have changed.
            self.caches.purge_news_composites(saved.id);
        }
        Ok(saved)
    }

    async fn delete(&self, id: EntityId) -> Result<(), StorageError> {
        if !self.enabled {
            return self.inner.delete(id).await;
        }
        // Resolve bound comment ids while the article still exists; the
        // data source is the only party that knows the relation.
        let bound: Vec<EntityId> = self
            .comments
            .find_all_by_news_id(id)
            .await?
            .iter()
            .map(HasId::id)
            .collect();

        self.inner.delete(id).await?;

        self.caches.entities().remove_parent(id, &bound);
        self.caches.purge_news_composites(id);
        for comment_id in bound {
            self.caches.purge_comment_composites(comment_id);
        }
        Ok(())
    }
}
