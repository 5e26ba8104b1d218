//! Caching decorator for the comment repository.

use async_trait::async_trait;

use newsdesk_core::{Comment, EntityId, Page, PageRequest};
use newsdesk_storage::{CommentRepository, DynComments, StorageError};

use crate::fingerprint::RequestFingerprint;

use super::SharedCaches;

/// A [`CommentRepository`] that reads through the shared caches before
/// delegating to the wrapped repository.
pub struct CachedCommentRepository {
    inner: DynComments,
    caches: SharedCaches,
    enabled: bool,
}

impl CachedCommentRepository {
    /// Wraps a comment repository with caching.
    #[must_use]
    pub fn new(inner: DynComments, caches: SharedCaches) -> Self {
        Self {
            inner,
            caches,
            enabled: true,
        }
    }

    /// Wraps a comment repository with caching disabled; every call
    /// delegates unconditionally.
    #[must_use]
    pub fn disabled(inner: DynComments, caches: SharedCaches) -> Self {
        Self {
            inner,
            caches,
            enabled: false,
        }
    }
}

#[async_trait]
impl CommentRepository for CachedCommentRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Comment>, StorageError> {
        if !self.enabled {
            return self.inner.find_by_id(id).await;
        }
        if let Some(comment) = self.caches.entities().get_child(id) {
            tracing::debug!(id, "comment served from cache");
            return Ok(Some(comment));
        }
        let found = self.inner.find_by_id(id).await?;
        if let Some(comment) = &found {
            self.caches.entities().put_child(comment.clone());
        }
        Ok(found)
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<Comment>, StorageError> {
        if !self.enabled {
            return self.inner.find_all(request).await;
        }
        let fingerprint = match RequestFingerprint::of_page(request) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                tracing::warn!(error = %err, "skipping composite caching for comment page");
                return self.inner.find_all(request).await;
            }
        };
        if let Some(page) = self.caches.comment_pages().get(fingerprint) {
            tracing::debug!(
                page = request.page,
                size = request.size,
                "comment page from cache"
            );
            return Ok(page);
        }
        let page = self.inner.find_all(request).await?;
        if !page.is_empty() {
            self.caches.comment_pages().insert(fingerprint, page.clone());
        }
        Ok(page)
    }

    async fn find_all_by_part_text(&self, part: &str) -> Result<Vec<Comment>, StorageError> {
        if !self.enabled {
            return self.inner.find_all_by_part_text(part).await;
        }
        let fingerprint = match RequestFingerprint::of(&[part.into()]) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                tracing::warn!(error = %err, "skipping composite caching for comment filter");
                return self.inner.find_all_by_part_text(part).await;
            }
        };
        if let Some(found) = self.caches.comment_lists().get(fingerprint) {
            tracing::debug!(part, "comment list from cache");
            return Ok(found);
        }
        let found = self.inner.find_all_by_part_text(part).await?;
        if !found.is_empty() {
            self.caches.comment_lists().insert(fingerprint, found.clone());
        }
        Ok(found)
    }

    async fn find_all_by_news_id(&self, news_id: EntityId) -> Result<Vec<Comment>, StorageError> {
        if !self.enabled {
            return self.inner.find_all_by_news_id(news_id).await;
        }
        let fingerprint = match RequestFingerprint::of(&[news_id.into()]) {
            Ok(fingerprint) => fingerprint,
            Err(err) => {
                tracing::warn!(error = %err, "skipping composite caching for bound comments");
                return self.inner.find_all_by_news_id(news_id).await;
            }
        };
        if let Some(found) = self.caches.comment_lists().get(fingerprint) {
            tracing::debug!(news_id, "bound comment list from cache");
            return Ok(found);
        }
        let found = self.inner.find_all_by_news_id(news_id).await?;
        if !found.is_empty() {
            self.caches.comment_lists().insert(fingerprint, found.clone());
        }
        Ok(found)
    }

    async fn save(&self, comment: Comment) -> Result<Comment, StorageError> {
        let saved = self.inner.save(comment).await?;
        if self.enabled {
            self.caches.entities().put_child(saved.clone());
            self.caches.purge_comment_composites(saved.id);
        }
        Ok(saved)
    }

    async fn delete(&self, id: EntityId) -> Result<(), StorageError> {
        if !self.enabled {
            return self.inner.delete(id).await;
        }
        // Resolve the bound article id while the comment still exists.
        let bound: Vec<EntityId> = self
            .inner
            .find_by_id(id)
            .await?
            .map(|comment| comment.news_id)
            .into_iter()
            .collect();

        self.inner.delete(id).await?;

        self.caches.entities().remove_child(id, &bound);
        self.caches.purge_comment_composites(id);
        for news_id in bound {
            self.caches.purge_news_composites(news_id);
        }
        Ok(())
    }
}
