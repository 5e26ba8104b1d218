//! In-memory repository backend using concurrent maps.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use newsdesk_core::{Comment, EntityId, News, Page, PageRequest};
use newsdesk_storage::{CommentRepository, NewsRepository, StorageError};

/// In-memory newsdesk storage.
///
/// Provides:
/// - concurrent access via `DashMap`
/// - sequential id assignment per entity kind
/// - cascading delete of comments when their news article is deleted
///
/// Query reads (`find_all*`) return results ordered by ascending id so
/// that equal queries produce equal results, which the caching layer
/// relies on for fingerprint-keyed composite entries.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    news: DashMap<EntityId, News>,
    comments: DashMap<EntityId, Comment>,
    next_news_id: AtomicI64,
    next_comment_id: AtomicI64,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            news: DashMap::new(),
            comments: DashMap::new(),
            next_news_id: AtomicI64::new(1),
            next_comment_id: AtomicI64::new(1),
        }
    }

    fn next_news_id(&self) -> EntityId {
        self.next_news_id.fetch_add(1, Ordering::SeqCst)
    }

    fn next_comment_id(&self) -> EntityId {
        self.next_comment_id.fetch_add(1, Ordering::SeqCst)
    }

    fn sorted_news(&self) -> Vec<News> {
        let mut all: Vec<News> = self.news.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|n| n.id);
        all
    }

    fn sorted_comments(&self) -> Vec<Comment> {
        let mut all: Vec<Comment> = self.comments.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|c| c.id);
        all
    }

    fn page_of<T>(all: Vec<T>, request: PageRequest) -> Page<T> {
        let total = all.len() as u64;
        let content: Vec<T> = all
            .into_iter()
            .skip(request.offset())
            .take(request.size as usize)
            .collect();
        Page::new(content, request, total)
    }
}

#[async_trait]
impl NewsRepository for InMemoryStore {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<News>, StorageError> {
        Ok(self.news.get(&id).map(|e| e.value().clone()))
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<News>, StorageError> {
        Ok(Self::page_of(self.sorted_news(), request))
    }

    async fn find_all_by_part_text(&self, part: &str) -> Result<Vec<News>, StorageError> {
        let mut found: Vec<News> = self
            .news
            .iter()
            .filter(|e| e.value().title.contains(part) || e.value().text.contains(part))
            .map(|e| e.value().clone())
            .collect();
        found.sort_by_key(|n| n.id);
        Ok(found)
    }

    async fn save(&self, mut news: News) -> Result<News, StorageError> {
        if news.title.is_empty() {
            return Err(StorageError::invalid_entity("news title must not be empty"));
        }
        if !news.is_persisted() {
            news.id = self.next_news_id();
        }
        self.news.insert(news.id, news.clone());
        tracing::debug!(id = news.id, "news saved");
        Ok(news)
    }

    async fn delete(&self, id: EntityId) -> Result<(), StorageError> {
        if self.news.remove(&id).is_none() {
            return Err(StorageError::not_found("News", id));
        }
        // Comments cannot outlive their article.
        self.comments.retain(|_, comment| comment.news_id != id);
        tracing::debug!(id, "news deleted");
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Comment>, StorageError> {
        Ok(self.comments.get(&id).map(|e| e.value().clone()))
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<Comment>, StorageError> {
        Ok(Self::page_of(self.sorted_comments(), request))
    }

    async fn find_all_by_part_text(&self, part: &str) -> Result<Vec<Comment>, StorageError> {
        let mut found: Vec<Comment> = self
            .comments
            .iter()
            .filter(|e| e.value().text.contains(part))
            .map(|e| e.value().clone())
            .collect();
        found.sort_by_key(|c| c.id);
        Ok(found)
    }

    async fn find_all_by_news_id(&self, news_id: EntityId) -> Result<Vec<Comment>, StorageError> {
        let mut found: Vec<Comment> = self
            .comments
            .iter()
            .filter(|e| e.value().news_id == news_id)
            .map(|e| e.value().clone())
            .collect();
        found.sort_by_key(|c| c.id);
        Ok(found)
    }

    async fn save(&self, mut comment: Comment) -> Result<Comment, StorageError> {
        if !self.news.contains_key(&comment.news_id) {
            return Err(StorageError::invalid_entity(format!(
                "comment references missing news article {}",
                comment.news_id
            )));
        }
        if !comment.is_persisted() {
            comment.id = self.next_comment_id();
        }
        self.comments.insert(comment.id, comment.clone());
        tracing::debug!(id = comment.id, news_id = comment.news_id, "comment saved");
        Ok(comment)
    }

    async fn delete(&self, id: EntityId) -> Result<(), StorageError> {
        if self.comments.remove(&id).is_none() {
            return Err(StorageError::not_found("Comment", id));
        }
        tracing::debug!(id, "comment deleted");
        Ok(())
    }
}
