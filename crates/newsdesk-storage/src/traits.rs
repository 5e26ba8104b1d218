//! Repository traits for the newsdesk data-access layer.
//!
//! These traits define the contract between the service and its data
//! source. Implementations must be thread-safe (`Send + Sync`). The
//! caching layer in `newsdesk-cache` wraps these same traits with
//! read-through decorators, so callers see one interface whether or not
//! caching is enabled.

use async_trait::async_trait;

use newsdesk_core::{Comment, EntityId, News, Page, PageRequest};

use crate::error::StorageError;

/// Data access for news articles.
///
/// # Example
///
/// ```ignore
/// use newsdesk_storage::{NewsRepository, StorageError};
///
/// async fn get_news(repo: &dyn NewsRepository, id: i64) -> Result<News, StorageError> {
///     repo.find_by_id(id)
///         .await?
///         .ok_or(StorageError::not_found("News", id))
/// }
/// ```
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Finds a news article by id.
    ///
    /// Returns `None` if the article does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// articles.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<News>, StorageError>;

    /// Returns one page of all news articles, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues.
    async fn find_all(&self, request: PageRequest) -> Result<Page<News>, StorageError>;

    /// Returns all news articles whose title or body contains `part`.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues.
    async fn find_all_by_part_text(&self, part: &str) -> Result<Vec<News>, StorageError>;

    /// Saves a news article, inserting or replacing by id.
    ///
    /// A not-yet-persisted article is assigned a generated id. The
    /// returned article is the authoritative stored state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidEntity` if the article is malformed.
    async fn save(&self, news: News) -> Result<News, StorageError>;

    /// Deletes a news article and all comments bound to it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the article does not exist.
    async fn delete(&self, id: EntityId) -> Result<(), StorageError>;
}

/// Data access for comments.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Finds a comment by id.
    ///
    /// Returns `None` if the comment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// comments.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Comment>, StorageError>;

    /// Returns one page of all comments, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues.
    async fn find_all(&self, request: PageRequest) -> Result<Page<Comment>, StorageError>;

    /// Returns all comments whose body contains `part`.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues.
    async fn find_all_by_part_text(&self, part: &str) -> Result<Vec<Comment>, StorageError>;

    /// Returns all comments bound to the given news article.
    ///
    /// # Errors
    ///
    /// Returns an error for infrastructure issues.
    async fn find_all_by_news_id(&self, news_id: EntityId) -> Result<Vec<Comment>, StorageError>;

    /// Saves a comment, inserting or replacing by id.
    ///
    /// A not-yet-persisted comment is assigned a generated id. The
    /// returned comment is the authoritative stored state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidEntity` if the comment is malformed,
    /// including when it references a news article that does not exist.
    async fn save(&self, comment: Comment) -> Result<Comment, StorageError>;

    /// Deletes a comment by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the comment does not exist.
    async fn delete(&self, id: EntityId) -> Result<(), StorageError>;
}
