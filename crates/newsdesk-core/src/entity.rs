//! Entity types for the newsdesk domain.
//!
//! `News` and `Comment` form a bound 1-to-N relation: one news item owns
//! many comments, and each comment references exactly one news item by id.
//! Mutating either side requires invalidating cached state of the other,
//! which is the job of the `newsdesk-cache` crate.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Identifier type for all newsdesk entities.
///
/// Ids are assigned sequentially by the storage backend.
pub type EntityId = i64;

/// Marker id for an entity that has not been persisted yet.
///
/// The storage backend replaces it with a generated id on save.
pub const UNASSIGNED_ID: EntityId = 0;

/// Capability trait for types that carry a stable entity id.
///
/// Every cacheable entity implements this so that composite cache
/// invalidation can test membership by id at compile time, without any
/// runtime reflection or downcasting.
pub trait HasId {
    /// Returns the entity's id.
    fn id(&self) -> EntityId;
}

/// A news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    /// The entity id; [`UNASSIGNED_ID`] until persisted.
    pub id: EntityId,
    /// When the article was created.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Article title.
    pub title: String,
    /// Article body.
    pub text: String,
    /// Name of the article author.
    pub author_name: String,
}

impl News {
    /// Creates a new, not-yet-persisted news article timestamped now.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        text: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            id: UNASSIGNED_ID,
            time: OffsetDateTime::now_utc(),
            title: title.into(),
            text: text.into(),
            author_name: author_name.into(),
        }
    }

    /// Returns a copy of this article with the given id.
    #[must_use]
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    /// Returns `true` if the article has been persisted.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }
}

impl HasId for News {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// A comment attached to a news article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// The entity id; [`UNASSIGNED_ID`] until persisted.
    pub id: EntityId,
    /// When the comment was written.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
    /// Comment body.
    pub text: String,
    /// Name of the commenting user.
    pub user_name: String,
    /// Id of the news article this comment belongs to.
    pub news_id: EntityId,
}

impl Comment {
    /// Creates a new, not-yet-persisted comment timestamped now.
    #[must_use]
    pub fn new(text: impl Into<String>, user_name: impl Into<String>, news_id: EntityId) -> Self {
        Self {
            id: UNASSIGNED_ID,
            time: OffsetDateTime::now_utc(),
            text: text.into(),
            user_name: user_name.into(),
            news_id,
        }
    }

    /// Returns a copy of this comment with the given id.
    #[must_use]
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    /// Returns `true` if the comment has been persisted.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id != UNASSIGNED_ID
    }
}

impl HasId for Comment {
    fn id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entities_are_unassigned() {
        let news = News::new("Title", "Body", "alice");
        assert_eq!(news.id, UNASSIGNED_ID);
        assert!(!news.is_persisted());

        let comment = Comment::new("Nice read", "bob", 7);
        assert_eq!(comment.id, UNASSIGNED_ID);
        assert_eq!(comment.news_id, 7);
        assert!(!comment.is_persisted());
    }

    #[test]
    fn test_with_id_marks_persisted() {
        let news = News::new("Title", "Body", "alice").with_id(42);
        assert_eq!(HasId::id(&news), 42);
        assert!(news.is_persisted());
    }

    #[test]
    fn test_entity_serde_round_trip() {
        let comment = Comment::new("text", "carol", 3).with_id(11);
        let json = serde_json::to_string(&comment).expect("serialize");
        let back: Comment = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, comment);
    }
}
