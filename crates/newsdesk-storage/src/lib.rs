//! # newsdesk-storage
//!
//! Storage abstraction layer for the newsdesk service.
//!
//! This crate defines the repository traits and error types that all
//! storage backends implement. It contains no implementations; those live
//! in separate crates such as `newsdesk-db-memory`.
//!
//! ## Overview
//!
//! The main traits are [`NewsRepository`] and [`CommentRepository`], which
//! define the contract for:
//! - identity reads (`find_by_id`)
//! - query reads (`find_all`, `find_all_by_part_text`, `find_all_by_news_id`)
//! - writes (`save`, `delete`)
//!
//! The caching layer in `newsdesk-cache` wraps both traits with
//! read-through decorators composed at construction time.

mod error;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::{CommentRepository, NewsRepository};

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shared news repository trait object.
pub type DynNews = std::sync::Arc<dyn NewsRepository>;

/// Type alias for a shared comment repository trait object.
pub type DynComments = std::sync::Arc<dyn CommentRepository>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use newsdesk_storage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ErrorCategory, StorageError};
    pub use crate::traits::{CommentRepository, NewsRepository};
    pub use crate::{DynComments, DynNews, StorageResult};
}
