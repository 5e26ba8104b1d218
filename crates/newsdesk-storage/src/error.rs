//! Storage error types for the newsdesk data-access layer.

use std::fmt;

use newsdesk_core::EntityId;

/// Errors that can occur during storage operations.
///
/// A missing entity on a read is not an error; reads return
/// `Ok(None)` for absent ids. `NotFound` is reserved for operations
/// that require the entity to exist, such as delete.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An operation targeted an entity that does not exist.
    #[error("entity not found: {kind}/{id}")]
    NotFound {
        /// The entity kind, e.g. "News" or "Comment".
        kind: &'static str,
        /// The id that was not found.
        id: EntityId,
    },

    /// The entity data is invalid for the attempted operation.
    #[error("invalid entity: {message}")]
    InvalidEntity {
        /// Description of why the entity is invalid.
        message: String,
    },

    /// An internal storage error occurred.
    #[error("internal storage error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(kind: &'static str, id: EntityId) -> Self {
        Self::NotFound { kind, id }
    }

    /// Creates a new `InvalidEntity` error.
    #[must_use]
    pub fn invalid_entity(message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the error category for logging purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidEntity { .. } => ErrorCategory::Validation,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of storage errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Entity not found.
    NotFound,
    /// Validation error.
    Validation,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Validation => write!(f, "validation"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::not_found("News", 123);
        assert_eq!(err.to_string(), "entity not found: News/123");

        let err = StorageError::invalid_entity("missing title");
        assert_eq!(err.to_string(), "invalid entity: missing title");
    }

    #[test]
    fn test_error_predicates_and_category() {
        let err = StorageError::not_found("Comment", 5);
        assert!(err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err = StorageError::internal("map poisoned");
        assert!(!err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}
