//! Cache error types.
//!
//! A cache miss is never an error; lookups return `Option::None`. The
//! variants here cover the two genuine failure modes of the caching
//! layer. Errors from the data source are the decorators' concern and
//! pass through this crate untouched; in particular, a data-source error
//! is never cached as an absent value.

/// Errors that can occur in the caching layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// A request fingerprint was requested for an empty argument
    /// sequence. A key derived from no discriminating input would
    /// conflate unrelated calls, so the caller must fall through to the
    /// data source without caching instead.
    #[error("cannot derive a cache key from an empty argument sequence")]
    InvalidKeyInput,

    /// A stored composite value could not enumerate its members during
    /// an invalidation scan. This is a programming or configuration
    /// error, distinct from "nothing matched"; the offending entry is
    /// dropped conservatively and the error is surfaced.
    #[error("unsupported composite cache value shape: {message}")]
    UnsupportedCompositeShape {
        /// Description of the unexpected shape.
        message: String,
    },
}

impl CacheError {
    /// Creates a new `UnsupportedCompositeShape` error.
    #[must_use]
    pub fn unsupported_shape(message: impl Into<String>) -> Self {
        Self::UnsupportedCompositeShape {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an invalid key input error.
    #[must_use]
    pub fn is_invalid_key_input(&self) -> bool {
        matches!(self, Self::InvalidKeyInput)
    }

    /// Returns `true` if this is an unsupported shape error.
    #[must_use]
    pub fn is_unsupported_shape(&self) -> bool {
        matches!(self, Self::UnsupportedCompositeShape { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CacheError::InvalidKeyInput.to_string(),
            "cannot derive a cache key from an empty argument sequence"
        );
        let err = CacheError::unsupported_shape("scalar value");
        assert_eq!(
            err.to_string(),
            "unsupported composite cache value shape: scalar value"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(CacheError::InvalidKeyInput.is_invalid_key_input());
        assert!(!CacheError::InvalidKeyInput.is_unsupported_shape());
        assert!(CacheError::unsupported_shape("x").is_unsupported_shape());
    }
}
