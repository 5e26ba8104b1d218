//! # newsdesk-config
//!
//! Configuration for the newsdesk caching layer.
//!
//! Configuration is loaded from a TOML file with a `[cache]` section:
//!
//! ```toml
//! [cache]
//! enabled = true
//! algorithm = "lfu"
//! size = 50
//! ```
//!
//! Every field has a default, so an empty file (or a missing section)
//! yields a working configuration. Invalid values never fail startup:
//! unknown algorithm names fall back to LRU and non-positive sizes fall
//! back to the default capacity, both resolved downstream by the cache
//! factory.

mod error;

pub use error::ConfigError;

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default cache capacity in entries.
pub const DEFAULT_CACHE_SIZE: i64 = 10;

/// Default eviction algorithm name.
pub const DEFAULT_CACHE_ALGORITHM: &str = "lru";

/// Top-level newsdesk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsdeskConfig {
    /// Caching layer settings.
    pub cache: CacheConfig,
}

impl NewsdeskConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Settings for the caching layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether the caching decorators are active at all. When `false`
    /// every repository call delegates straight to the data source.
    pub enabled: bool,
    /// Eviction algorithm name; recognized values are "lru" and "lfu".
    /// Anything else resolves to LRU.
    pub algorithm: String,
    /// Capacity bound per entity cache, in entries. Non-positive values
    /// resolve to [`DEFAULT_CACHE_SIZE`].
    pub size: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            algorithm: DEFAULT_CACHE_ALGORITHM.to_string(),
            size: DEFAULT_CACHE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = NewsdeskConfig::default();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.algorithm, "lru");
        assert_eq!(config.cache.size, DEFAULT_CACHE_SIZE);
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: NewsdeskConfig = toml::from_str("").expect("parse");
        assert_eq!(config, NewsdeskConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: NewsdeskConfig = toml::from_str("[cache]\nalgorithm = \"lfu\"\n")
            .expect("parse");
        assert_eq!(config.cache.algorithm, "lfu");
        assert!(config.cache.enabled);
        assert_eq!(config.cache.size, DEFAULT_CACHE_SIZE);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            "[cache]\nenabled = false\nalgorithm = \"lfu\"\nsize = 128\n"
        )
        .expect("write");

        let config = NewsdeskConfig::from_file(file.path()).expect("load");
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.algorithm, "lfu");
        assert_eq!(config.cache.size, 128);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = NewsdeskConfig::from_file("/nonexistent/newsdesk.toml")
            .expect_err("must fail");
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[cache\nbroken").expect("write");
        let err = NewsdeskConfig::from_file(file.path()).expect_err("must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
