//! Eviction policy selection.

use std::fmt;

/// The closed set of supported eviction policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EvictionPolicy {
    /// Evict the least-recently-used entry.
    #[default]
    Lru,
    /// Evict the least-frequently-used entry, ties broken by recency.
    Lfu,
}

impl EvictionPolicy {
    /// Parses a policy from a configuration string.
    ///
    /// Matching is case-insensitive. Unknown or empty names resolve to
    /// [`EvictionPolicy::Lru`] so that configuration-driven construction
    /// is total and never fails.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "lfu" => Self::Lfu,
            "lru" => Self::Lru,
            other => {
                if !other.is_empty() {
                    tracing::warn!(policy = other, "unknown eviction policy, defaulting to lru");
                }
                Self::Lru
            }
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => write!(f, "lru"),
            Self::Lfu => write!(f, "lfu"),
        }
    }
}
