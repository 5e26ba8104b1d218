//! # newsdesk-cache
//!
//! Capacity-bounded eviction caches and the invalidation layer that
//! keeps cached entities, cached query results, and cross-referencing
//! cached entities consistent when the underlying data changes.
//!
//! ## Architecture
//!
//! - [`EvictionCache`] with [`LruCache`] and [`LfuCache`] policies,
//!   built by [`CacheFactory`] from configuration values.
//! - [`BoundEntityCacheManager`]: one coherent facade over the two
//!   bound entity kinds (news and comments), cascading removals across
//!   the relation.
//! - [`CompositeStore`] + [`CompositeCacheInvalidator`]: query results
//!   (lists and pages) cached under a [`RequestFingerprint`] and purged
//!   by member id whenever an entity mutates.
//! - [`intercept`]: decorators wrapping the repository traits,
//!   composing the pieces above around every data-access call.
//!
//! ## Consistency protocol
//!
//! Reads fill caches lazily; saves delegate first and then refresh;
//! deletes resolve bound ids up front, delegate, and then cascade
//! removal and composite purges across both entity kinds. All cache
//! operations are in-memory and bounded-time; the cache never calls the
//! data source itself.

mod composite;
mod error;
mod eviction;
mod factory;
mod fingerprint;
pub mod intercept;
mod invalidator;
mod manager;
mod policy;

pub use composite::{CompositeStore, CompositeValue};
pub use error::CacheError;
pub use eviction::{DEFAULT_CAPACITY, EvictionCache, LfuCache, LruCache};
pub use factory::CacheFactory;
pub use fingerprint::{FingerprintArg, RequestFingerprint};
pub use invalidator::CompositeCacheInvalidator;
pub use manager::BoundEntityCacheManager;
pub use policy::EvictionPolicy;

/// Type alias for a cache result.
pub type CacheResult<T> = Result<T, CacheError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use newsdesk_cache::prelude::*;
/// ```
pub mod prelude {
    pub use crate::composite::{CompositeStore, CompositeValue};
    pub use crate::error::CacheError;
    pub use crate::eviction::{DEFAULT_CAPACITY, EvictionCache, LfuCache, LruCache};
    pub use crate::factory::CacheFactory;
    pub use crate::fingerprint::{FingerprintArg, RequestFingerprint};
    pub use crate::intercept::{
        CachedCommentRepository, CachedNewsRepository, ServiceCaches, SharedCaches,
    };
    pub use crate::invalidator::CompositeCacheInvalidator;
    pub use crate::manager::BoundEntityCacheManager;
    pub use crate::policy::EvictionPolicy;
    pub use crate::CacheResult;
}
