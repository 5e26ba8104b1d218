//! # newsdesk-db-memory
//!
//! In-memory storage backend for the newsdesk service.
//!
//! [`InMemoryStore`] implements both repository traits over concurrent
//! maps. It is the authoritative data source for tests and single-process
//! deployments; the caching layer treats it exactly like any other
//! backend.

mod store;

pub use store::InMemoryStore;
