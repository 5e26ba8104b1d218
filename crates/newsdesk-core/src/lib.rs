//! # newsdesk-core
//!
//! Core domain types for the newsdesk service.
//!
//! This crate defines the two related entity kinds (`News` and `Comment`),
//! the [`HasId`] capability trait that every cacheable entity implements,
//! and the pagination types shared by the storage and cache layers.
//!
//! It deliberately has no dependencies on storage or caching concerns so
//! that every other crate in the workspace can depend on it.

mod entity;
mod page;

pub use entity::{Comment, EntityId, HasId, News, UNASSIGNED_ID};
pub use page::{Page, PageRequest};
