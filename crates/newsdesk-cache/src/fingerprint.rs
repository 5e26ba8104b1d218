//! Request fingerprints for memoizing non-identity queries.
//!
//! A fingerprint is a cache key derived from the ordered argument
//! sequence of a query call (full scans, filtered or paginated reads),
//! letting repeated calls with equal arguments share one composite
//! cache slot.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use newsdesk_core::PageRequest;

use crate::error::CacheError;

/// A single call argument contributing to a fingerprint.
///
/// The closed set of variants keeps hashing deterministic across
/// argument types; the enum discriminant is hashed along with the value,
/// so `Int(1)` and `UInt(1)` fingerprint differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FingerprintArg {
    /// A string argument, e.g. a search term.
    Str(String),
    /// A signed integer argument, e.g. an entity id.
    Int(i64),
    /// An unsigned integer argument, e.g. a page index or size.
    UInt(u64),
    /// A boolean flag argument.
    Bool(bool),
}

impl From<&str> for FingerprintArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FingerprintArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FingerprintArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for FingerprintArg {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for FingerprintArg {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<bool> for FingerprintArg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A stable cache key derived from a call's ordered argument sequence.
///
/// Equal argument sequences always produce equal fingerprints. The
/// converse does not hold: the fingerprint is a 64-bit hash with no
/// collision handling, so two structurally different argument sequences
/// that happen to hash identically will silently share a cache slot.
/// This mirrors the behavior of the system this cache replaces and is a
/// known, accepted weakness rather than an oversight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestFingerprint(u64);

impl RequestFingerprint {
    /// Derives a fingerprint from a non-empty argument sequence.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidKeyInput`] if `args` is empty; a key
    /// with no discriminating input would wrongly conflate unrelated
    /// calls, so the caller should skip caching instead.
    pub fn of(args: &[FingerprintArg]) -> Result<Self, CacheError> {
        if args.is_empty() {
            return Err(CacheError::InvalidKeyInput);
        }
        let mut hasher = DefaultHasher::new();
        for arg in args {
            arg.hash(&mut hasher);
        }
        Ok(Self(hasher.finish()))
    }

    /// Derives a fingerprint for a pagination request.
    pub fn of_page(request: PageRequest) -> Result<Self, CacheError> {
        Self::of(&[request.page.into(), request.size.into()])
    }

    /// Returns the raw hash value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_args_fingerprint_identically() {
        let first = RequestFingerprint::of(&["a".into(), 5i64.into()]).expect("fingerprint");
        let second = RequestFingerprint::of(&["a".into(), 5i64.into()]).expect("fingerprint");
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_args_are_rejected() {
        let err = RequestFingerprint::of(&[]).expect_err("empty input must fail");
        assert!(err.is_invalid_key_input());
    }

    #[test]
    fn test_order_matters() {
        let forward = RequestFingerprint::of(&["a".into(), "b".into()]).expect("fingerprint");
        let reversed = RequestFingerprint::of(&["b".into(), "a".into()]).expect("fingerprint");
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_variant_is_part_of_the_key() {
        let signed = RequestFingerprint::of(&[FingerprintArg::Int(1)]).expect("fingerprint");
        let unsigned = RequestFingerprint::of(&[FingerprintArg::UInt(1)]).expect("fingerprint");
        assert_ne!(signed, unsigned);
    }

    #[test]
    fn test_page_request_fingerprint() {
        let first = RequestFingerprint::of_page(PageRequest::new(0, 20)).expect("fingerprint");
        let same = RequestFingerprint::of_page(PageRequest::new(0, 20)).expect("fingerprint");
        let other = RequestFingerprint::of_page(PageRequest::new(1, 20)).expect("fingerprint");
        assert_eq!(first, same);
        assert_ne!(first, other);
    }
}
