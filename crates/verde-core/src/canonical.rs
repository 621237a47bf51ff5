//! # Canonical Serialization — RFC 8785 Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! used in content-hash computation across the verde stack.
//!
//! ## Integrity Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct one is through [`CanonicalBytes::new()`] (or the
//! [`CanonicalBytes::from_value()`] convenience for already-decoded
//! documents), which serializes through the JCS pipeline: sorted object
//! keys, compact separators, shortest round-trip number form.
//!
//! Any function that computes a digest must accept `&CanonicalBytes`, so a
//! "wrong serialization path" cannot produce a content hash.
//!
//! ## Number Handling
//!
//! Receipt documents carry fractional credit amounts, so finite floats are
//! legal canonical input. RFC 8785 serializes them in ECMAScript shortest
//! round-trip form (`5.0` emits as `5`, `50.5` as `50.5`), which guarantees
//! that re-parsing reproduces the original value and that equal values
//! always serialize identically.
//!
//! `NaN` and `±Infinity` have no JSON representation and are rejected with
//! [`CanonicalizationError::NotSerializable`] — never silently coerced to
//! `null`. A malformed hash input is worse than a halted pipeline, so there
//! is no partial-output fallback of any kind.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Canonical UTF-8 text produced exclusively by RFC 8785 serialization.
///
/// # Invariants
///
/// - The only constructors are [`CanonicalBytes::new()`] and
///   [`CanonicalBytes::from_value()`].
/// - Object keys are sorted; array element order is preserved (array order
///   is part of document identity).
/// - Numbers are in shortest round-trip form; non-finite numbers never
///   reach the inner buffer.
///
/// These invariants are enforced by the constructors and cannot be violated
/// by downstream code because the inner `String` is private.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    /// Construct canonical text from any serializable value.
    ///
    /// This is the ONLY way to produce hash input. All content-hash
    /// computation in the stack must flow through this constructor.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::NotSerializable`] if the value has
    /// no canonical JSON representation (non-finite float, map with
    /// non-string keys, or any serializer failure).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let text = serde_jcs::to_string(obj)
            .map_err(|e| CanonicalizationError::NotSerializable(e.to_string()))?;
        Ok(Self(text))
    }

    /// Construct canonical text from a decoded JSON document.
    ///
    /// Identical pipeline to [`CanonicalBytes::new()`]; exists so call sites
    /// holding a `serde_json::Value` read as canonicalization of a document
    /// rather than of an arbitrary Rust value.
    pub fn from_value(value: &Value) -> Result<Self, CanonicalizationError> {
        Self::new(value)
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Access the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the canonical text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}
