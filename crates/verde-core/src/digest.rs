//! # Content Digest — Content-Addressed Identifiers
//!
//! Defines `ContentDigest` and the SHA-256 digest pipeline over canonical
//! bytes. Every receipt and certificate document is identified by the hash
//! of its canonical form.
//!
//! ## Integrity Invariant
//!
//! [`sha256_digest()`] accepts only `&CanonicalBytes`, not raw `&[u8]`.
//! This compile-time constraint prevents any code path from hashing
//! non-canonical bytes: two deep-equal documents always hash identically,
//! and any change to a leaf value, key set, or array ordering changes the
//! hash.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::CanonicalizationError;

/// The hash algorithm used to produce a content digest.
///
/// SHA-256 is the only supported algorithm; commitment structures still
/// carry an algorithm tag so stored hashes remain self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 — standard content addressing.
    Sha256,
}

impl DigestAlgorithm {
    /// Returns the algorithm identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content-addressed digest with its algorithm tag.
///
/// Produced exclusively from `CanonicalBytes` via [`sha256_digest()`]. The
/// 32-byte digest and algorithm tag together form a self-describing content
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    /// The hash algorithm that produced this digest.
    pub algorithm: DigestAlgorithm,
    /// The raw 32-byte digest value.
    pub bytes: [u8; 32],
}

impl ContentDigest {
    /// Create a content digest from raw bytes and algorithm.
    ///
    /// Prefer [`sha256_digest()`] for constructing digests from
    /// `CanonicalBytes`.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    /// Render the digest as a lowercase hex string (64 characters).
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// The function signature enforces that only `CanonicalBytes` (produced
/// through the RFC 8785 pipeline) can be hashed.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}

/// Compute a SHA-256 hex string from canonical bytes.
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    sha256_digest(data).to_hex()
}

/// Compute the content hash of any serializable value: canonicalize, then
/// SHA-256, rendered as 64 lowercase hex characters.
///
/// This is the `content_hash` entry point used by record producers.
///
/// # Errors
///
/// Returns [`CanonicalizationError::NotSerializable`] if the value has no
/// canonical JSON representation. There is no partial-hash fallback.
pub fn content_hash(obj: &impl Serialize) -> Result<String, CanonicalizationError> {
    let cb = CanonicalBytes::new(obj)?;
    Ok(sha256_hex(&cb))
}

/// Hash text a caller already holds in canonical form.
///
/// Avoids re-canonicalizing when the canonical text was produced earlier in
/// the same pipeline. The caller is responsible for the text actually being
/// canonical; hashing non-canonical text yields a hash no canonical
/// document will ever match.
pub fn hash_canonical_text(text: &str) -> String {
    let hash = Sha256::digest(text.as_bytes());
    hash.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1, "b": 2})).unwrap();
        let d1 = sha256_digest(&cb);
        let d2 = sha256_digest(&cb);
        assert_eq!(d1, d2);
        assert_eq!(d1.algorithm, DigestAlgorithm::Sha256);
    }

    #[test]
    fn test_hex_shape() {
        let cb = CanonicalBytes::new(&serde_json::json!({"key": "value"})).unwrap();
        let hex = sha256_hex(&cb);
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hex, hex.to_lowercase());
    }

    #[test]
    fn test_display_form() {
        let cb = CanonicalBytes::new(&serde_json::json!({"a": 1})).unwrap();
        let digest = sha256_digest(&cb);
        let s = format!("{digest}");
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), 7 + 64);
    }

    #[test]
    fn test_content_hash_ignores_key_order() {
        let a: serde_json::Value = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        let b: serde_json::Value = serde_json::from_str(r#"{"a":2,"b":1}"#).unwrap();
        assert_eq!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_content_hash_sensitive_to_leaf_change() {
        let a = serde_json::json!({"summary": {"total_credits": 5}});
        let b = serde_json::json!({"summary": {"total_credits": 6}});
        assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_content_hash_sensitive_to_array_order() {
        let a = serde_json::json!({"certificates": [1, 2]});
        let b = serde_json::json!({"certificates": [2, 1]});
        assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_content_hash_sensitive_to_added_key() {
        let a = serde_json::json!({"a": 1});
        let b = serde_json::json!({"a": 1, "b": null});
        assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());
    }

    #[test]
    fn test_known_vector_empty_object() {
        // SHA256("{}") — fixed vector.
        assert_eq!(
            content_hash(&serde_json::json!({})).unwrap(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_known_vector_sorted_pair() {
        // SHA256 of the canonical form {"a":2,"b":1}.
        let doc: serde_json::Value = serde_json::from_str(r#"{"b":1,"a":2}"#).unwrap();
        assert_eq!(
            content_hash(&doc).unwrap(),
            "d3626ac30a87e6f7a6428233b3c68299976865fa5508e4267c5415c76af7a772"
        );
    }

    #[test]
    fn test_hash_canonical_text_matches_full_pipeline() {
        let doc = serde_json::json!({"credits": 5});
        let cb = CanonicalBytes::new(&doc).unwrap();
        assert_eq!(hash_canonical_text(cb.as_str()), content_hash(&doc).unwrap());
        assert_eq!(
            hash_canonical_text(r#"{"credits":5}"#),
            "d8676c0e1349bdf29926a6e62ff94175f051daafd4b839a32b2c341a276c7bb3"
        );
    }

    #[test]
    fn test_content_hash_propagates_canonicalization_failure() {
        assert!(content_hash(&f64::NAN).is_err());
    }
}
