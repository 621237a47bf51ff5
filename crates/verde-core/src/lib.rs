//! # verde-core — Foundational Types for the Verde Stack
//!
//! This crate is the bedrock of the verde stack. It defines the primitives
//! every other crate builds on: canonical serialization, content digests,
//! event-date parsing, and the attribute domain types. Every other crate in
//! the workspace depends on `verde-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL content-hash computation flows
//!    through `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for
//!    digests. Ever. Two deep-equal documents always hash identically.
//!
//! 2. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every digest path flows through canonicalization.
//!
//! 3. **Strict attribute values.** `AttributeValue` equality never coerces
//!    between string, number, and boolean.
//!
//! 4. **Hard failures are loud.** A value with no canonical JSON
//!    representation aborts hashing with a descriptive error; nothing is
//!    coerced to `null` on the way to a content hash.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `verde-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize` where they cross the wire.

pub mod attribute;
pub mod canonical;
pub mod digest;
pub mod error;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use attribute::{Attribute, AttributeValue, DisplayType};
pub use canonical::CanonicalBytes;
pub use digest::{
    content_hash, hash_canonical_text, sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm,
};
pub use error::{CanonicalizationError, TemporalError, VerdeError};
pub use temporal::parse_epoch_millis;
