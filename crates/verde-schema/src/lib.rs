//! # verde-schema — Record-Type Schemas for the Verde Stack
//!
//! Composes the verde-validate primitives into the validators record
//! types actually run: the attribute schema builder, the receipt document
//! model with its cross-entity pass, and the hash manifest.
//!
//! ## Modules
//!
//! - [`builder`] — declares the shape of a record type's flat attribute
//!   list (required/optional/dynamic shapes, fixed or flexible ordering)
//!   and composes the declaration into one list validator.
//! - [`receipt`] — the typed receipt document model and
//!   [`receipt::validate_receipt`], which aggregates breakdown rows
//!   upward through independent per-collection and per-credit paths and
//!   reconciles every stated summary value and display attribute against
//!   the result.
//! - [`manifest`] — the content-hash manifest the publish tooling records
//!   per document set, with drift detection against a recomputed set.
//!
//! ## Crate Policy
//!
//! - Depends on `verde-core` and `verde-validate` internally; no I/O.
//! - Validation never throws: every finding lands in the caller-owned
//!   context. Hard failures exist only where canonicalization does.

pub mod builder;
pub mod manifest;
pub mod receipt;

pub use builder::{
    AttributeOrdering, AttributeSchema, AttributeSchemaSpec, AttributeShape, DynamicAttributes,
    ValueKind,
};
pub use manifest::{HashManifest, ManifestDrift, ManifestEntry, MANIFEST_VERSION};
pub use receipt::{validate_receipt, validate_receipt_with, ReceiptDocument};
