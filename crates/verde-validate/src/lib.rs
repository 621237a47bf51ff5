//! # verde-validate — Cross-Entity Validators
//!
//! Reusable validators for the denormalized receipt/certificate documents
//! of the verde stack. Record-type schemas compose these from their own
//! structural checks; everything here is a pure function over the input
//! plus a caller-owned [`ValidationContext`].
//!
//! ## Validator Families
//!
//! - [`context`] — the issue accumulator threaded through every check:
//!   `Issue { code, message, path }`, with paths encoding array indices at
//!   every nesting level.
//! - [`reference`] — membership of an identifier in a source-of-truth
//!   [`ReferenceSet`], per-item variants for repeated nested objects, and
//!   reverse must-be-referenced checks.
//! - [`reconcile`] — computed aggregates vs stated summary values:
//!   epsilon-tolerant float totals, exact counts, and flag/activity
//!   coupling.
//! - [`attribute`] — synchronization of the flat display attribute list
//!   with structured data, including date equivalence and one-attribute-
//!   per-item sections.
//!
//! ## Crate Policy
//!
//! - Validators never throw and never short-circuit: a single pass reports
//!   the complete set of findings for a document.
//! - No I/O, no shared mutable state; a pass owns its context and its
//!   derived reference sets, so independent documents validate safely in
//!   parallel.

pub mod attribute;
pub mod context;
pub mod reconcile;
pub mod reference;

// Re-export primary types for ergonomic imports.
pub use attribute::{
    check_attribute_value, check_attributes_for_items, check_date_attribute, AttributeIndex,
};
pub use context::{Issue, Path, PathSegment, ValidationContext, ISSUE_CODE_CUSTOM};
pub use reconcile::{
    check_count_matches, check_flag_matches_activity, check_total_matches, DEFAULT_EPSILON,
};
pub use reference::{
    check_each_reference, check_reference_exists, check_referenced_with_activity, ReferenceSet,
};
