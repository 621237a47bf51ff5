//! # Attribute Synchronization — Flat List vs Structured Data
//!
//! The flat attribute list duplicates values that also live in the
//! structured part of a document (totals, dates, one entry per credit or
//! collection). These validators check the two representations agree:
//! an attribute must be present exactly when its structured counterpart
//! is, and its value must equal the expected value strictly — a numeric
//! `5` never satisfies an expected `"5"`.
//!
//! All checks collect into the shared context and never throw, so one pass
//! surfaces every desynchronized attribute at once.

use std::collections::BTreeMap;

use verde_core::attribute::{Attribute, AttributeValue};
use verde_core::temporal::parse_epoch_millis;

use crate::context::{Path, ValidationContext};

/// Lookup of a flat attribute list by trait name, retaining each
/// attribute's position for path reporting.
///
/// Built once per validation pass. On duplicate trait names the first
/// occurrence wins here; duplicates themselves are reported by the
/// attribute schema's uniqueness check, not by this index.
#[derive(Debug)]
pub struct AttributeIndex<'a> {
    by_trait: BTreeMap<&'a str, (usize, &'a Attribute)>,
}

impl<'a> AttributeIndex<'a> {
    /// Index a flat attribute list.
    pub fn new(attributes: &'a [Attribute]) -> Self {
        let mut by_trait = BTreeMap::new();
        for (index, attribute) in attributes.iter().enumerate() {
            by_trait
                .entry(attribute.trait_type.as_str())
                .or_insert((index, attribute));
        }
        Self { by_trait }
    }

    /// Look up an attribute and its list position by trait name.
    pub fn get(&self, trait_type: &str) -> Option<(usize, &'a Attribute)> {
        self.by_trait.get(trait_type).copied()
    }

    /// Number of distinct trait names.
    pub fn len(&self) -> usize {
        self.by_trait.len()
    }

    /// Returns true if the indexed list was empty.
    pub fn is_empty(&self) -> bool {
        self.by_trait.is_empty()
    }
}

/// Check one attribute against its structured counterpart.
///
/// - `expected` is `None`: the attribute must be absent; if present, one
///   issue is appended at the attribute's own position.
/// - `expected` is `Some`: the attribute must be present
///   (`missing_message` at `base` otherwise) and strictly equal to the
///   expected value (`mismatch_message` at the attribute's position
///   otherwise). No coercion between number, string, and boolean.
pub fn check_attribute_value(
    ctx: &mut ValidationContext,
    index: &AttributeIndex<'_>,
    base: &Path,
    trait_type: &str,
    expected: Option<&AttributeValue>,
    missing_message: &str,
    mismatch_message: &str,
) {
    match (expected, index.get(trait_type)) {
        (None, Some((position, _))) => {
            ctx.report(
                format!("{trait_type} attribute should not be present"),
                base.push_index(position),
            );
        }
        (None, None) => {}
        (Some(_), None) => {
            ctx.report(missing_message, base.clone());
        }
        (Some(expected), Some((position, attribute))) => {
            if &attribute.value != expected {
                ctx.report(mismatch_message, base.push_index(position));
            }
        }
    }
}

/// Check a date attribute against a structured date string.
///
/// The structured side holds a calendar date or RFC 3339 datetime; the
/// attribute side holds the same instant as an epoch-millisecond number.
/// An unparsable structured date is its own finding (reported at `base`
/// with the parser diagnostic), distinct from missing/mismatch.
pub fn check_date_attribute(
    ctx: &mut ValidationContext,
    index: &AttributeIndex<'_>,
    base: &Path,
    trait_type: &str,
    date: &str,
    missing_message: &str,
    mismatch_message: &str,
) {
    match parse_epoch_millis(date) {
        Err(e) => {
            ctx.report(format!("{trait_type}: {e}"), base.clone());
        }
        Ok(millis) => {
            let expected = AttributeValue::Number(millis as f64);
            check_attribute_value(
                ctx,
                index,
                base,
                trait_type,
                Some(&expected),
                missing_message,
                mismatch_message,
            );
        }
    }
}

/// Check one dynamic attribute per domain item.
///
/// `trait_of` and `value_of` derive each item's expected trait name and
/// value; `missing_message_of` / `mismatch_message_of` render the finding
/// for one item. Used for the "one attribute per collection/credit"
/// sections of a receipt.
pub fn check_attributes_for_items<T>(
    ctx: &mut ValidationContext,
    index: &AttributeIndex<'_>,
    base: &Path,
    items: &[T],
    trait_of: impl Fn(&T) -> String,
    value_of: impl Fn(&T) -> AttributeValue,
    missing_message_of: impl Fn(&T, &str) -> String,
    mismatch_message_of: impl Fn(&T, &str) -> String,
) {
    for item in items {
        let trait_type = trait_of(item);
        let expected = value_of(item);
        let missing = missing_message_of(item, &trait_type);
        let mismatch = mismatch_message_of(item, &trait_type);
        check_attribute_value(
            ctx,
            index,
            base,
            &trait_type,
            Some(&expected),
            &missing,
            &mismatch,
        );
    }
}
