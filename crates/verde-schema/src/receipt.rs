//! # Receipt Documents — Model and Composite Validation
//!
//! Typed model of the purchase/retirement receipt documents and the
//! cross-entity pass that record-type schemas run over them.
//!
//! A receipt is denormalized on purpose: the marketplace-facing layers
//! read flat lists, so the same quantity appears in per-certificate
//! breakdown rows, per-collection and per-credit rollups, grand totals,
//! and the display attribute list. Authoring tools get this wrong in ways
//! single-field validation cannot see, which is why the pass below
//! aggregates from the most granular rows upward through two independent
//! paths — by collection slug and by credit slug — before comparing
//! anything against the stated summary. A certificate that references the
//! right collection but the wrong credit is caught even when both grand
//! totals happen to match.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use verde_core::attribute::{Attribute, AttributeValue};
use verde_validate::{
    check_attribute_value, check_attributes_for_items, check_count_matches, check_date_attribute,
    check_each_reference, check_flag_matches_activity, check_reference_exists,
    check_referenced_with_activity, check_total_matches, AttributeIndex, Path, ReferenceSet,
    ValidationContext, DEFAULT_EPSILON,
};

use crate::builder::{
    AttributeOrdering, AttributeSchema, AttributeSchemaSpec, AttributeShape, DynamicAttributes,
    ValueKind,
};

/// Trait name of the grand-total attribute.
pub const TOTAL_CREDITS_TRAIT: &str = "Total Credits";

/// Trait name of the retirement-date attribute.
pub const RETIREMENT_DATE_TRAIT: &str = "Retirement Date";

/// Tolerance for attribute totals, which pass through display layers that
/// round more coarsely than the structured data.
pub const ATTRIBUTE_EPSILON: f64 = 1e-6;

/// Trait name of the per-credit dynamic attribute for one symbol.
pub fn credit_trait(symbol: &str) -> String {
    format!("{symbol} Credits")
}

/// A tradable credit line: the source of truth for slugs and symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credit {
    /// URL-safe identifier referenced by certificates.
    pub slug: String,
    /// Display ticker referenced by attributes (e.g. `"C-CARB"`).
    pub symbol: String,
}

/// A declared collection of underlying assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// URL-safe identifier referenced by certificate breakdown rows.
    pub slug: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The most granular row: one certificate's activity against one
/// collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionBreakdown {
    /// The collection this row draws from.
    pub slug: String,
    /// Credits purchased from the collection.
    pub purchased_amount: f64,
    /// Credits retired against the collection.
    pub retired_amount: f64,
}

/// One purchase/retirement certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// The credit line this certificate draws from.
    pub credit_slug: String,
    /// Optional restatement of the credit's ticker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_symbol: Option<String>,
    /// Per-collection breakdown of the certificate's amounts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<CollectionBreakdown>,
}

/// A stated per-collection rollup in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionTotal {
    /// The collection the rollup is for.
    pub slug: String,
    /// Stated purchased + retired activity.
    pub total: f64,
}

/// A stated per-credit rollup in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditTotal {
    /// The credit the rollup is for.
    pub slug: String,
    /// Stated purchased + retired activity.
    pub total: f64,
}

/// The stated summary of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Grand total of purchased credits.
    pub total_credits: f64,
    /// Grand total of retired credits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_retired: Option<f64>,
    /// Number of certificates in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_count: Option<usize>,
    /// Whether any retirement event happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_retirement: Option<bool>,
    /// Date of the retirement event (calendar date or RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retirement_date: Option<String>,
    /// Stated per-collection rollups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_collection: Option<Vec<CollectionTotal>>,
    /// Stated per-credit rollups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_credit: Option<Vec<CreditTotal>>,
}

/// A full receipt document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDocument {
    /// Source-of-truth credit lines.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credits: Vec<Credit>,
    /// Declared collections; when absent, breakdown slugs are not checked
    /// against a declaration and no reverse-usage check runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<Collection>>,
    /// The certificates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certificates: Vec<Certificate>,
    /// The stated summary.
    pub summary: Summary,
    /// Flat display attribute list; checked for synchronization when
    /// present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<Attribute>>,
}

/// Aggregates computed from the most granular rows through two
/// independent paths.
#[derive(Debug, Default)]
struct Rollup {
    /// purchased + retired activity per collection slug.
    by_collection: BTreeMap<String, f64>,
    /// purchased + retired activity per credit slug.
    by_credit: BTreeMap<String, f64>,
    /// Grand total of purchased credits.
    purchased: f64,
    /// Grand total of retired credits.
    retired: f64,
}

fn aggregate(certificates: &[Certificate]) -> Rollup {
    let mut rollup = Rollup::default();
    for certificate in certificates {
        for row in &certificate.collections {
            let activity = row.purchased_amount + row.retired_amount;
            *rollup.by_collection.entry(row.slug.clone()).or_insert(0.0) += activity;
            *rollup
                .by_credit
                .entry(certificate.credit_slug.clone())
                .or_insert(0.0) += activity;
            rollup.purchased += row.purchased_amount;
            rollup.retired += row.retired_amount;
        }
    }
    rollup
}

/// The attribute schema of a receipt: the grand total is required, the
/// retirement date is optional, and one numeric attribute per credit
/// symbol is expected beyond that.
pub fn receipt_attribute_schema() -> AttributeSchema {
    AttributeSchema::build(AttributeSchemaSpec {
        required: vec![AttributeShape::number(TOTAL_CREDITS_TRAIT)],
        optional: vec![AttributeShape::date(RETIREMENT_DATE_TRAIT)],
        dynamic: Some(DynamicAttributes {
            value_kind: ValueKind::Number,
            per_item: "credit symbol".to_string(),
        }),
        ordering: AttributeOrdering::Flexible,
    })
}

/// Validate a receipt with the default reconciliation tolerance.
pub fn validate_receipt(doc: &ReceiptDocument) -> ValidationContext {
    validate_receipt_with(doc, DEFAULT_EPSILON)
}

/// Validate a receipt, reconciling float totals within `epsilon`.
///
/// Runs every check to completion and returns the full set of findings;
/// a valid document returns an empty context.
pub fn validate_receipt_with(doc: &ReceiptDocument, epsilon: f64) -> ValidationContext {
    let mut ctx = ValidationContext::new();

    let credit_slugs: ReferenceSet = doc.credits.iter().map(|c| c.slug.as_str()).collect();
    let credit_symbols: ReferenceSet = doc.credits.iter().map(|c| c.symbol.as_str()).collect();
    let collection_slugs: Option<ReferenceSet> = doc
        .collections
        .as_ref()
        .map(|cols| cols.iter().map(|c| c.slug.as_str()).collect());

    let rollup = aggregate(&doc.certificates);

    check_certificate_references(
        &mut ctx,
        doc,
        &credit_slugs,
        &credit_symbols,
        collection_slugs.as_ref(),
    );
    check_summary(&mut ctx, doc, &rollup, epsilon);
    check_declared_entities_used(&mut ctx, doc, &rollup);
    check_attributes(&mut ctx, doc, &rollup);

    ctx
}

fn check_certificate_references(
    ctx: &mut ValidationContext,
    doc: &ReceiptDocument,
    credit_slugs: &ReferenceSet,
    credit_symbols: &ReferenceSet,
    collection_slugs: Option<&ReferenceSet>,
) {
    for (index, certificate) in doc.certificates.iter().enumerate() {
        let cert_path = Path::root().push_key("certificates").push_index(index);

        check_reference_exists(
            ctx,
            &certificate.credit_slug,
            credit_slugs,
            cert_path.push_key("credit_slug"),
            format!(
                "credit slug {:?} is not declared in credits",
                certificate.credit_slug
            ),
        );

        if let Some(symbol) = &certificate.credit_symbol {
            check_reference_exists(
                ctx,
                symbol,
                credit_symbols,
                cert_path.push_key("credit_symbol"),
                format!("credit symbol {symbol:?} is not declared in credits"),
            );
        }

        if let Some(collection_slugs) = collection_slugs {
            check_each_reference(
                ctx,
                &certificate.collections,
                collection_slugs,
                &cert_path.push_key("collections"),
                "slug",
                |row| row.slug.as_str(),
                |value| format!("collection slug {value:?} is not declared in collections"),
            );
        }
    }
}

fn check_summary(ctx: &mut ValidationContext, doc: &ReceiptDocument, rollup: &Rollup, epsilon: f64) {
    let summary_path = Path::root().push_key("summary");

    check_total_matches(
        ctx,
        rollup.purchased,
        doc.summary.total_credits,
        epsilon,
        summary_path.push_key("total_credits"),
        "total_credits does not match the certificate breakdown",
    );

    if let Some(total_retired) = doc.summary.total_retired {
        check_total_matches(
            ctx,
            rollup.retired,
            total_retired,
            epsilon,
            summary_path.push_key("total_retired"),
            "total_retired does not match the certificate breakdown",
        );
    }

    if let Some(expected) = doc.summary.certificate_count {
        check_count_matches(
            ctx,
            doc.certificates.len(),
            expected,
            summary_path.push_key("certificate_count"),
            "certificate_count does not match the certificates list",
        );
    }

    if let Some(per_collection) = &doc.summary.per_collection {
        let base = summary_path.push_key("per_collection");
        for (index, stated) in per_collection.iter().enumerate() {
            match rollup.by_collection.get(&stated.slug) {
                None => ctx.report(
                    format!(
                        "per-collection rollup names {:?}, which no certificate draws from",
                        stated.slug
                    ),
                    base.push_index(index).push_key("slug"),
                ),
                Some(computed) => check_total_matches(
                    ctx,
                    *computed,
                    stated.total,
                    epsilon,
                    base.push_index(index).push_key("total"),
                    "per-collection total does not match the certificate breakdown",
                ),
            }
        }
    }

    if let Some(per_credit) = &doc.summary.per_credit {
        let base = summary_path.push_key("per_credit");
        for (index, stated) in per_credit.iter().enumerate() {
            match rollup.by_credit.get(&stated.slug) {
                None => ctx.report(
                    format!(
                        "per-credit rollup names {:?}, which no certificate draws from",
                        stated.slug
                    ),
                    base.push_index(index).push_key("slug"),
                ),
                Some(computed) => check_total_matches(
                    ctx,
                    *computed,
                    stated.total,
                    epsilon,
                    base.push_index(index).push_key("total"),
                    "per-credit total does not match the certificate breakdown",
                ),
            }
        }
    }

    if let Some(has_retirement) = doc.summary.has_retirement {
        check_flag_matches_activity(
            ctx,
            has_retirement,
            rollup.retired,
            summary_path.push_key("has_retirement"),
            "has_retirement is set but no credits were retired",
            "credits were retired but has_retirement is not set",
        );
    }
}

/// Reverse direction: every declared entity must be drawn on by at least
/// one certificate with non-zero activity.
fn check_declared_entities_used(ctx: &mut ValidationContext, doc: &ReceiptDocument, rollup: &Rollup) {
    if let Some(collections) = &doc.collections {
        for (index, collection) in collections.iter().enumerate() {
            check_referenced_with_activity(
                ctx,
                &collection.slug,
                &rollup.by_collection,
                Path::root()
                    .push_key("collections")
                    .push_index(index)
                    .push_key("slug"),
                format!(
                    "collection {:?} is not used by any certificate",
                    collection.slug
                ),
            );
        }
    }

    for (index, credit) in doc.credits.iter().enumerate() {
        check_referenced_with_activity(
            ctx,
            &credit.slug,
            &rollup.by_credit,
            Path::root().push_key("credits").push_index(index).push_key("slug"),
            format!("credit {:?} is not used by any certificate", credit.slug),
        );
    }
}

fn check_attributes(ctx: &mut ValidationContext, doc: &ReceiptDocument, rollup: &Rollup) {
    let Some(attributes) = &doc.attributes else {
        return;
    };
    let base = Path::root().push_key("attributes");

    receipt_attribute_schema().check(ctx, attributes, &base);

    let index = AttributeIndex::new(attributes);

    // The grand-total attribute mirrors the stated summary, not the
    // recomputed aggregate; summary-vs-aggregate drift is already reported
    // by the reconciliation pass. The attribute passes through display
    // layers that round, so it gets the coarser tolerance.
    match index.get(TOTAL_CREDITS_TRAIT) {
        None => ctx.report("Total Credits attribute is missing", base.clone()),
        Some((position, attribute)) => {
            // A non-numeric value is already reported by the schema's
            // value-kind check.
            if let Some(stated) = attribute.value.as_number() {
                check_total_matches(
                    ctx,
                    stated,
                    doc.summary.total_credits,
                    ATTRIBUTE_EPSILON,
                    base.push_index(position),
                    "Total Credits attribute does not match summary.total_credits",
                );
            }
        }
    }

    // Present iff the summary states a retirement date, and equal to it as
    // an epoch-millisecond value.
    match &doc.summary.retirement_date {
        Some(date) => check_date_attribute(
            ctx,
            &index,
            &base,
            RETIREMENT_DATE_TRAIT,
            date,
            "Retirement Date attribute is missing",
            "Retirement Date attribute does not match summary.retirement_date",
        ),
        None => check_attribute_value(ctx, &index, &base, RETIREMENT_DATE_TRAIT, None, "", ""),
    }

    // One numeric attribute per credit symbol, equal to the credit's
    // aggregated activity.
    let per_credit: Vec<(&Credit, f64)> = doc
        .credits
        .iter()
        .map(|credit| {
            (
                credit,
                rollup.by_credit.get(&credit.slug).copied().unwrap_or(0.0),
            )
        })
        .collect();
    check_attributes_for_items(
        ctx,
        &index,
        &base,
        &per_credit,
        |(credit, _)| credit_trait(&credit.symbol),
        |(_, total)| AttributeValue::Number(*total),
        |_, trait_type| format!("{trait_type} attribute is missing"),
        |_, trait_type| format!("{trait_type} attribute does not match the credit's activity"),
    );
}
