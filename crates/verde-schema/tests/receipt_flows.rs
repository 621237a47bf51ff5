//! # Receipt Flow Tests
//!
//! Whole-document scenarios for the cross-entity pass: well-formed
//! receipts validate clean, and each class of authoring bug is caught
//! with an exact path — including the credit/collection swap that leaves
//! every grand total intact.

use verde_core::content_hash;
use verde_schema::receipt::{validate_receipt, ReceiptDocument};

fn parse(doc: serde_json::Value) -> ReceiptDocument {
    serde_json::from_value(doc).expect("receipt should deserialize")
}

/// A two-credit, two-collection purchase receipt with every optional
/// summary section populated and a synchronized attribute list.
fn full_receipt() -> serde_json::Value {
    serde_json::json!({
        "credits": [
            {"slug": "c1", "symbol": "C-CARB"},
            {"slug": "c2", "symbol": "C-BIO"}
        ],
        "collections": [
            {"slug": "col1", "name": "Organic North"},
            {"slug": "col2", "name": "Organic South"}
        ],
        "certificates": [
            {
                "credit_slug": "c1",
                "credit_symbol": "C-CARB",
                "collections": [
                    {"slug": "col1", "purchased_amount": 3.0, "retired_amount": 1.0}
                ]
            },
            {
                "credit_slug": "c2",
                "credit_symbol": "C-BIO",
                "collections": [
                    {"slug": "col2", "purchased_amount": 2.0, "retired_amount": 0.0}
                ]
            }
        ],
        "summary": {
            "total_credits": 5.0,
            "total_retired": 1.0,
            "certificate_count": 2,
            "has_retirement": true,
            "retirement_date": "2024-03-01",
            "per_collection": [
                {"slug": "col1", "total": 4.0},
                {"slug": "col2", "total": 2.0}
            ],
            "per_credit": [
                {"slug": "c1", "total": 4.0},
                {"slug": "c2", "total": 2.0}
            ]
        },
        "attributes": [
            {"trait_type": "Total Credits", "value": 5.0},
            {"trait_type": "Retirement Date", "value": 1709251200000i64, "display_type": "date"},
            {"trait_type": "C-CARB Credits", "value": 4.0},
            {"trait_type": "C-BIO Credits", "value": 2.0}
        ]
    })
}

#[test]
fn full_receipt_validates_clean() {
    let ctx = validate_receipt(&parse(full_receipt()));
    assert!(ctx.is_valid(), "unexpected issues:\n{ctx}");
}

#[test]
fn minimal_receipt_validates_clean() {
    let ctx = validate_receipt(&parse(serde_json::json!({
        "credits": [{"slug": "c1", "symbol": "C-CARB"}],
        "certificates": [{
            "credit_slug": "c1",
            "collections": [{"slug": "col1", "purchased_amount": 5, "retired_amount": 0}]
        }],
        "summary": {"total_credits": 5}
    })));
    assert!(ctx.is_valid(), "unexpected issues:\n{ctx}");
}

#[test]
fn overstated_grand_total_is_exactly_one_issue() {
    let mut doc = full_receipt();
    doc["summary"]["total_credits"] = serde_json::json!(6.0);
    // Keep the attribute in sync with the (wrong) summary so only the
    // reconciliation against the breakdown fires.
    doc["attributes"][0]["value"] = serde_json::json!(6.0);
    let ctx = validate_receipt(&parse(doc));
    assert_eq!(ctx.len(), 1, "{ctx}");
    assert_eq!(ctx.issues()[0].path.to_string(), "summary.total_credits");
    assert_eq!(ctx.issues()[0].code, "custom");
}

#[test]
fn swapped_credits_are_caught_despite_matching_grand_totals() {
    // The authoring bug the dual-path aggregation exists for: both
    // certificates reference the right collections, the grand totals and
    // per-collection rollups all match, but the credits are swapped.
    let mut doc = full_receipt();
    doc["certificates"][0]["credit_slug"] = serde_json::json!("c2");
    doc["certificates"][0]["credit_symbol"] = serde_json::json!("C-BIO");
    doc["certificates"][1]["credit_slug"] = serde_json::json!("c1");
    doc["certificates"][1]["credit_symbol"] = serde_json::json!("C-CARB");

    let ctx = validate_receipt(&parse(doc));
    assert!(!ctx.is_valid());

    let paths: Vec<String> = ctx
        .issues()
        .iter()
        .map(|issue| issue.path.to_string())
        .collect();
    // Per-credit rollups diverge in both rows...
    assert!(paths.contains(&"summary.per_credit[0].total".to_string()), "{ctx}");
    assert!(paths.contains(&"summary.per_credit[1].total".to_string()), "{ctx}");
    // ...and the per-credit display attributes follow.
    assert!(paths.iter().any(|p| p.starts_with("attributes[")), "{ctx}");
    // The per-collection path stays consistent.
    assert!(!paths.iter().any(|p| p.starts_with("summary.per_collection")), "{ctx}");
}

#[test]
fn dangling_collection_reference_has_indexed_path() {
    let mut doc = full_receipt();
    doc["certificates"][1]["collections"][0]["slug"] = serde_json::json!("ghost");
    let ctx = validate_receipt(&parse(doc));
    let paths: Vec<String> = ctx
        .issues()
        .iter()
        .map(|issue| issue.path.to_string())
        .collect();
    assert!(
        paths.contains(&"certificates[1].collections[0].slug".to_string()),
        "{ctx}"
    );
    // col2 is now unused, which the reverse check reports as well.
    assert!(paths.contains(&"collections[1].slug".to_string()), "{ctx}");
}

#[test]
fn one_pass_reports_every_problem() {
    let mut doc = full_receipt();
    doc["summary"]["certificate_count"] = serde_json::json!(3);
    doc["summary"]["retirement_date"] = serde_json::json!("not-a-date");
    doc["attributes"][3]["value"] = serde_json::json!(9.0);
    let ctx = validate_receipt(&parse(doc));
    assert_eq!(ctx.len(), 3, "{ctx}");

    let paths: Vec<String> = ctx
        .issues()
        .iter()
        .map(|issue| issue.path.to_string())
        .collect();
    assert!(paths.contains(&"summary.certificate_count".to_string()));
    assert!(paths.contains(&"attributes".to_string())); // invalid date
    assert!(paths.contains(&"attributes[3]".to_string())); // C-BIO mismatch
}

#[test]
fn missing_dynamic_attribute_is_reported() {
    let mut doc = full_receipt();
    doc["attributes"]
        .as_array_mut()
        .unwrap()
        .retain(|attr| attr["trait_type"] != "C-BIO Credits");
    let ctx = validate_receipt(&parse(doc));
    assert_eq!(ctx.len(), 1, "{ctx}");
    assert!(ctx.issues()[0].message.contains("C-BIO Credits"));
}

#[test]
fn retirement_date_attribute_must_be_absent_without_event() {
    let mut doc = full_receipt();
    // No retirement at all: zero retired amounts, no date, flag off.
    doc["certificates"][0]["collections"][0]["retired_amount"] = serde_json::json!(0.0);
    doc["summary"]["total_retired"] = serde_json::json!(0.0);
    doc["summary"]["has_retirement"] = serde_json::json!(false);
    doc["summary"].as_object_mut().unwrap().remove("retirement_date");
    doc["summary"]["per_collection"][0]["total"] = serde_json::json!(3.0);
    doc["summary"]["per_credit"][0]["total"] = serde_json::json!(3.0);
    doc["attributes"][2]["value"] = serde_json::json!(3.0);

    // The stale date attribute is the only problem left.
    let ctx = validate_receipt(&parse(doc));
    assert_eq!(ctx.len(), 1, "{ctx}");
    assert_eq!(ctx.issues()[0].path.to_string(), "attributes[1]");
    assert!(ctx.issues()[0].message.contains("should not be present"));
}

#[test]
fn document_round_trips_and_hashes_stably() {
    let doc = parse(full_receipt());
    let hash_a = content_hash(&doc).unwrap();

    // Serialize, reparse, rehash: identical.
    let text = serde_json::to_string(&doc).unwrap();
    let reparsed: ReceiptDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(hash_a, content_hash(&reparsed).unwrap());

    // Any edit moves the hash.
    let mut edited = doc;
    edited.summary.total_credits = 6.0;
    assert_ne!(hash_a, content_hash(&edited).unwrap());
}
