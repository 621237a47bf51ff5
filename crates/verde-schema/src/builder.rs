//! # Attribute Schema Builder — Composed List Validators
//!
//! A record type declares the shape of its flat attribute list once, as
//! explicit configuration: required shapes, optional shapes, an open-ended
//! dynamic category, and an ordering mode. [`AttributeSchema::build`]
//! composes that declaration into one validator for the whole list.
//!
//! Every shape declares its trait name explicitly in its construction
//! parameters — dispatch is a table keyed by `trait_type`, never runtime
//! introspection of shape titles.
//!
//! ## Rules Enforced by a Built Schema
//!
//! - `trait_type` unique within the list.
//! - Minimum length = number of required shapes; maximum = required +
//!   optional, lifted when a dynamic category is declared.
//! - Every element matches a declared shape (value kind and display type);
//!   unknown trait names fall to the dynamic category or are rejected.
//! - Every required trait name appears in the list (whole-array check,
//!   after the per-element pass).
//! - `Fixed` ordering pins every declared shape to its exact position.

use verde_core::attribute::{Attribute, AttributeValue, DisplayType};
use verde_validate::{Path, ValidationContext};

/// The JSON value kind a shape accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A string value.
    Text,
    /// A numeric value.
    Number,
    /// A boolean value.
    Bool,
}

impl ValueKind {
    /// Returns true if the value is of this kind.
    pub fn matches(&self, value: &AttributeValue) -> bool {
        matches!(
            (self, value),
            (Self::Text, AttributeValue::Text(_))
                | (Self::Number, AttributeValue::Number(_))
                | (Self::Bool, AttributeValue::Bool(_))
        )
    }

    /// Human-readable kind name for findings and descriptions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Number => "number",
            Self::Bool => "boolean",
        }
    }
}

/// The declared shape of one attribute entry.
#[derive(Debug, Clone)]
pub struct AttributeShape {
    /// The trait name this shape accepts. Declared explicitly; there is no
    /// fallback derivation from titles.
    pub trait_type: String,
    /// The value kind the entry must carry.
    pub value_kind: ValueKind,
    /// The rendering hint the entry must carry, if any.
    pub display_type: Option<DisplayType>,
}

impl AttributeShape {
    /// A string-valued shape.
    pub fn text(trait_type: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value_kind: ValueKind::Text,
            display_type: None,
        }
    }

    /// A number-valued shape.
    pub fn number(trait_type: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value_kind: ValueKind::Number,
            display_type: None,
        }
    }

    /// A boolean-valued shape.
    pub fn boolean(trait_type: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value_kind: ValueKind::Bool,
            display_type: None,
        }
    }

    /// An epoch-millisecond date shape (number value, date rendering).
    pub fn date(trait_type: impl Into<String>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value_kind: ValueKind::Number,
            display_type: Some(DisplayType::Date),
        }
    }

    /// Require a rendering hint on the entry.
    pub fn with_display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = Some(display_type);
        self
    }
}

/// The open-ended attribute category: one entry per externally supplied
/// item (e.g. per credit symbol), with trait names unknown at
/// schema-construction time.
#[derive(Debug, Clone)]
pub struct DynamicAttributes {
    /// The value kind every dynamic entry must carry.
    pub value_kind: ValueKind,
    /// What one dynamic entry corresponds to, for the composed
    /// description (e.g. `"credit symbol"`).
    pub per_item: String,
}

/// Whether list position is part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOrdering {
    /// Exact positional tuple: element `i` must match declared shape `i`.
    Fixed,
    /// Order-insensitive; elements are matched by trait name.
    Flexible,
}

/// Schema-construction-time declaration of an attribute list.
#[derive(Debug, Clone)]
pub struct AttributeSchemaSpec {
    /// Shapes that must appear.
    pub required: Vec<AttributeShape>,
    /// Shapes that may appear.
    pub optional: Vec<AttributeShape>,
    /// Open-ended per-item category, if the record type has one.
    pub dynamic: Option<DynamicAttributes>,
    /// Positional or by-name matching.
    pub ordering: AttributeOrdering,
}

/// A composed validator for one record type's attribute list.
#[derive(Debug)]
pub struct AttributeSchema {
    shapes: Vec<AttributeShape>,
    /// Dispatch table: trait name -> position in `shapes`. First
    /// declaration wins if a name is declared twice.
    by_trait: std::collections::BTreeMap<String, usize>,
    required_count: usize,
    dynamic: Option<DynamicAttributes>,
    ordering: AttributeOrdering,
    min_len: usize,
    max_len: Option<usize>,
    description: String,
}

impl AttributeSchema {
    /// Compose a declaration into one list validator.
    ///
    /// A declaration with no shapes and no dynamic category yields an
    /// always-failing acceptor: every checked list gets one structural
    /// finding. This should never occur in practice, but a schema that
    /// accepts nothing is safer than one that accepts anything.
    pub fn build(spec: AttributeSchemaSpec) -> Self {
        let AttributeSchemaSpec {
            required,
            optional,
            dynamic,
            ordering,
        } = spec;

        let required_count = required.len();
        let mut shapes = required;
        shapes.extend(optional);

        let (min_len, max_len) = match ordering {
            // Positional tuple: length pinned to the declared count, with a
            // dynamic tail lifting the maximum.
            AttributeOrdering::Fixed => (
                shapes.len(),
                if dynamic.is_some() { None } else { Some(shapes.len()) },
            ),
            AttributeOrdering::Flexible => (
                required_count,
                if dynamic.is_some() { None } else { Some(shapes.len()) },
            ),
        };

        let description = compose_description(&shapes, required_count, dynamic.as_ref());

        let mut by_trait = std::collections::BTreeMap::new();
        for (position, shape) in shapes.iter().enumerate() {
            by_trait.entry(shape.trait_type.clone()).or_insert(position);
        }

        Self {
            shapes,
            by_trait,
            required_count,
            dynamic,
            ordering,
            min_len,
            max_len,
            description,
        }
    }

    /// Minimum accepted list length.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Maximum accepted list length; `None` when a dynamic category lifts
    /// the cap.
    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// The composed human-readable description of the accepted layout.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Validate a flat attribute list, appending findings at paths under
    /// `base`.
    pub fn check(&self, ctx: &mut ValidationContext, attributes: &[Attribute], base: &Path) {
        if self.shapes.is_empty() && self.dynamic.is_none() {
            ctx.report(
                "attribute schema declares no shapes; the list cannot validate",
                base.clone(),
            );
            return;
        }

        self.check_cardinality(ctx, attributes, base);
        self.check_uniqueness(ctx, attributes, base);

        match self.ordering {
            AttributeOrdering::Fixed => self.check_positional(ctx, attributes, base),
            AttributeOrdering::Flexible => self.check_by_name(ctx, attributes, base),
        }

        self.check_required_present(ctx, attributes, base);
    }

    fn check_cardinality(
        &self,
        ctx: &mut ValidationContext,
        attributes: &[Attribute],
        base: &Path,
    ) {
        if attributes.len() < self.min_len {
            ctx.report(
                format!(
                    "attribute list has {} entries, expected at least {}",
                    attributes.len(),
                    self.min_len
                ),
                base.clone(),
            );
        }
        if let Some(max_len) = self.max_len {
            if attributes.len() > max_len {
                ctx.report(
                    format!(
                        "attribute list has {} entries, expected at most {}",
                        attributes.len(),
                        max_len
                    ),
                    base.clone(),
                );
            }
        }
    }

    fn check_uniqueness(
        &self,
        ctx: &mut ValidationContext,
        attributes: &[Attribute],
        base: &Path,
    ) {
        let mut seen = std::collections::BTreeSet::new();
        for (index, attribute) in attributes.iter().enumerate() {
            if !seen.insert(attribute.trait_type.as_str()) {
                ctx.report(
                    format!("duplicate trait_type {:?}", attribute.trait_type),
                    base.push_index(index).push_key("trait_type"),
                );
            }
        }
    }

    /// Fixed ordering: declared shapes occupy their exact positions; any
    /// tail beyond the declared count is checked against the dynamic
    /// category.
    fn check_positional(
        &self,
        ctx: &mut ValidationContext,
        attributes: &[Attribute],
        base: &Path,
    ) {
        for (index, attribute) in attributes.iter().enumerate() {
            match self.shapes.get(index) {
                Some(shape) => {
                    if attribute.trait_type != shape.trait_type {
                        ctx.report(
                            format!(
                                "expected attribute {:?} at position {index}, found {:?}",
                                shape.trait_type, attribute.trait_type
                            ),
                            base.push_index(index).push_key("trait_type"),
                        );
                    } else {
                        self.check_against_shape(ctx, attribute, shape, index, base);
                    }
                }
                // Past the declared tuple; length findings come from the
                // cardinality check, kind findings from the dynamic category.
                None => self.check_dynamic(ctx, attribute, index, base),
            }
        }
    }

    /// Flexible ordering: elements are matched by trait name through the
    /// dispatch table; unknown names fall to the dynamic category.
    fn check_by_name(&self, ctx: &mut ValidationContext, attributes: &[Attribute], base: &Path) {
        for (index, attribute) in attributes.iter().enumerate() {
            match self.by_trait.get(attribute.trait_type.as_str()) {
                Some(position) => {
                    self.check_against_shape(ctx, attribute, &self.shapes[*position], index, base)
                }
                None => self.check_dynamic(ctx, attribute, index, base),
            }
        }
    }

    fn check_against_shape(
        &self,
        ctx: &mut ValidationContext,
        attribute: &Attribute,
        shape: &AttributeShape,
        index: usize,
        base: &Path,
    ) {
        if !shape.value_kind.matches(&attribute.value) {
            ctx.report(
                format!(
                    "{:?} must carry a {} value, found {}",
                    shape.trait_type,
                    shape.value_kind.as_str(),
                    attribute.value
                ),
                base.push_index(index).push_key("value"),
            );
        }
        if attribute.display_type != shape.display_type {
            ctx.report(
                format!(
                    "{:?} declares display_type {:?}, found {:?}",
                    shape.trait_type, shape.display_type, attribute.display_type
                ),
                base.push_index(index).push_key("display_type"),
            );
        }
    }

    fn check_dynamic(
        &self,
        ctx: &mut ValidationContext,
        attribute: &Attribute,
        index: usize,
        base: &Path,
    ) {
        match &self.dynamic {
            Some(dynamic) => {
                if !dynamic.value_kind.matches(&attribute.value) {
                    ctx.report(
                        format!(
                            "dynamic attribute {:?} must carry a {} value, found {}",
                            attribute.trait_type,
                            dynamic.value_kind.as_str(),
                            attribute.value
                        ),
                        base.push_index(index).push_key("value"),
                    );
                }
            }
            None => {
                ctx.report(
                    format!("unknown trait_type {:?}", attribute.trait_type),
                    base.push_index(index).push_key("trait_type"),
                );
            }
        }
    }

    fn check_required_present(
        &self,
        ctx: &mut ValidationContext,
        attributes: &[Attribute],
        base: &Path,
    ) {
        for shape in &self.shapes[..self.required_count] {
            if !attributes
                .iter()
                .any(|attribute| attribute.trait_type == shape.trait_type)
            {
                ctx.report(
                    format!("required attribute {:?} is missing", shape.trait_type),
                    base.clone(),
                );
            }
        }
    }
}

fn compose_description(
    shapes: &[AttributeShape],
    required_count: usize,
    dynamic: Option<&DynamicAttributes>,
) -> String {
    let mut parts: Vec<String> = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let role = if i < required_count { "required" } else { "optional" };
            format!("{} ({role} {})", shape.trait_type, shape.value_kind.as_str())
        })
        .collect();
    if let Some(dynamic) = dynamic {
        parts.push(format!(
            "one {} attribute per {}",
            dynamic.value_kind.as_str(),
            dynamic.per_item
        ));
    }
    if parts.is_empty() {
        "no attributes declared".to_string()
    } else {
        format!("Attributes: {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verde_core::attribute::Attribute;

    fn base() -> Path {
        Path::root().push_key("attributes")
    }

    fn flexible_spec() -> AttributeSchemaSpec {
        AttributeSchemaSpec {
            required: vec![
                AttributeShape::text("Methodology"),
                AttributeShape::number("Total Credits"),
                AttributeShape::text("Origin Country"),
                AttributeShape::boolean("Audited"),
            ],
            optional: vec![
                AttributeShape::date("Retirement Date"),
                AttributeShape::text("Registry"),
                AttributeShape::number("Vintage"),
            ],
            dynamic: None,
            ordering: AttributeOrdering::Flexible,
        }
    }

    fn full_list() -> Vec<Attribute> {
        vec![
            Attribute::new("Methodology", "Composting"),
            Attribute::new("Total Credits", 5.0),
            Attribute::new("Origin Country", "BR"),
            Attribute::new("Audited", true),
        ]
    }

    #[test]
    fn test_cardinality_window() {
        let schema = AttributeSchema::build(flexible_spec());
        assert_eq!(schema.min_len(), 4);
        assert_eq!(schema.max_len(), Some(7));

        // 4 elements with all required names: accepted.
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &full_list(), &base());
        assert!(ctx.is_valid(), "{ctx}");

        // 7 elements: accepted.
        let mut attrs = full_list();
        attrs.push(Attribute::new("Retirement Date", 0.0).with_display_type(DisplayType::Date));
        attrs.push(Attribute::new("Registry", "vcs"));
        attrs.push(Attribute::new("Vintage", 2024.0));
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &attrs, &base());
        assert!(ctx.is_valid(), "{ctx}");

        // 8 elements: rejected (and the stray trait is unknown).
        attrs.push(Attribute::new("Extra", 1.0));
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &attrs, &base());
        assert!(ctx
            .issues()
            .iter()
            .any(|issue| issue.message.contains("at most 7")));
    }

    #[test]
    fn test_too_short_list() {
        let schema = AttributeSchema::build(flexible_spec());
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &full_list()[..2], &base());
        assert!(ctx
            .issues()
            .iter()
            .any(|issue| issue.message.contains("at least 4")));
        // The two absent required names are also reported.
        assert!(ctx
            .issues()
            .iter()
            .any(|issue| issue.message == "required attribute \"Origin Country\" is missing"));
    }

    #[test]
    fn test_duplicate_trait_type() {
        let schema = AttributeSchema::build(flexible_spec());
        let mut attrs = full_list();
        attrs.push(Attribute::new("Methodology", "Landfill"));
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &attrs, &base());
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.issues()[0].path.to_string(), "attributes[4].trait_type");
        assert!(ctx.issues()[0].message.contains("duplicate"));
    }

    #[test]
    fn test_value_kind_mismatch() {
        let schema = AttributeSchema::build(flexible_spec());
        let mut attrs = full_list();
        attrs[1] = Attribute::new("Total Credits", "5");
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &attrs, &base());
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.issues()[0].path.to_string(), "attributes[1].value");
        assert!(ctx.issues()[0].message.contains("number"));
    }

    #[test]
    fn test_display_type_required_by_shape() {
        let schema = AttributeSchema::build(flexible_spec());
        let mut attrs = full_list();
        // Date shape without the date rendering hint.
        attrs.push(Attribute::new("Retirement Date", 1_709_251_200_000.0_f64));
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &attrs, &base());
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.issues()[0].path.to_string(), "attributes[4].display_type");
    }

    #[test]
    fn test_dynamic_category_lifts_maximum() {
        let mut spec = flexible_spec();
        spec.dynamic = Some(DynamicAttributes {
            value_kind: ValueKind::Number,
            per_item: "credit symbol".to_string(),
        });
        let schema = AttributeSchema::build(spec);
        assert_eq!(schema.max_len(), None);

        let mut attrs = full_list();
        for symbol in ["C-CARB", "C-BIO", "C-SOIL", "C-BLUE", "C-FOREST"] {
            attrs.push(Attribute::new(format!("{symbol} Credits"), 1.0));
        }
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &attrs, &base());
        assert!(ctx.is_valid(), "{ctx}");

        // Dynamic entries still carry the declared value kind.
        attrs.push(Attribute::new("C-WASTE Credits", "one"));
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &attrs, &base());
        assert_eq!(ctx.len(), 1);
        assert!(ctx.issues()[0].message.contains("dynamic attribute"));
    }

    #[test]
    fn test_unknown_trait_rejected_without_dynamic() {
        let schema = AttributeSchema::build(flexible_spec());
        let mut attrs = full_list();
        attrs.push(Attribute::new("Stray", 1.0));
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &attrs, &base());
        assert_eq!(ctx.len(), 1);
        assert!(ctx.issues()[0].message.contains("unknown trait_type"));
    }

    #[test]
    fn test_fixed_ordering_pins_positions() {
        let spec = AttributeSchemaSpec {
            required: vec![
                AttributeShape::text("Methodology"),
                AttributeShape::number("Total Credits"),
            ],
            optional: vec![],
            dynamic: None,
            ordering: AttributeOrdering::Fixed,
        };
        let schema = AttributeSchema::build(spec);
        assert_eq!(schema.min_len(), 2);
        assert_eq!(schema.max_len(), Some(2));

        let ordered = vec![
            Attribute::new("Methodology", "Composting"),
            Attribute::new("Total Credits", 5.0),
        ];
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &ordered, &base());
        assert!(ctx.is_valid(), "{ctx}");

        let swapped = vec![
            Attribute::new("Total Credits", 5.0),
            Attribute::new("Methodology", "Composting"),
        ];
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &swapped, &base());
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.issues()[0].path.to_string(), "attributes[0].trait_type");
        assert!(ctx.issues()[0].message.contains("position 0"));
    }

    #[test]
    fn test_empty_spec_is_always_failing() {
        let schema = AttributeSchema::build(AttributeSchemaSpec {
            required: vec![],
            optional: vec![],
            dynamic: None,
            ordering: AttributeOrdering::Flexible,
        });
        let mut ctx = ValidationContext::new();
        schema.check(&mut ctx, &[], &base());
        assert_eq!(ctx.len(), 1);
        assert!(ctx.issues()[0].message.contains("declares no shapes"));
    }

    #[test]
    fn test_composed_description() {
        let mut spec = flexible_spec();
        spec.dynamic = Some(DynamicAttributes {
            value_kind: ValueKind::Number,
            per_item: "credit symbol".to_string(),
        });
        let schema = AttributeSchema::build(spec);
        let description = schema.description();
        assert!(description.starts_with("Attributes: "));
        assert!(description.contains("Methodology (required string)"));
        assert!(description.contains("Vintage (optional number)"));
        assert!(description.contains("one number attribute per credit symbol"));
    }
}
