//! # Attribute Primitives — Flat Display Metadata
//!
//! Receipt documents carry a flat, display-oriented attribute list next to
//! their structured data. Each entry is a `{ trait_type, value,
//! display_type?, max_value? }` object; the list is what NFT marketplaces
//! render, and it must stay synchronized with the structured fields it
//! mirrors.
//!
//! Equality between attribute values is strict per variant: a numeric `5`
//! never equals the string `"5"`. Implicit coercion here would let a
//! display layer show a value the structured data does not actually
//! contain.

use serde::{Deserialize, Serialize};

/// The value of one attribute entry.
///
/// Untagged on the wire: a JSON string, number, or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A display string.
    Text(String),
    /// A numeric value (integer or fractional).
    Number(f64),
    /// A boolean flag.
    Bool(bool),
}

impl AttributeValue {
    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text value, if this is a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a flag.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Rendering hint for numeric and date attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    /// Plain number.
    Number,
    /// Number rendered as a boost stat.
    BoostNumber,
    /// Percentage rendered as a boost stat.
    BoostPercentage,
    /// Epoch-millisecond value rendered as a date.
    Date,
}

/// One entry in a flat attribute list.
///
/// `trait_type` must be unique within a list; uniqueness is enforced by the
/// attribute schema, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The display label identifying this entry.
    pub trait_type: String,
    /// The displayed value.
    pub value: AttributeValue,
    /// Optional rendering hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
    /// Optional upper bound for gauge-style rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

impl Attribute {
    /// Create an attribute with no rendering hints.
    pub fn new(trait_type: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
            display_type: None,
            max_value: None,
        }
    }

    /// Attach a rendering hint.
    pub fn with_display_type(mut self, display_type: DisplayType) -> Self {
        self.display_type = Some(display_type);
        self
    }

    /// Attach an upper bound.
    pub fn with_max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }
}
