//! # Error Types — Structured Error Hierarchy
//!
//! Hard-failure error types for the verde stack. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.
//!
//! Validation findings are deliberately NOT errors: validators accumulate
//! structured issues in a validation context and run to completion, so a
//! single pass reports every problem in a document. The types here cover
//! the two operations that must abort instead — canonicalization of a
//! value with no JSON representation, and event-date parsing.

use thiserror::Error;

/// Top-level error type for the verde stack.
#[derive(Error, Debug)]
pub enum VerdeError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Event-date parsing failed.
    #[error("temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during canonical serialization.
///
/// A value that cannot be canonicalized aborts the entire hash computation;
/// there is no partial-canonicalization fallback.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// The value has no canonical JSON representation (non-finite number,
    /// map with non-string keys, or any serializer failure).
    #[error("value is not serializable to canonical JSON: {0}")]
    NotSerializable(String),
}

/// Error during event-date parsing.
#[derive(Error, Debug)]
pub enum TemporalError {
    /// The input is neither a calendar date nor an RFC 3339 datetime.
    #[error("{input:?} is not a valid calendar date or RFC 3339 datetime: {reason}")]
    InvalidDate {
        /// The offending input string.
        input: String,
        /// Parser diagnostic.
        reason: String,
    },
}
