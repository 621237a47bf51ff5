//! # Validation Context — Issue Accumulation
//!
//! One `ValidationContext` per top-level validate call. Every validator in
//! this crate appends structured issues to the context and returns; nothing
//! throws. A single pass therefore reports the complete set of problems in
//! a document instead of stopping at the first, and a caller rejecting a
//! record can list every specific reason with its exact path.
//!
//! ## Single-Writer Discipline
//!
//! A context is owned by exactly one validation pass and must not be
//! written from more than one logical path concurrently. Validating
//! independent documents on separate threads is safe because each pass
//! builds its own context from the input.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Issue code carried by every validator finding at the record-schema
/// boundary.
pub const ISSUE_CODE_CUSTOM: &str = "custom";

/// One segment of a document path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// A zero-based array index.
    Index(usize),
    /// An object key.
    Key(String),
}

/// An ordered sequence of path segments pinpointing a field in a nested
/// document.
///
/// Serializes as a JSON array mixing strings and integers, e.g.
/// `["certificates", 0, "collections", 2, "slug"]`. The `Display` form is
/// the human-readable `certificates[0].collections[2].slug`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The document root (empty path).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path with an object key appended.
    pub fn push_key(&self, key: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self(segments)
    }

    /// Returns a new path with an array index appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// The path segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns true if this is the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{key}")?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// A single validation finding with structured context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue code; always `"custom"` at the record-schema boundary.
    pub code: String,
    /// Human-readable description of the finding.
    pub message: String,
    /// Path to the field the finding is about.
    pub path: Path,
}

impl Issue {
    /// Create a `custom`-coded issue.
    pub fn custom(message: impl Into<String>, path: Path) -> Self {
        Self {
            code: ISSUE_CODE_CUSTOM.to_string(),
            message: message.into(),
            path,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Accumulator for the issues of one validation pass.
#[derive(Debug, Default)]
pub struct ValidationContext {
    issues: Vec<Issue>,
}

impl ValidationContext {
    /// Create an empty context for a fresh pass.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `custom`-coded issue.
    pub fn report(&mut self, message: impl Into<String>, path: Path) {
        self.issues.push(Issue::custom(message, path));
    }

    /// Append a pre-built issue.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Merge another context's issues into this one.
    pub fn merge(&mut self, other: ValidationContext) {
        self.issues.extend(other.issues);
    }

    /// Returns true if no issues were reported.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The issues reported so far.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Consume the context and return its issues.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Number of issues reported so far.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if no issues were reported.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {issue}")?;
        }
        Ok(())
    }
}
