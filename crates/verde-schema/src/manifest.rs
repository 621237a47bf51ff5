//! # Hash Manifest — Content Hashes for a Document Set
//!
//! The upload tooling keeps one manifest per published document set:
//! a map from relative path to the content hash of the document at that
//! path. Re-generating the manifest and diffing it against the committed
//! one is how drift is caught before anything reaches IPFS — a document
//! edited without its hash being updated shows up as a `Changed` entry.
//!
//! Entries live in a `BTreeMap`, so a serialized manifest is itself
//! deterministic and diffs cleanly under version control.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use verde_core::{content_hash, CanonicalizationError};

/// Manifest format version.
pub const MANIFEST_VERSION: &str = "1.0.0";

/// One manifest entry: the content hash of the document at a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// 64-char lowercase hex SHA-256 of the document's canonical form.
    pub hash: String,
    /// Relative path of the document, restated inside the entry so an
    /// entry remains self-describing when extracted from the map.
    pub path: String,
}

/// A content-hash manifest over a set of documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashManifest {
    /// Manifest format version.
    pub version: String,
    /// Entries keyed by relative path.
    pub schemas: BTreeMap<String, ManifestEntry>,
}

impl Default for HashManifest {
    fn default() -> Self {
        Self::new()
    }
}

impl HashManifest {
    /// Create an empty manifest at the current format version.
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            schemas: BTreeMap::new(),
        }
    }

    /// Hash a document and record it under `rel_path`.
    ///
    /// # Errors
    ///
    /// Propagates [`CanonicalizationError`] when the document cannot be
    /// canonicalized; the manifest is left unchanged in that case.
    pub fn insert_document(
        &mut self,
        rel_path: &str,
        document: &Value,
    ) -> Result<(), CanonicalizationError> {
        let hash = content_hash(document)?;
        self.schemas.insert(
            rel_path.to_string(),
            ManifestEntry {
                hash,
                path: rel_path.to_string(),
            },
        );
        Ok(())
    }

    /// Look up an entry by relative path.
    pub fn get(&self, rel_path: &str) -> Option<&ManifestEntry> {
        self.schemas.get(rel_path)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if the manifest has no entries.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Diff this (recorded) manifest against a freshly recomputed one.
    ///
    /// Returns drifts sorted by path: entries only in `recomputed` are
    /// `Added`, entries only in `self` are `Removed`, entries in both with
    /// different hashes are `Changed`.
    pub fn diff(&self, recomputed: &HashManifest) -> Vec<ManifestDrift> {
        let mut drifts = Vec::new();
        let paths: std::collections::BTreeSet<&String> = self
            .schemas
            .keys()
            .chain(recomputed.schemas.keys())
            .collect();
        for path in paths {
            match (self.schemas.get(path), recomputed.schemas.get(path)) {
                (None, Some(_)) => drifts.push(ManifestDrift::Added { path: path.clone() }),
                (Some(_), None) => drifts.push(ManifestDrift::Removed { path: path.clone() }),
                (Some(recorded), Some(actual)) if recorded.hash != actual.hash => {
                    drifts.push(ManifestDrift::Changed {
                        path: path.clone(),
                        recorded: recorded.hash.clone(),
                        actual: actual.hash.clone(),
                    });
                }
                _ => {}
            }
        }
        drifts
    }
}

/// One divergence between a recorded manifest and a recomputed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestDrift {
    /// A document exists on disk but not in the recorded manifest.
    Added {
        /// Relative path of the document.
        path: String,
    },
    /// A recorded document no longer exists on disk.
    Removed {
        /// Relative path of the document.
        path: String,
    },
    /// A document's content hash no longer matches its recorded hash.
    Changed {
        /// Relative path of the document.
        path: String,
        /// Hash in the recorded manifest.
        recorded: String,
        /// Hash of the document as it is now.
        actual: String,
    },
}

impl fmt::Display for ManifestDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { path } => write!(f, "added: {path}"),
            Self::Removed { path } => write!(f, "removed: {path}"),
            Self::Changed {
                path,
                recorded,
                actual,
            } => write!(f, "changed: {path} (recorded {recorded}, actual {actual})"),
        }
    }
}
