//! # Hash Subcommand
//!
//! Computes the canonical content hash of a JSON document file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use verde_core::{sha256_hex, CanonicalBytes};

/// Arguments for the hash subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Path to the JSON document.
    pub file: PathBuf,

    /// Also print the canonical text the hash was computed over.
    #[arg(long)]
    pub canonical: bool,
}

/// Hash one document and print the result.
pub fn run(args: HashArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;

    let canonical = CanonicalBytes::from_value(&document)
        .with_context(|| format!("cannot canonicalize {}", args.file.display()))?;
    let hash = sha256_hex(&canonical);

    tracing::debug!(file = %args.file.display(), bytes = canonical.len(), "hashed document");

    if args.canonical {
        println!("{}", canonical.as_str());
    }
    println!("{hash}");
    Ok(())
}
