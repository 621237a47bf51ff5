//! # Manifest Subcommand
//!
//! Generates a hash manifest over a directory of JSON documents, and
//! verifies a committed manifest against the directory's current state.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Subcommand};

use verde_schema::manifest::HashManifest;

/// Arguments for the manifest subcommand.
#[derive(Args, Debug)]
pub struct ManifestArgs {
    #[command(subcommand)]
    pub command: ManifestCommand,
}

#[derive(Subcommand, Debug)]
pub enum ManifestCommand {
    /// Hash every .json document in a directory into a manifest file.
    Generate {
        /// Directory of JSON documents.
        dir: PathBuf,
        /// Where to write the manifest.
        #[arg(long)]
        out: PathBuf,
    },
    /// Recompute hashes and report drift against a committed manifest.
    Verify {
        /// Directory of JSON documents.
        dir: PathBuf,
        /// The committed manifest to verify against.
        #[arg(long)]
        manifest: PathBuf,
    },
}

/// Dispatch to the requested manifest operation.
pub fn run(args: ManifestArgs) -> anyhow::Result<()> {
    match args.command {
        ManifestCommand::Generate { dir, out } => generate(&dir, &out),
        ManifestCommand::Verify { dir, manifest } => verify(&dir, &manifest),
    }
}

/// Build a manifest from every `.json` file directly under `dir`.
///
/// The manifest file itself is skipped when it lives in the same
/// directory, so regeneration is idempotent.
fn collect(dir: &Path, skip: Option<&Path>) -> anyhow::Result<HashManifest> {
    let mut manifest = HashManifest::new();
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("cannot read directory {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        if skip.is_some_and(|s| path == s) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let document: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;
        manifest
            .insert_document(name, &document)
            .with_context(|| format!("cannot canonicalize {}", path.display()))?;
        tracing::debug!(file = name, "hashed");
    }
    Ok(manifest)
}

fn generate(dir: &Path, out: &Path) -> anyhow::Result<()> {
    let manifest = collect(dir, Some(out))?;
    let text = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(out, text).with_context(|| format!("cannot write {}", out.display()))?;
    tracing::info!(entries = manifest.len(), out = %out.display(), "manifest written");
    println!("{} entries -> {}", manifest.len(), out.display());
    Ok(())
}

fn verify(dir: &Path, manifest_path: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("cannot read {}", manifest_path.display()))?;
    let recorded: HashManifest = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid manifest", manifest_path.display()))?;

    let recomputed = collect(dir, Some(manifest_path))?;
    let drifts = recorded.diff(&recomputed);

    if drifts.is_empty() {
        println!("ok: {} entries match", recorded.len());
        return Ok(());
    }
    for drift in &drifts {
        println!("{drift}");
    }
    bail!("{} entries drifted", drifts.len());
}
