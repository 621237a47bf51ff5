//! # Validate Subcommand
//!
//! Runs the cross-entity validation pass over a receipt document and
//! reports every finding with its exact path.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Args;

use verde_schema::receipt::{validate_receipt_with, ReceiptDocument};
use verde_validate::DEFAULT_EPSILON;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the receipt JSON document.
    pub file: PathBuf,

    /// Tolerance for float reconciliation.
    #[arg(long, default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Emit the issue list as JSON instead of human-readable lines.
    #[arg(long)]
    pub json: bool,
}

/// Validate one receipt document and print the findings.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let document: ReceiptDocument = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid receipt document", args.file.display()))?;

    let ctx = validate_receipt_with(&document, args.epsilon);
    tracing::info!(file = %args.file.display(), issues = ctx.len(), "validated");

    if ctx.is_valid() {
        if args.json {
            println!("[]");
        } else {
            println!("ok: {}", args.file.display());
        }
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(ctx.issues())?);
    } else {
        for issue in ctx.issues() {
            println!("{issue}");
        }
    }
    bail!("{} issues in {}", ctx.len(), args.file.display());
}
