//! # verde CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// verde — receipt validation and content-addressing toolchain.
///
/// Hashes receipt/certificate documents into their canonical content
/// hashes, maintains hash manifests over document sets, and runs the
/// cross-entity validation pass.
#[derive(Parser, Debug)]
#[command(name = "verde", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Compute the content hash of a JSON document.
    Hash(verde_cli::hash::HashArgs),
    /// Generate or verify hash manifests over a document directory.
    Manifest(verde_cli::manifest::ManifestArgs),
    /// Run the cross-entity validation pass over a receipt document.
    Validate(verde_cli::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hash(args) => verde_cli::hash::run(args),
        Commands::Manifest(args) => verde_cli::manifest::run(args),
        Commands::Validate(args) => verde_cli::validate::run(args),
    }
}
