//! Nestlog CLI
//!
//! Renders and inspects the nested session documents produced by
//! nestlog-core.
//!
//! ## Usage
//!
//! ```bash
//! # Render a session document as a tree
//! nestlog render session.json
//!
//! # List the events of a session in recording order
//! nestlog events session.json
//!
//! # Aggregate per-kind statistics
//! nestlog summary session.json
//!
//! # Read the document from stdin
//! some-service --emit-log | nestlog render -
//! ```

mod render;
mod summary;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nestlog_core::SessionDocument;
use tracing::debug;

/// Nestlog - hierarchical session log viewer
#[derive(Parser)]
#[command(name = "nestlog")]
#[command(version = "0.1.0")]
#[command(about = "Nestlog - hierarchical session log viewer")]
#[command(
    long_about = "Renders and summarizes the nested JSON session documents produced by nestlog-core: one tree per session, with per-operation close records, correlated events, and execution times."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a session document as an indented tree
    Render {
        /// Path to a session document, or - for stdin
        file: PathBuf,
    },

    /// List events in recording order with their correlation ids
    Events {
        /// Path to a session document, or - for stdin
        file: PathBuf,
    },

    /// Print per-kind statistics for a session document
    Summary {
        /// Path to a session document, or - for stdin
        file: PathBuf,
    },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Load a session document from a file, or from stdin when the path is -
fn load_document(path: &Path) -> Result<SessionDocument> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    let doc = SessionDocument::from_json(&json)
        .with_context(|| format!("not a valid session document: {}", path.display()))?;
    debug!(schema_ref = %doc.schema_ref, events = doc.events.len(), "loaded session document");
    Ok(doc)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Render { file } => {
            let doc = load_document(&file)?;
            print!("{}", render::render_tree(&doc));
        }

        Commands::Events { file } => {
            let doc = load_document(&file)?;
            print!("{}", render::render_events(&doc));
        }

        Commands::Summary { file } => {
            let doc = load_document(&file)?;
            print!("{}", summary::Summary::from_document(&doc));
        }
    }

    Ok(())
}
