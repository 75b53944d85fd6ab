//! Resolve scripture citations to verse-store identifiers from the
//! command line.
//!
//! Usage:
//!   citas resolve "Génesis 1:1" "Juan 3:16"
//!   citas expand "Juan 1:1-3, 14"
//!   citas expand --ids --json "DyC 76:22-24"

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "citas")]
#[command(about = "Resolve scripture citations to verse-store identifiers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve single-verse citations to identifiers
    Resolve {
        /// Citations, e.g. "Génesis 1:1"
        #[arg(required = true)]
        citations: Vec<String>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Expand a passage into single-verse citations
    Expand {
        /// Passage, e.g. "Juan 1:1-3, 14"
        passage: String,

        /// Print store identifiers instead of citation strings
        #[arg(long)]
        ids: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ok = match cli.command {
        Commands::Resolve { citations, json } => run_resolve(&citations, json),
        Commands::Expand { passage, ids, json } => run_expand(&passage, ids, json),
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Resolve each citation; print per-line output or one JSON array.
/// Returns false when any citation failed.
fn run_resolve(citations: &[String], json: bool) -> bool {
    let mut ok = true;

    if json {
        let results: Vec<_> = citations
            .iter()
            .map(|citation| match escrituras_ref::resolve(citation) {
                Ok(id) => json!({ "citation": citation, "id": id }),
                Err(error) => {
                    ok = false;
                    json!({ "citation": citation, "error": error.to_string() })
                }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&results).expect("valid JSON"));
        return ok;
    }

    for citation in citations {
        match escrituras_ref::resolve(citation) {
            Ok(id) => println!("{}", id),
            Err(error) => {
                eprintln!("{}: {}", citation, error);
                ok = false;
            }
        }
    }
    ok
}

/// Expand a passage; print citations (or identifiers) and report failed
/// segments. Returns false when any segment failed.
fn run_expand(passage: &str, ids: bool, json: bool) -> bool {
    let expansion = escrituras_ref::expand(passage);

    let rendered: Vec<String> = if ids {
        expansion
            .citations
            .iter()
            .map(|citation| {
                escrituras_ref::resolve(citation)
                    .expect("expanded citations always re-resolve")
            })
            .collect()
    } else {
        expansion.citations.clone()
    };

    if json {
        let errors: Vec<_> = expansion
            .errors
            .iter()
            .map(|e| json!({ "segment": e.segment, "error": e.error.to_string() }))
            .collect();
        let report = json!({
            "passage": passage,
            "citations": rendered,
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&report).expect("valid JSON"));
        return expansion.is_complete();
    }

    for line in &rendered {
        println!("{}", line);
    }
    for e in &expansion.errors {
        eprintln!("{}: {}", e.segment, e.error);
    }
    expansion.is_complete()
}
