//! Releasedash CLI - serve a release dataset as a JSON API
//!
//! # Commands
//!
//! ```bash
//! releasedash serve                  # Start HTTP server (port 3000)
//! releasedash serve --port 8080 --data-dir ./exports
//! releasedash check                  # Load the dataset once and print stats
//! ```

use clap::{Parser, Subcommand};
use releasedash::dataset::RELEASES_FILE;
use releasedash::stats::aggregate;
use releasedash::{countries, load_releases};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "releasedash")]
#[command(about = "Serve tabular music release exports as a JSON API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Directory containing NewReleases.csv and the summary files
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Load the dataset once and print statistics
    Check {
        /// Directory containing NewReleases.csv
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, data_dir } => cmd_serve(port, data_dir).await,
        Commands::Check { data_dir } => cmd_check(&data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn cmd_serve(port: u16, data_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    releasedash::run_server(port, data_dir).await
}

fn cmd_check(data_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = data_dir.join(RELEASES_FILE);
    eprintln!("📄 Loading dataset: {}", path.display());

    let records = load_releases(&path)?;
    let dated = records.iter().filter(|r| r.date.is_some()).count();

    let countries: BTreeSet<String> = records
        .iter()
        .map(|r| countries::canonicalize(&r.country))
        .filter(|c| !c.is_empty())
        .collect();

    eprintln!("✅ Parsed {} records ({} dated)", records.len(), dated);
    eprintln!("   Countries: {}", countries.len());

    if let Some(min) = records.iter().filter_map(|r| r.date).min() {
        // max exists whenever min does
        let max = records.iter().filter_map(|r| r.date).max().unwrap_or(min);
        eprintln!(
            "   Date range: {} .. {}",
            min.format("%Y-%m-%d"),
            max.format("%Y-%m-%d")
        );
    }

    let refs: Vec<&releasedash::Release> = records.iter().collect();
    let aggregation = aggregate(&refs);
    if !aggregation.top_artists.is_empty() {
        eprintln!("   Top artists:");
        for entry in &aggregation.top_artists {
            eprintln!("     {:>5}  {}", entry.count, entry.label);
        }
    }

    Ok(())
}
