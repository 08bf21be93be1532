//! Offline detection over a saved odds snapshot.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use odds_arb_core::{DetectorConfig, OddsSnapshot};
use odds_arb_detector::ArbitrageDetector;
use tracing::info;

use super::load_config;
use super::output::{self, OutputFormat};

/// Arguments for the detect command.
#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// Snapshot JSON file: `{ book: { game_key: quote } }`
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Take detector settings from this config file instead of the defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Write results to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run_detect(args: DetectArgs) -> Result<()> {
    let detector_config = match &args.config {
        Some(path) => load_config(path, None)?.detector,
        None => DetectorConfig::default(),
    };

    let snapshot = read_snapshot(&args.snapshot)?;
    info!(
        snapshot = %args.snapshot.display(),
        books = snapshot.book_count(),
        games = snapshot.game_count(),
        "Loaded snapshot"
    );

    let report = ArbitrageDetector::with_config(detector_config).scan(&snapshot);

    output::emit(&report, args.format, args.output.as_deref())
}

/// Reads an odds snapshot from a JSON file.
pub fn read_snapshot(path: &Path) -> Result<OddsSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}
