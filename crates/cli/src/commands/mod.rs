//! CLI commands for the sportsbook arbitrage scanner.

pub mod detect;
pub mod output;
pub mod scan;
pub mod watch;

pub use detect::{run_detect, DetectArgs};
pub use scan::{run_scan, ScanArgs};
pub use watch::{run_watch, WatchArgs};

use std::path::Path;

use anyhow::{Context, Result};
use odds_arb_core::{AppConfig, ConfigLoader};
use odds_arb_detector::{ArbitrageDetector, DetectionReport};
use odds_arb_feeds::{build_feeds, SnapshotCollector};
use tracing::warn;

/// Loads the configuration file with an optional profile overlay.
pub fn load_config(path: &Path, profile: Option<&str>) -> Result<AppConfig> {
    ConfigLoader::load_from_with_profile(path, profile)
        .with_context(|| format!("Failed to load config: {}", path.display()))
}

/// One ingest-then-detect cycle over the configured books.
#[derive(Debug)]
pub struct ScanPipeline {
    collector: SnapshotCollector,
    detector: ArbitrageDetector,
}

impl ScanPipeline {
    /// Builds the feeds and detector described by `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let feeds = build_feeds(&config.books).context("Invalid book configuration")?;
        if feeds.is_empty() {
            warn!("No books configured, snapshots will be empty");
        }

        Ok(Self {
            collector: SnapshotCollector::new(feeds),
            detector: ArbitrageDetector::with_config(config.detector.clone()),
        })
    }

    /// Collects a fresh snapshot and runs detection on it.
    pub async fn run(&self) -> DetectionReport {
        let snapshot = self.collector.collect().await;
        self.detector.scan(&snapshot)
    }
}
