//! Continuous scanning on a fixed interval.
//!
//! Cycles never overlap: the next tick is awaited only after the previous
//! cycle has collected, detected, and printed. Edits to the config file take
//! effect at the start of the next cycle.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use odds_arb_core::ConfigWatcher;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::output::{self, OutputFormat};
use super::{load_config, ScanPipeline};

/// Arguments for the watch command.
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: PathBuf,

    /// Profile overlay, loaded from `Config.{profile}.toml` next to the config.
    /// Edits to either file apply from the next cycle.
    #[arg(short, long, env = "ODDS_ARB_PROFILE")]
    pub profile: Option<String>,

    /// Seconds between cycles (defaults to `scan.interval_secs` from config)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Stop after this many cycles (runs until Ctrl+C if not set)
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Output format for each cycle
    #[arg(short, long, default_value = "table", value_enum)]
    pub format: OutputFormat,
}

pub async fn run_watch(args: WatchArgs) -> Result<()> {
    let config = load_config(&args.config, args.profile.as_deref())?;
    let interval_secs = args.interval.unwrap_or(config.scan.interval_secs).max(1);

    info!(
        config = %args.config.display(),
        books = config.books.len(),
        interval_secs,
        cycles = ?args.cycles,
        "Starting watch"
    );

    let mut pipeline = ScanPipeline::from_config(&config)?;

    let (watcher, mut config_rx) = ConfigWatcher::new(config);
    let config_path = args.config.clone();
    let profile = args.profile.clone();
    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watcher.watch(config_path, profile).await {
            warn!(error = %e, "Config watcher stopped, hot reload disabled");
        }
    });

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut completed: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, stopping");
                break;
            }
        }

        if config_rx.has_changed().unwrap_or(false) {
            let updated = config_rx.borrow_and_update().clone();
            match ScanPipeline::from_config(&updated) {
                Ok(rebuilt) => {
                    info!(books = updated.books.len(), "Applied reloaded config");
                    pipeline = rebuilt;
                }
                Err(e) => {
                    warn!(error = %e, "Reloaded config rejected, keeping previous");
                }
            }
        }

        let report = pipeline.run().await;
        output::emit(&report, args.format, None)?;
        completed += 1;

        if args.cycles.is_some_and(|max| completed >= max) {
            info!(cycles = completed, "Cycle limit reached");
            break;
        }
    }

    drop(config_rx);
    if let Err(e) = watcher_handle.await {
        warn!(error = %e, "Config watcher task failed");
    }

    Ok(())
}
