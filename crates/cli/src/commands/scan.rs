//! One-shot scan: read every configured book once and report.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::output::{self, OutputFormat};
use super::{load_config, ScanPipeline};

/// Arguments for the scan command.
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: PathBuf,

    /// Profile overlay, loaded from `Config.{profile}.toml` next to the config
    #[arg(short, long, env = "ODDS_ARB_PROFILE")]
    pub profile: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "table", value_enum)]
    pub format: OutputFormat,

    /// Write results to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn run_scan(args: ScanArgs) -> Result<()> {
    let config = load_config(&args.config, args.profile.as_deref())?;
    info!(
        config = %args.config.display(),
        books = config.books.len(),
        "Starting scan"
    );

    let pipeline = ScanPipeline::from_config(&config)?;
    let report = pipeline.run().await;

    output::emit(&report, args.format, args.output.as_deref())
}
