use clap::{Parser, Subcommand};

mod commands;

use commands::{DetectArgs, ScanArgs, WatchArgs};

#[derive(Parser)]
#[command(name = "odds-arb")]
#[command(about = "Cross-book arbitrage scanner for live sportsbook odds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read every configured book once and report opportunities
    Scan(ScanArgs),
    /// Run detection on a saved odds snapshot
    Detect(DetectArgs),
    /// Scan continuously on a fixed interval
    Watch(WatchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so table/json/csv output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan(args) => {
            commands::run_scan(args).await?;
        }
        Commands::Detect(args) => {
            commands::run_detect(args)?;
        }
        Commands::Watch(args) => {
            commands::run_watch(args).await?;
        }
    }

    Ok(())
}
