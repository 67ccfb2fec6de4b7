//! pmm-bot - Safe-Spread Replay Runner
//!
//! Loads a strategy configuration and one order-book snapshot, runs a single
//! cycle, and prints the cancel/place decision as JSON on stdout.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Safe-spread replay runner
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PMM_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// JSON snapshot of resting orders, balances and target prices
    #[arg(short, long)]
    snapshot: String,

    /// Print the decision on a single line
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    pmm_telemetry::init_logging()?;

    info!("Starting pmm-bot v{}", env!("CARGO_PKG_VERSION"));

    // CLI arg > PMM_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("PMM_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = pmm_bot::AppConfig::from_file(&config_path)?;

    info!(snapshot_path = %args.snapshot, "Loading snapshot");
    let input = pmm_bot::CycleInput::from_file(&args.snapshot)?;

    let mut app = pmm_bot::Application::new(config);
    let decision = app.run_cycle(&input);

    let output = if args.compact {
        serde_json::to_string(&decision)?
    } else {
        serde_json::to_string_pretty(&decision)?
    };
    println!("{output}");

    Ok(())
}
