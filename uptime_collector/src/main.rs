//! Uptime Collector Binary

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uptime_collector::{Config, Result, UptimeCollector, UptimeStore};

#[derive(Debug, Parser)]
#[command(version, about = "Records internet uptime checks into SQLite")]
struct Cli {
    /// Database file, overrides UPTIME_DB_PATH
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Run a single check, print the result and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_tracing();

    let cli = Cli::parse();
    info!("Starting uptime collector v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env();
    if let Some(db_path) = cli.db_path {
        config.db_path = db_path;
    }

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        std::process::exit(1);
    }

    info!(
        "Collector configuration - Database: {}, Check URL: {}, Interval: {:?}",
        config.db_path.display(),
        config.check_url,
        config.check_interval
    );

    let store = Arc::new(UptimeStore::open(&config.db_path)?);
    let collector = UptimeCollector::new(config, store)?;

    if cli.once {
        let outcome = collector.check_once().await?;
        println!(
            "{} (today: {} up, {} down)",
            if outcome.up { "up" } else { "down" },
            outcome.today.up,
            outcome.today.down
        );
        return Ok(());
    }

    if let Err(e) = collector.start().await {
        error!("Collector failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// JSON events on stdout, one flat object per line; `RUST_LOG` overrides `info`
fn initialize_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let json_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .init();
}
