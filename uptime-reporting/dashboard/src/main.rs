//! Uptime Dashboard Binary

use chrono::Local;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uptime_dashboard::{render_page, ApiClient, Dashboard, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Standalone page drawing the charts
    Html,
    /// Chart.js configurations keyed by canvas id
    Json,
}

#[derive(Debug, Parser)]
#[command(version, about = "Renders uptime charts from the reporting API")]
struct Cli {
    /// Base URL of the reporting API, endpoints are appended to it
    #[arg(long, env = "UPTIME_API_URL", default_value = "http://localhost:8080/api/")]
    api_url: String,

    /// File to write
    #[arg(long, short, default_value = "dashboard.html")]
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Timeout applied to each API request
    #[arg(long, default_value_t = 10)]
    timeout_seconds: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_tracing();

    let cli = Cli::parse();
    let client = ApiClient::new(cli.api_url.clone(), Duration::from_secs(cli.timeout_seconds))?;

    let fetched = client.fetch_all().await;
    let dashboard = Dashboard::build(
        fetched.instant.as_deref(),
        fetched.daily.as_deref(),
        Local::now().date_naive(),
    );

    if dashboard.is_empty() {
        warn!("No chart could be built from {}", cli.api_url);
    }

    let contents = match cli.format {
        OutputFormat::Html => render_page(&dashboard)?,
        OutputFormat::Json => serde_json::to_string_pretty(&dashboard)?,
    };
    tokio::fs::write(&cli.output, contents).await?;

    info!(
        "Wrote {} chart(s) to {}",
        dashboard.charts().len(),
        cli.output.display()
    );
    Ok(())
}

/// Initialize structured logging
fn initialize_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
