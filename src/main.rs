use clap::Parser;
use now_showing::config::Config;
use now_showing::events::TracingSink;
use now_showing::orchestrator::scrape_all;
use now_showing::pipeline::{build_sources, run_scrape_and_match};
use now_showing::CatalogEntry;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

/// Scrape "now showing" lists from cinema websites and match them against a
/// movie catalog.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON file with the catalog: `[{"id": "...", "title": "..."}]`
    #[arg(short, long, required_unless_present = "scrape_only")]
    catalog: Option<PathBuf>,

    /// TOML config file (threshold, timeout, cinema profiles)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum similarity for a match, overrides the config file
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Only scrape these cinemas (repeatable)
    #[arg(long = "only", value_name = "CINEMA")]
    only: Vec<String>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print per-cinema scrape results and skip catalog matching
    #[arg(long)]
    scrape_only: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed CLI arguments");

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if !cli.only.is_empty() {
        config.retain_cinemas(&cli.only)?;
    }
    config.validate()?;

    let sources = build_sources(&config, Arc::new(TracingSink))?;
    info!(cinemas = sources.len(), "Starting scrape");

    let json = if cli.scrape_only {
        let results = scrape_all(&sources).await;
        serde_json::to_string_pretty(&results)?
    } else {
        let catalog_path = cli
            .catalog
            .as_ref()
            .ok_or("--catalog is required unless --scrape-only is set")?;
        let catalog: Vec<CatalogEntry> =
            serde_json::from_str(&std::fs::read_to_string(catalog_path)?)?;
        info!(entries = catalog.len(), path = %catalog_path.display(), "Loaded catalog");

        let report = run_scrape_and_match(&sources, &catalog, config.threshold).await;
        serde_json::to_string_pretty(&report)?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
