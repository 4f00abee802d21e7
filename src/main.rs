//! # note_harvest
//!
//! Collects every article an author has published on note.com, extracts the
//! body text of each, and saves them as one JSON document keyed by publish
//! date and title.
//!
//! ## Usage
//!
//! ```sh
//! note_harvest -a saratoga623 -o ./note_articles.json
//! ```
//!
//! ## Architecture
//!
//! The run is a two-pass pipeline, one request at a time:
//! 1. **Indexing**: page through the creator listing API to discover articles
//! 2. **Fetching**: download each article page and extract its body text
//! 3. **Output**: write all extracted articles to a single JSON file

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod error;
mod http;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::CrawlConfig;
use outputs::json;
use scrapers::note;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("note_harvest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = CrawlConfig::from_cli(&args).inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    info!(
        author = %config.author,
        output = %config.output.display(),
        api_base = %config.api_base,
        "Configuration resolved"
    );

    // Early check so a bad output path is reported before any network work
    if let Err(e) = ensure_writable_parent(&config.output).await {
        warn!(
            path = %config.output.display(),
            error = %e,
            "Output location is not writable; continuing, the final write will likely fail"
        );
    }

    let client = http::build_client(&config)?;

    // ---- Index articles ----
    let discovery = note::index_articles(&client, &config).await;
    info!(count = discovery.articles.len(), stop = ?discovery.stop, "Indexing finished");

    // ---- Fetch article bodies ----
    let mut harvest = note::fetch_articles(&client, &discovery.articles, config.on_collision).await;

    // ---- Output ----
    match json::write_articles(&harvest.records, &config.output).await {
        Ok(()) => info!(path = %config.output.display(), "Saved articles"),
        Err(e) => {
            error!(path = %config.output.display(), error = %e, "Failed to save articles");
            harvest.summary.saved = 0;
        }
    }

    let summary = &harvest.summary;
    let elapsed = start_time.elapsed();
    info!(
        discovered = summary.discovered,
        extracted = summary.extracted,
        skipped = summary.skipped,
        collisions = summary.collisions,
        saved = summary.saved,
        ?elapsed,
        "Execution complete"
    );

    Ok(())
}
