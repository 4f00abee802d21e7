//! Command-line interface definitions for note_harvest.
//!
//! Every flag is optional: anything left unset falls back to the config file
//! given with `--config`, then to the built-in defaults in
//! [`CrawlConfig`](crate::config::CrawlConfig).

use crate::config::KeyCollision;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Command-line arguments for note_harvest.
///
/// # Examples
///
/// ```sh
/// # Harvest the default author into ./note_articles.json
/// note_harvest
///
/// # Another author, custom output, settings from a file
/// note_harvest -a someone -o ./someone.json -c ./harvest.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Author (creator) identifier whose articles are collected
    #[arg(short, long, env = "NOTE_AUTHOR")]
    pub author: Option<String>,

    /// Output JSON file, overwritten on every run
    #[arg(short, long, env = "NOTE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the listing API
    #[arg(long, env = "NOTE_API_BASE")]
    pub api_base: Option<Url>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Pause between listing pages in milliseconds
    #[arg(long)]
    pub page_delay_ms: Option<u64>,

    /// Stop discovery after this many listing pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// What to do when two articles map to the same output key
    #[arg(long, value_enum)]
    pub on_collision: Option<KeyCollision>,
}
