//! Run configuration.
//!
//! A [`CrawlConfig`] is assembled from three layers, later ones winning:
//! built-in defaults, an optional YAML file, then command-line flags (which
//! clap also fills from `NOTE_*` environment variables).
//!
//! ```yaml
//! author: saratoga623
//! output: note_articles.json
//! api_base: https://note.com/api/v2
//! timeout_secs: 10
//! page_delay_ms: 1000
//! on_collision: overwrite
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_AUTHOR: &str = "saratoga623";
pub const DEFAULT_OUTPUT: &str = "note_articles.json";
pub const DEFAULT_API_BASE: &str = "https://note.com/api/v2";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Policy for two articles that derive the same `"<date>-<title>"` key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeyCollision {
    /// The later article replaces the earlier one.
    #[default]
    Overwrite,
    /// The later article is stored under `"<key> (<url>)"`.
    AppendUrl,
}

/// Everything a harvest run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub author: String,
    pub output: PathBuf,
    pub api_base: Url,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub page_delay_ms: u64,
    pub max_pages: Option<u32>,
    pub on_collision: KeyCollision,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            page_delay_ms: 1000,
            max_pages: None,
            on_collision: KeyCollision::Overwrite,
        }
    }
}

impl CrawlConfig {
    /// Load a YAML config file. Missing keys keep their defaults.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration file");
        Ok(config)
    }

    /// Build the effective configuration for a run from parsed arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(author) = &cli.author {
            config.author = author.clone();
        }
        if let Some(output) = &cli.output {
            config.output = output.clone();
        }
        if let Some(api_base) = &cli.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(user_agent) = &cli.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(ms) = cli.page_delay_ms {
            config.page_delay_ms = ms;
        }
        if cli.max_pages.is_some() {
            config.max_pages = cli.max_pages;
        }
        if let Some(policy) = cli.on_collision {
            config.on_collision = policy;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.author.trim().is_empty() {
            return Err(ConfigError::EmptyAuthor);
        }
        if self.api_base.cannot_be_a_base() {
            return Err(ConfigError::InvalidApiBase(self.api_base.to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// URL of listing page `page` (1-based) for the configured author.
    ///
    /// The author is pushed as a single path segment, so it is
    /// percent-encoded rather than interpreted.
    pub fn listing_url(&self, page: u32) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["creators", self.author.as_str(), "contents"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("kind", "note")
            .append_pair("page", &page.to_string());
        url
    }
}
