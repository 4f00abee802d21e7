//! JSON output for harvested articles.
//!
//! The whole document is written once, after every article has been
//! fetched, and replaces whatever the file held before:
//!
//! ```json
//! {
//!   "2024-05-01-Title": {
//!     "title": "Title",
//!     "text": "2024-05-01T09:30:00+09:00\n\n...",
//!     "url": "https://note.com/alice/n/n1"
//!   }
//! }
//! ```
//!
//! Non-ASCII text is written as-is (UTF-8), indented by two spaces.

use crate::error::OutputError;
use crate::models::ArticleRecords;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize `records` to `path`, overwriting it.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = records.len()))]
pub async fn write_articles(records: &ArticleRecords, path: &Path) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(records)?;

    info!(bytes = json.len(), "Writing JSON");
    fs::write(path, json).await?;
    info!("Wrote article JSON file");

    Ok(())
}
