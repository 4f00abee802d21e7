//! Data models for discovered articles, harvested records, and the listing API.
//!
//! This module defines the structures that flow through a run:
//! - [`ArticleMeta`]: an article found by the listing walk, not yet fetched
//! - [`ArticleRecord`]: an article whose body text was extracted
//! - [`ListingResponse`]: the wire shape of one listing page
//! - [`RunSummary`]: counters reported when the run finishes
//!
//! Both maps are insertion ordered so the output document lists articles in
//! the order the listing endpoint returned them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Date used in output keys when an article has no publish timestamp.
pub const UNKNOWN_DATE: &str = "0000-00-00";

/// An article discovered through the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleMeta {
    /// Canonical article URL; unique within an [`ArticleIndex`].
    pub url: String,
    /// Article title as published.
    pub title: String,
    /// Publish date-time as reported by the API (ISO 8601), if any.
    pub timestamp: Option<String>,
}

impl ArticleMeta {
    /// Publish timestamp, trimmed; `None` when absent or blank.
    pub fn publish_timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// The first ten characters of the publish timestamp (`YYYY-MM-DD` for
    /// ISO 8601 input), or [`UNKNOWN_DATE`] when there is none.
    pub fn date_prefix(&self) -> String {
        match self.publish_timestamp() {
            Some(ts) => ts.chars().take(10).collect(),
            None => UNKNOWN_DATE.to_string(),
        }
    }

    /// Key this article is stored under in the output document.
    pub fn record_key(&self) -> String {
        format!("{}-{}", self.date_prefix(), self.title)
    }
}

/// Discovered articles keyed by URL, in discovery order.
pub type ArticleIndex = IndexMap<String, ArticleMeta>;

/// A fully harvested article as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    /// Body text, prefixed with the timestamp and a blank line when known.
    pub text: String,
    pub url: String,
}

/// Output document: `"<date>-<title>"` to record, in insertion order.
pub type ArticleRecords = IndexMap<String, ArticleRecord>;

/// One page of `GET /creators/{id}/contents`.
///
/// Every level defaults so a page missing `data` reads as an empty page.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub data: Option<ListingData>,
}

#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub isLastPage: Option<bool>,
    #[serde(default)]
    pub contents: Option<Vec<serde_json::Value>>,
}

impl ListingResponse {
    /// Whether the server flagged this page as the final one.
    pub fn is_last_page(&self) -> bool {
        self.data
            .as_ref()
            .and_then(|d| d.isLastPage)
            .unwrap_or(false)
    }

    /// Raw entries of the page. Entries are kept as JSON values so a single
    /// odd entry does not discard the whole page.
    pub fn into_contents(self) -> Vec<serde_json::Value> {
        self.data.and_then(|d| d.contents).unwrap_or_default()
    }
}

/// The fields of a listing entry this tool cares about.
#[allow(non_snake_case)]
#[derive(Debug, Deserialize)]
pub struct ListingItem {
    #[serde(default)]
    pub noteUrl: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub publishAt: Option<String>,
}

impl ListingItem {
    /// Decode a raw listing entry, ignoring anything that is not an object
    /// with the expected field types.
    pub fn from_value(value: serde_json::Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }

    /// Convert to [`ArticleMeta`] when both the URL and the title are present.
    pub fn into_meta(self) -> Option<ArticleMeta> {
        let url = self.noteUrl.filter(|u| !u.is_empty())?;
        let title = self.name.filter(|n| !n.is_empty())?;
        Some(ArticleMeta {
            url,
            title,
            timestamp: self
                .publishAt
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        })
    }
}

/// Counters logged at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Articles found by the listing walk.
    pub discovered: usize,
    /// Articles whose body text was extracted.
    pub extracted: usize,
    /// Articles dropped because the fetch or extraction failed.
    pub skipped: usize,
    /// Records whose key was already taken.
    pub collisions: usize,
    /// Records in the output document.
    pub saved: usize,
}
