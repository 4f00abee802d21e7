//! note.com article scraper.
//!
//! Articles are discovered through the creator listing API, which pages
//! through an author's notes:
//!
//! ```text
//! GET {api_base}/creators/{author}/contents?kind=note&page=1
//! {"data": {"isLastPage": false, "contents": [{"noteUrl": ..., "name": ..., "publishAt": ...}]}}
//! ```
//!
//! Each article page is then fetched and its body text read from the
//! `data-name="body"` container, or the older `o-noteContent__body` layout.

use crate::config::{CrawlConfig, KeyCollision};
use crate::error::ExtractError;
use crate::http::fetch_text;
use crate::models::{
    ArticleIndex, ArticleMeta, ArticleRecord, ArticleRecords, ListingItem, ListingResponse,
    RunSummary,
};
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

static PRIMARY_BODY: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[data-name="body"].note-common-styles__textnote-body"#).unwrap()
});
static LEGACY_BODY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.o-noteContent__body").unwrap());

/// Why the listing walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryStop {
    /// The server flagged `page` as the final page.
    LastPage { page: u32 },
    /// `page` had no entries.
    EmptyPage { page: u32 },
    /// The request for `page` failed; earlier pages are kept.
    RequestFailed { page: u32, error: String },
    /// The body of `page` was not JSON; earlier pages are kept.
    MalformedPage { page: u32, error: String },
    /// The configured page limit was reached.
    PageLimit { pages: u32 },
}

/// Result of the listing walk: whatever was found, plus why it stopped.
#[derive(Debug)]
pub struct Discovery {
    pub articles: ArticleIndex,
    pub stop: DiscoveryStop,
}

/// Result of fetching every discovered article.
#[derive(Debug, Default)]
pub struct Harvest {
    pub records: ArticleRecords,
    pub summary: RunSummary,
}

/// Walk the listing API for `config.author` and collect every article.
///
/// Never fails: a failed or unreadable page ends the walk and the articles
/// from earlier pages are returned.
#[instrument(level = "info", skip_all, fields(author = %config.author))]
pub async fn index_articles(client: &Client, config: &CrawlConfig) -> Discovery {
    let mut articles = ArticleIndex::new();
    let mut page: u32 = 1;

    let stop = loop {
        if let Some(limit) = config.max_pages {
            if page > limit {
                info!(limit, "Reached page limit");
                break DiscoveryStop::PageLimit { pages: limit };
            }
        }

        let url = config.listing_url(page);
        debug!(page, %url, "Requesting listing page");

        let body = match fetch_text(client, url.as_str()).await {
            Ok(body) => body,
            Err(e) => {
                error!(page, error = %e, "Listing request failed; keeping articles found so far");
                break DiscoveryStop::RequestFailed {
                    page,
                    error: e.to_string(),
                };
            }
        };

        let listing: ListingResponse = match serde_json::from_str(&body) {
            Ok(listing) => listing,
            Err(e) => {
                warn!(
                    page,
                    error = %e,
                    body_preview = %truncate_for_log(&body, 200),
                    "Listing page is not valid JSON; treating as empty"
                );
                break DiscoveryStop::MalformedPage {
                    page,
                    error: e.to_string(),
                };
            }
        };

        let is_last_page = listing.is_last_page();
        let contents = listing.into_contents();
        if contents.is_empty() {
            info!(page, "No more articles");
            break DiscoveryStop::EmptyPage { page };
        }

        let added = record_page(&mut articles, contents);
        info!(page, added, total = articles.len(), "Indexed listing page");

        if is_last_page {
            info!(page, "Reached last page");
            break DiscoveryStop::LastPage { page };
        }

        page += 1;
        debug!(next_page = page, delay = ?config.page_delay(), "Waiting before next page");
        sleep(config.page_delay()).await;
    };

    info!(count = articles.len(), ?stop, "Discovered article links");
    for (i, meta) in articles.values().enumerate() {
        info!("{:02}: {} ({})", i + 1, meta.url, meta.title);
    }

    Discovery { articles, stop }
}

/// Record the usable entries of one listing page. A URL seen before keeps
/// its position but takes the newer metadata.
fn record_page(articles: &mut ArticleIndex, contents: Vec<serde_json::Value>) -> usize {
    let mut added = 0;
    for meta in contents
        .into_iter()
        .filter_map(ListingItem::from_value)
        .filter_map(ListingItem::into_meta)
    {
        info!(
            url = %meta.url,
            title = %meta.title,
            timestamp = meta.timestamp.as_deref().unwrap_or("-"),
            "Discovered article"
        );
        articles.insert(meta.url.clone(), meta);
        added += 1;
    }
    added
}

/// Fetch every discovered article in discovery order and key the results.
///
/// Articles whose fetch or extraction fails are logged and left out.
#[instrument(level = "info", skip_all, fields(count = index.len()))]
pub async fn fetch_articles(client: &Client, index: &ArticleIndex, on_collision: KeyCollision) -> Harvest {
    let outcomes: Vec<(&ArticleMeta, Result<String, ExtractError>)> = stream::iter(index.values())
        .then(|meta| async move {
            let res = fetch_article(client, &meta.url, meta.publish_timestamp()).await;
            (meta, res)
        })
        .collect()
        .await;

    let mut harvest = Harvest {
        records: ArticleRecords::new(),
        summary: RunSummary {
            discovered: index.len(),
            ..RunSummary::default()
        },
    };

    for (meta, outcome) in outcomes {
        match outcome {
            Ok(text) if text.is_empty() => {
                warn!(url = %meta.url, "Article produced no content");
                harvest.summary.skipped += 1;
            }
            Ok(text) => {
                harvest.summary.extracted += 1;
                insert_record(&mut harvest, meta, text, on_collision);
            }
            Err(e) => {
                warn!(url = %meta.url, error = %e, "Skipping article");
                harvest.summary.skipped += 1;
            }
        }
    }

    harvest.summary.saved = harvest.records.len();
    info!(
        extracted = harvest.summary.extracted,
        skipped = harvest.summary.skipped,
        collisions = harvest.summary.collisions,
        "Fetched article contents"
    );
    harvest
}

fn insert_record(harvest: &mut Harvest, meta: &ArticleMeta, text: String, on_collision: KeyCollision) {
    if meta.publish_timestamp().is_none() {
        warn!(url = %meta.url, title = %meta.title, "Missing publish timestamp; using placeholder date");
    }

    let mut key = meta.record_key();
    if harvest.records.contains_key(&key) {
        harvest.summary.collisions += 1;
        match on_collision {
            KeyCollision::Overwrite => {
                warn!(%key, url = %meta.url, "Output key already taken; replacing earlier article");
            }
            KeyCollision::AppendUrl => {
                key = format!("{key} ({})", meta.url);
                warn!(%key, "Output key already taken; storing under URL-qualified key");
            }
        }
    }

    harvest.records.insert(
        key,
        ArticleRecord {
            title: meta.title.clone(),
            text,
            url: meta.url.clone(),
        },
    );
}

/// Fetch a single article and return its body text, prefixed with
/// `"{timestamp}\n\n"` when a timestamp is given.
#[instrument(level = "info", skip(client, timestamp))]
pub async fn fetch_article(client: &Client, url: &str, timestamp: Option<&str>) -> Result<String, ExtractError> {
    let html = fetch_text(client, url).await?;
    let body = extract_body(&html).ok_or_else(|| ExtractError::BodyNotFound { url: url.to_string() })?;
    info!(bytes = body.len(), "Parsed article body");

    Ok(match timestamp.map(str::trim).filter(|ts| !ts.is_empty()) {
        Some(ts) => format!("{ts}\n\n{body}"),
        None => body,
    })
}

/// Text of the article body container, or `None` if the page has neither
/// the current nor the legacy layout.
pub fn extract_body(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&PRIMARY_BODY)
        .next()
        .or_else(|| document.select(&LEGACY_BODY).next())
        .map(block_text)
}

/// Trimmed, non-empty text nodes joined by newlines. Script and style
/// contents are skipped.
fn block_text(element: ElementRef<'_>) -> String {
    element
        .descendants()
        .filter(|node| {
            !node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| matches!(el.value().name(), "script" | "style"))
        })
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
