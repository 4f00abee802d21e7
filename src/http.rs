//! Shared HTTP client and the single GET primitive both stages use.

use crate::config::CrawlConfig;
use crate::error::FetchError;
use reqwest::Client;
use tracing::{debug, instrument};

/// Build the client used for the whole run: browser-like User-Agent and a
/// per-request timeout from the config.
pub fn build_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()
}

/// GET `url` and return its body as text. Non-2xx statuses are errors.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(FetchError::Request)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    let body = response.text().await.map_err(FetchError::Body)?;
    debug!(bytes = body.len(), %status, "Fetched");
    Ok(body)
}
