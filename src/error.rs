//! Error types for each stage of a harvest.
//!
//! Every fetch and parse step returns one of these instead of panicking, so
//! the caller decides whether a failure ends discovery, skips an article, or
//! stops the program before any work starts.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// A single HTTP GET that did not produce a body.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection failure, timeout, or any other transport error.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// The status was fine but the body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Why an article page yielded no text.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("no body container found at {url}")]
    BodyNotFound { url: String },
}

/// Failure writing the output document.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("API base {0} cannot carry a path")]
    InvalidApiBase(String),

    #[error("author identifier must not be empty")]
    EmptyAuthor,
}
