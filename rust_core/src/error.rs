//! Error types shared by the fetchers, extractors and exporters.

use thiserror::Error;

/// Failure to obtain a document from a remote source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no document at {0}")]
    NotFound(String),
}

/// A document did not have the shape an extractor needs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("missing required field {path}")]
    MissingField { path: String },

    #[error("field {path} is not {expected}")]
    UnexpectedType { path: String, expected: &'static str },

    #[error("invalid CSS selector {0}")]
    Selector(&'static str),

    #[error("page has no table")]
    NoTable,

    #[error("table has {found} columns, expected {expected}")]
    TableShape { expected: usize, found: usize },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
