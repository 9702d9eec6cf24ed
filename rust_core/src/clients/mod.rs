//! Document sources for the extractors.
//!
//! The collectors only see the `DocumentSource` trait, so a season run can be
//! driven by the live HTTP client or by an in-memory set of documents.

use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;

pub mod statsapi;

pub use statsapi::StatsApiClient;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch and parse a JSON document. Relative paths are resolved against
    /// the statistics API base; absolute URLs are used as given.
    async fn get_json(&self, path: &str) -> Result<Value, FetchError>;

    /// Fetch an HTML page by absolute URL.
    async fn get_page(&self, url: &str) -> Result<String, FetchError>;

    /// Source name for logging
    fn source_name(&self) -> &str;
}
