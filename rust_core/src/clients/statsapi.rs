use super::DocumentSource;
use crate::config::ScrapeConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// HTTP client for the statistics API and the HTML stat pages.
///
/// One attempt per request: no retry and no backoff. Callers decide what a
/// failure means for their table.
#[derive(Clone)]
pub struct StatsApiClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for StatsApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl StatsApiClient {
    pub fn new(config: &ScrapeConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.http_timeout)
                .user_agent(config.user_agent.clone())
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: config.stats_api_base.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a relative API path onto the base URL.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl DocumentSource for StatsApiClient {
    async fn get_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.resolve(path);
        let body = self.get_text(&url).await?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }

    async fn get_page(&self, url: &str) -> Result<String, FetchError> {
        self.get_text(url).await
    }

    fn source_name(&self) -> &str {
        "statsapi"
    }
}
