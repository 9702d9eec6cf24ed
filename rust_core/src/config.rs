//! Runtime configuration shared by the scraper binaries.
//!
//! Values come from the environment (after `.env` is loaded by the binary)
//! with defaults for every setting.

use std::env;
use std::time::Duration;

/// Default base URL of the statistics API
pub const DEFAULT_STATS_API_BASE: &str = "https://statsapi.web.nhl.com";

/// Default base URL of the team salary pages
pub const DEFAULT_SALARY_BASE_URL: &str = "https://www.spotrac.com/nhl";

/// Default base URL of the league skater season tables
pub const DEFAULT_SKATER_TABLE_BASE_URL: &str = "https://www.hockey-reference.com/leagues";

/// Default request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_USER_AGENT: &str = "nhl-scrape/0.1";

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub stats_api_base: String,
    pub salary_base_url: String,
    pub skater_table_base_url: String,
    pub http_timeout: Duration,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            stats_api_base: DEFAULT_STATS_API_BASE.to_string(),
            salary_base_url: DEFAULT_SALARY_BASE_URL.to_string(),
            skater_table_base_url: DEFAULT_SKATER_TABLE_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let http_timeout = Duration::from_secs(
            env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        );

        Self {
            stats_api_base: env_url("STATS_API_BASE").unwrap_or(defaults.stats_api_base),
            salary_base_url: env_url("SALARY_BASE_URL").unwrap_or(defaults.salary_base_url),
            skater_table_base_url: env_url("SKATER_TABLE_BASE_URL")
                .unwrap_or(defaults.skater_table_base_url),
            http_timeout,
            user_agent: env::var("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    /// Salary page for one team slug and season-start year.
    pub fn salary_url(&self, team: &str, year: i32) -> String {
        format!("{}/{}/cap/{}/", self.salary_base_url, team, year)
    }

    /// League skater table for a season-end year.
    pub fn skater_table_url(&self, year: i32) -> String {
        format!("{}/NHL_{}_skaters.html", self.skater_table_base_url, year)
    }
}

/// Read a URL setting, dropping any trailing slash.
fn env_url(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}
