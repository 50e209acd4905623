use serde::{Deserialize, Serialize};

use crate::trivia::CategoryId;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// Where questions come from and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the trivia API (default: "https://opentdb.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Backoff settings for failed question fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Automatic retries before the error is shown (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds (default: 1000).
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound for exponential backoff in milliseconds (default: 10000).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Wait used for HTTP 429 without a `Retry-After` header (default: 5).
    #[serde(default = "default_retry_after")]
    pub default_retry_after_seconds: u64,
}

/// Game options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Category to start in. Absent means any category.
    #[serde(default)]
    pub category: Option<CategoryId>,
}

fn default_base_url() -> String {
    "https://opentdb.com".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    10_000
}

fn default_retry_after() -> u64 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            default_retry_after_seconds: default_retry_after(),
        }
    }
}
