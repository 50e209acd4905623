//! Error types for talking to the question source.

use thiserror::Error;

/// Why a question could not be obtained.
///
/// Values are cloned into published state snapshots, so transport errors
/// are captured as messages rather than carrying `reqwest::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, timeout, or unexpected HTTP status.
    #[error("Network failure: {0}")]
    Network(String),

    /// HTTP 429 (or the API's own rate-limit response code).
    #[error("Rate limited{}", retry_suffix(.retry_after))]
    RateLimited {
        /// `Retry-After` in seconds, when the server sent one.
        retry_after: Option<u64>,
    },

    /// Non-zero response code, missing fields, or a question that violates
    /// the `Question` invariants.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The retry budget ran out. Terminal until the player retries.
    #[error("Failed to load question after {attempts} retries: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::RateLimited { .. } => "rate_limited",
            FetchError::Malformed(_) => "malformed",
            FetchError::RetriesExhausted { .. } => "retries_exhausted",
        }
    }

    /// Message suitable for showing to the player.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::RetriesExhausted { .. } => "Failed to load question. Please try again.",
            FetchError::RateLimited { .. } => "Rate limited, waiting before retrying...",
            FetchError::Network(_) | FetchError::Malformed(_) => "Retrying...",
        }
    }
}

fn retry_suffix(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(", retry after {}s", secs),
        None => String::new(),
    }
}

/// Errors building a `TriviaClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
