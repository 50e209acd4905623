//! Open Trivia DB client.
//!
//! Questions come from `GET {base}/api.php?amount=1&type=multiple[&category=N]`
//! and categories from `GET {base}/api_category.php`. Text fields arrive
//! HTML-entity encoded and are decoded here, before anything compares or
//! displays them.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::ApiConfig;
use crate::trivia::category::{Category, CategoryId};
use crate::trivia::error::{ClientError, FetchError};
use crate::trivia::question::{Difficulty, Question};
use crate::trivia::source::QuestionSource;

/// Response code the API uses when the caller is rate limited.
const RESPONSE_CODE_RATE_LIMIT: u8 = 5;

pub struct TriviaClient {
    client: Client,
    question_url: Url,
    category_url: Url,
}

impl TriviaClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base = config.base_url.trim_end_matches('/');
        let endpoint = |path: &str| {
            let url = format!("{}/{}", base, path);
            Url::parse(&url).map_err(|source| ClientError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()?;

        Ok(Self {
            client,
            question_url: endpoint("api.php")?,
            category_url: endpoint("api_category.php")?,
        })
    }

    fn question_request_url(&self, category: Option<CategoryId>) -> Url {
        let mut url = self.question_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("amount", "1");
            query.append_pair("type", "multiple");
            if let Some(category) = category {
                query.append_pair("category", &category.to_string());
            }
        }
        url
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(
            url = %url,
            status = %status,
            latency_ms = start.elapsed().as_millis() as u64,
            "Trivia API responded"
        );

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited {
                retry_after: parse_retry_after(response.headers()),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Network(format!("unexpected HTTP status {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("failed to read response body: {}", e)))
    }
}

#[async_trait]
impl QuestionSource for TriviaClient {
    async fn fetch_question(&self, category: Option<CategoryId>) -> Result<Question, FetchError> {
        let body = self.get_text(self.question_request_url(category)).await?;
        parse_question_response(&body)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        let body = self.get_text(self.category_url.clone()).await?;
        parse_category_response(&body)
    }
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored and
/// the caller's default applies.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

#[derive(Debug, Deserialize)]
struct QuestionResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    category: String,
    difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
struct CategoryResponse {
    trivia_categories: Vec<Category>,
}

fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

fn describe_response_code(code: u8) -> &'static str {
    match code {
        1 => "no results",
        2 => "invalid parameter",
        3 => "token not found",
        4 => "token empty",
        RESPONSE_CODE_RATE_LIMIT => "rate limit",
        _ => "unknown response code",
    }
}

/// Parse a question endpoint body into a decoded `Question`.
pub fn parse_question_response(body: &str) -> Result<Question, FetchError> {
    let response: QuestionResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(format!("invalid question JSON: {}", e)))?;

    match response.response_code {
        0 => {}
        RESPONSE_CODE_RATE_LIMIT => return Err(FetchError::RateLimited { retry_after: None }),
        code => {
            return Err(FetchError::Malformed(format!(
                "response code {} ({})",
                code,
                describe_response_code(code)
            )))
        }
    }

    let raw = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::Malformed("response contained no results".to_string()))?;

    Question::new(
        decode(&raw.question),
        decode(&raw.correct_answer),
        raw.incorrect_answers.iter().map(|a| decode(a)).collect(),
        decode(&raw.category),
        raw.difficulty,
    )
}

/// Parse the category endpoint body.
pub fn parse_category_response(body: &str) -> Result<Vec<Category>, FetchError> {
    let response: CategoryResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::Malformed(format!("invalid category JSON: {}", e)))?;
    Ok(response
        .trivia_categories
        .into_iter()
        .map(|c| Category {
            id: c.id,
            name: decode(&c.name),
        })
        .collect())
}
