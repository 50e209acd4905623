//! Shared test utilities: an in-process question source and the mock API.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use trivia_rush::config::ApiConfig;
use trivia_rush::fetch::BackoffPolicy;
use trivia_rush::trivia::{CategoryId, Difficulty, FetchError, Question, QuestionSource};

pub fn question(text: &str) -> Question {
    Question::new(
        text,
        "Right",
        vec!["Wrong A".into(), "Wrong B".into(), "Wrong C".into()],
        "General Knowledge",
        Difficulty::Medium,
    )
    .expect("valid question")
}

/// Backoff small enough for tests against a real socket.
pub fn fast_policy() -> BackoffPolicy {
    BackoffPolicy {
        min_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(50),
        max_retries: 3,
        default_retry_after: Duration::from_millis(20),
    }
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 2,
        connect_timeout_seconds: 1,
    }
}

/// One scripted reply from `ScriptedSource`.
#[derive(Debug, Clone)]
pub struct Step {
    pub result: Result<Question, FetchError>,
    pub latency: Duration,
}

impl Step {
    pub fn ok(text: &str) -> Self {
        Self {
            result: Ok(question(text)),
            latency: Duration::from_millis(10),
        }
    }

    pub fn err(error: FetchError) -> Self {
        Self {
            result: Err(error),
            latency: Duration::from_millis(10),
        }
    }

    pub fn network() -> Self {
        Self::err(FetchError::Network("connection refused".into()))
    }

    pub fn after(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[derive(Default)]
struct Counters {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Question source replaying a script, tracking overlap between requests.
///
/// Once the script runs out every call fails with a network error.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    steps: Arc<Mutex<VecDeque<Step>>>,
    categories: Arc<Mutex<Vec<Option<CategoryId>>>>,
    counters: Arc<Counters>,
}

struct InFlight(Arc<Counters>);

impl InFlight {
    fn enter(counters: &Arc<Counters>) -> Self {
        let now = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        counters.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(Arc::clone(counters))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        let source = Self::default();
        source.steps.lock().unwrap().extend(steps);
        source
    }

    pub fn calls(&self) -> usize {
        self.counters.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.counters.in_flight.load(Ordering::SeqCst)
    }

    /// Category passed to each call, in order.
    pub fn categories(&self) -> Vec<Option<CategoryId>> {
        self.categories.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuestionSource for ScriptedSource {
    async fn fetch_question(&self, category: Option<CategoryId>) -> Result<Question, FetchError> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        self.categories.lock().unwrap().push(category);
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Step::network);

        let _guard = InFlight::enter(&self.counters);
        tokio::time::sleep(step.latency).await;
        step.result
    }
}
