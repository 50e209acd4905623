//! Fetch controller state.

use std::time::Duration;

use crate::fetch::policy::BackoffPolicy;
use crate::mvi::State;
use crate::trivia::{CategoryId, FetchError, Question};

/// Identifies one request attempt. Increases every time the controller
/// enters `Fetching`; completions carrying an older token are stale.
pub type RequestToken = u64;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchPhase {
    /// No request outstanding and no retry pending.
    #[default]
    Idle,

    /// Exactly one request is outstanding.
    Fetching,

    /// The last attempt failed; a timer will re-enter `Fetching`.
    RetryScheduled {
        /// Retry number (1-based), as shown to the player.
        attempt: u32,
        delay: Duration,
        /// The failure that caused this retry.
        reason: FetchError,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchState {
    pub phase: FetchPhase,
    /// Retries used in the current failure streak.
    pub retry_count: u32,
    /// Token of the current (or most recent) request.
    pub token: RequestToken,
    pub category: Option<CategoryId>,
    /// Most recently fetched question.
    pub question: Option<Question>,
    /// Terminal error, set only once the retry budget is exhausted.
    pub error: Option<FetchError>,
    pub policy: BackoffPolicy,
}

impl State for FetchState {}

impl FetchState {
    pub fn new(policy: BackoffPolicy, category: Option<CategoryId>) -> Self {
        Self {
            policy,
            category,
            ..Self::default()
        }
    }

    /// True while a request is outstanding or a retry is pending. Further
    /// "next question" requests are ignored in this window.
    pub fn is_loading(&self) -> bool {
        !matches!(self.phase, FetchPhase::Idle)
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.phase, FetchPhase::Fetching)
    }

    /// Retry attempt for progress UI ("Attempt 2/3"); 0 before any failure.
    pub fn retry_attempt(&self) -> u32 {
        self.retry_count
    }

    pub fn max_retries(&self) -> u32 {
        self.policy.max_retries
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }

    /// Delay of the pending retry, if one is scheduled.
    pub fn scheduled_delay(&self) -> Option<Duration> {
        match &self.phase {
            FetchPhase::RetryScheduled { delay, .. } => Some(*delay),
            _ => None,
        }
    }
}
