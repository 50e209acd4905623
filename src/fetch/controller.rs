//! Owner of the fetch state and its side effects.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::fetch::intent::FetchIntent;
use crate::fetch::policy::BackoffPolicy;
use crate::fetch::reducer::FetchReducer;
use crate::fetch::state::{FetchPhase, FetchState, RequestToken};
use crate::mvi::Reducer;
use crate::trivia::{CategoryId, FetchError, Question, QuestionSource};

/// What observers are told after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchEvent {
    /// A request went out. `attempt` is 0 for the first try.
    Loading { attempt: u32 },
    /// A request failed and will be retried after `delay`.
    RetryScheduled {
        attempt: u32,
        delay: Duration,
        reason: FetchError,
    },
    QuestionReady(Question),
    /// Retries exhausted; waits for `retry()`.
    Failed(FetchError),
}

/// Runs the fetch state machine against a `QuestionSource`.
///
/// At any instant there is at most one request task and one timer task.
/// Both report back through an internal channel tagged with the token they
/// were started under; `next_event` feeds those signals to the reducer,
/// which drops any whose token is no longer current.
///
/// Must be used from within a tokio runtime.
pub struct FetchController {
    source: Arc<dyn QuestionSource>,
    state: FetchState,
    state_tx: watch::Sender<FetchState>,
    signal_tx: mpsc::UnboundedSender<FetchIntent>,
    signal_rx: mpsc::UnboundedReceiver<FetchIntent>,
    request: Option<JoinHandle<()>>,
    timer: Option<JoinHandle<()>>,
}

impl FetchController {
    pub fn new(source: Arc<dyn QuestionSource>, policy: BackoffPolicy) -> Self {
        let state = FetchState::new(policy, None);
        let (state_tx, _) = watch::channel(state.clone());
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();
        Self {
            source,
            state,
            state_tx,
            signal_tx,
            signal_rx,
            request: None,
            timer: None,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Watch the published state. Updated after every transition.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state_tx.subscribe()
    }

    /// Load a question in the current category. No-op while loading.
    pub fn request_question(&mut self) -> Option<FetchEvent> {
        self.dispatch(FetchIntent::Request)
    }

    /// Abandon anything in flight and load from `category`.
    pub fn change_category(&mut self, category: Option<CategoryId>) -> Option<FetchEvent> {
        self.dispatch(FetchIntent::ChangeCategory { category })
    }

    /// Abandon anything in flight and start over in the same category.
    pub fn reset(&mut self) -> Option<FetchEvent> {
        self.dispatch(FetchIntent::Reset)
    }

    /// "Try Again": reset the retry counter and fetch. No-op while loading.
    pub fn retry(&mut self) -> Option<FetchEvent> {
        self.dispatch(FetchIntent::Retry)
    }

    /// Wait for the next observable transition driven by a request or timer.
    ///
    /// Stale signals are consumed silently. Pends forever while idle, so
    /// callers select on it alongside their input source. Cancel-safe.
    pub async fn next_event(&mut self) -> Option<FetchEvent> {
        loop {
            let intent = self.signal_rx.recv().await?;
            if let Some(token) = intent.token() {
                if token != self.state.token {
                    tracing::debug!(
                        token,
                        current = self.state.token,
                        "Discarding stale fetch signal"
                    );
                    continue;
                }
            }
            if let Some(event) = self.dispatch(intent) {
                return Some(event);
            }
        }
    }

    /// Abort the in-flight request and pending timer.
    pub fn shutdown(&mut self) {
        self.cancel_pending();
        // Keep the token so signals queued before shutdown stay stale.
        self.state = FetchState {
            token: self.state.token,
            ..FetchState::new(self.state.policy, self.state.category)
        };
        self.state_tx.send_replace(self.state.clone());
    }

    fn dispatch(&mut self, intent: FetchIntent) -> Option<FetchEvent> {
        let previous = std::mem::take(&mut self.state);
        let next = FetchReducer::reduce(previous.clone(), intent);
        let event = self.apply_effects(&previous, &next);
        self.state = next;
        if event.is_some() {
            self.state_tx.send_replace(self.state.clone());
        }
        event
    }

    /// Start or cancel tasks so they match the transition `previous → next`.
    fn apply_effects(&mut self, previous: &FetchState, next: &FetchState) -> Option<FetchEvent> {
        if previous.token == next.token && previous.phase == next.phase {
            return None;
        }

        match &next.phase {
            FetchPhase::Fetching => {
                self.cancel_pending();
                self.spawn_request(next.token, next.category);
                Some(FetchEvent::Loading {
                    attempt: next.retry_count,
                })
            }
            FetchPhase::RetryScheduled {
                attempt,
                delay,
                reason,
            } => {
                self.cancel_pending();
                tracing::warn!(
                    attempt = *attempt,
                    max_retries = next.policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    kind = reason.kind(),
                    error = %reason,
                    "Question fetch failed, retry scheduled"
                );
                self.spawn_timer(next.token, *delay);
                Some(FetchEvent::RetryScheduled {
                    attempt: *attempt,
                    delay: *delay,
                    reason: reason.clone(),
                })
            }
            FetchPhase::Idle => {
                self.cancel_pending();
                if let Some(error) = &next.error {
                    tracing::error!(error = %error, "Question fetch gave up");
                    Some(FetchEvent::Failed(error.clone()))
                } else {
                    next.question.clone().map(FetchEvent::QuestionReady)
                }
            }
        }
    }

    fn spawn_request(&mut self, token: RequestToken, category: Option<CategoryId>) {
        tracing::debug!(token, category = ?category, "Requesting question");
        let source = Arc::clone(&self.source);
        let tx = self.signal_tx.clone();
        self.request = Some(tokio::spawn(async move {
            let result = source.fetch_question(category).await;
            let _ = tx.send(FetchIntent::Completed { token, result });
        }));
    }

    fn spawn_timer(&mut self, token: RequestToken, delay: Duration) {
        let tx = self.signal_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(FetchIntent::RetryDue { token });
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(request) = self.request.take() {
            request.abort();
        }
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for FetchController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
