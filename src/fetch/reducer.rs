//! Phase transitions for question fetching.

use crate::fetch::intent::FetchIntent;
use crate::fetch::state::{FetchPhase, FetchState};
use crate::mvi::Reducer;
use crate::trivia::FetchError;

pub struct FetchReducer;

impl Reducer for FetchReducer {
    type State = FetchState;
    type Intent = FetchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FetchIntent::Request => {
                if state.is_loading() {
                    state
                } else {
                    start_fetch(state)
                }
            }

            FetchIntent::ChangeCategory { category } => start_fetch(FetchState {
                category,
                retry_count: 0,
                question: None,
                ..state
            }),

            FetchIntent::Reset => start_fetch(FetchState {
                retry_count: 0,
                question: None,
                ..state
            }),

            FetchIntent::Retry => {
                if state.is_loading() {
                    state
                } else {
                    start_fetch(FetchState {
                        retry_count: 0,
                        ..state
                    })
                }
            }

            FetchIntent::Completed { token, result } => {
                if token != state.token || !state.is_fetching() {
                    return state;
                }
                match result {
                    Ok(question) => FetchState {
                        phase: FetchPhase::Idle,
                        retry_count: 0,
                        question: Some(question),
                        error: None,
                        ..state
                    },
                    Err(error) => on_failure(state, error),
                }
            }

            FetchIntent::RetryDue { token } => {
                let pending = matches!(state.phase, FetchPhase::RetryScheduled { .. });
                if token == state.token && pending {
                    start_fetch(state)
                } else {
                    state
                }
            }
        }
    }
}

/// Enter `Fetching` under a new token. Any older request or timer becomes
/// stale by construction.
fn start_fetch(state: FetchState) -> FetchState {
    FetchState {
        phase: FetchPhase::Fetching,
        token: state.token.wrapping_add(1),
        error: None,
        ..state
    }
}

fn on_failure(state: FetchState, error: FetchError) -> FetchState {
    let policy = state.policy;

    if state.retry_count >= policy.max_retries {
        return FetchState {
            phase: FetchPhase::Idle,
            retry_count: 0,
            error: Some(FetchError::RetriesExhausted {
                attempts: state.retry_count,
                last: Box::new(error),
            }),
            ..state
        };
    }

    let delay = match &error {
        FetchError::RateLimited { retry_after } => {
            policy.rate_limit_delay(*retry_after, state.retry_count)
        }
        _ => policy.delay_for_attempt(state.retry_count),
    };
    let attempt = state.retry_count + 1;

    FetchState {
        phase: FetchPhase::RetryScheduled {
            attempt,
            delay,
            reason: error,
        },
        retry_count: attempt,
        ..state
    }
}
