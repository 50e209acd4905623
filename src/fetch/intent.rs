//! Fetch controller intents.

use crate::fetch::state::RequestToken;
use crate::mvi::Intent;
use crate::trivia::{CategoryId, FetchError, Question};

#[derive(Debug, Clone)]
pub enum FetchIntent {
    /// Initial load or "Next Question". Ignored while loading.
    Request,

    /// The player picked another category. Abandons whatever is in flight
    /// and starts a fresh sequence in the new category.
    ChangeCategory { category: Option<CategoryId> },

    /// The game was reset. Like `ChangeCategory` but keeps the category.
    Reset,

    /// "Try Again" after a terminal error. Ignored while loading.
    Retry,

    /// A request finished.
    Completed {
        token: RequestToken,
        result: Result<Question, FetchError>,
    },

    /// A retry timer fired.
    RetryDue { token: RequestToken },
}

impl Intent for FetchIntent {}

impl FetchIntent {
    /// Token carried by system signals; `None` for player actions.
    pub fn token(&self) -> Option<RequestToken> {
        match self {
            FetchIntent::Completed { token, .. } | FetchIntent::RetryDue { token } => Some(*token),
            _ => None,
        }
    }
}
