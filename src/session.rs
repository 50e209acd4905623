//! A playable trivia session: the fetch controller plus the game state,
//! driven by explicit player and lifecycle events.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::fetch::{BackoffPolicy, FetchController, FetchEvent, FetchState};
use crate::game::{AnswerFeedback, GameIntent, GameReducer, GameState};
use crate::mvi::Reducer;
use crate::trivia::{CategoryId, QuestionSource};

/// Run a reducer over a state field in place.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// How the session took a category pick.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryChange {
    /// Answered questions would be lost. Waits for confirm or cancel.
    AwaitingConfirmation,
    /// A new game started, with the fetch event it kicked off.
    Started(Option<FetchEvent>),
}

pub struct TriviaSession {
    controller: FetchController,
    game: GameState,
    rng: StdRng,
}

impl TriviaSession {
    pub fn new(
        source: Arc<dyn QuestionSource>,
        policy: BackoffPolicy,
        category: Option<CategoryId>,
    ) -> Self {
        Self::with_rng(source, policy, category, StdRng::from_entropy())
    }

    /// Like `new`, with answer shuffling seeded for reproducible runs.
    pub fn with_seed(
        source: Arc<dyn QuestionSource>,
        policy: BackoffPolicy,
        category: Option<CategoryId>,
        seed: u64,
    ) -> Self {
        Self::with_rng(source, policy, category, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        source: Arc<dyn QuestionSource>,
        policy: BackoffPolicy,
        category: Option<CategoryId>,
        rng: StdRng,
    ) -> Self {
        Self {
            controller: FetchController::new(source, policy),
            game: GameState::new(category),
            rng,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn fetch(&self) -> &FetchState {
        self.controller.state()
    }

    /// First load.
    pub fn on_mount(&mut self) -> Option<FetchEvent> {
        self.controller.change_category(self.game.category)
    }

    /// "Next Question". Only offered once the question on screen is
    /// answered and the game is still running; ignored while a fetch is
    /// already under way.
    pub fn on_user_requested_next(&mut self) -> Option<FetchEvent> {
        if self.game.completed {
            tracing::debug!("Ignoring next question after game completion");
            return None;
        }
        if self.game.current.is_some() && !self.game.is_locked() {
            tracing::debug!("Ignoring next question before an answer");
            return None;
        }
        self.controller.request_question()
    }

    /// "Try Again" after the error screen.
    pub fn on_try_again(&mut self) -> Option<FetchEvent> {
        self.controller.retry()
    }

    /// Player picked a category.
    pub fn on_category_changed(&mut self, category: Option<CategoryId>) -> CategoryChange {
        let round = self.game.round;
        dispatch_mvi!(self, game, GameReducer, GameIntent::RequestCategoryChange { category });
        if self.game.is_confirming_category() {
            return CategoryChange::AwaitingConfirmation;
        }
        CategoryChange::Started(self.restart_if_new_round(round))
    }

    pub fn confirm_category_change(&mut self) -> Option<FetchEvent> {
        let round = self.game.round;
        dispatch_mvi!(self, game, GameReducer, GameIntent::ConfirmCategoryChange);
        self.restart_if_new_round(round)
    }

    pub fn cancel_category_change(&mut self) {
        dispatch_mvi!(self, game, GameReducer, GameIntent::CancelCategoryChange);
    }

    /// Start over in the same category.
    pub fn on_reset(&mut self) -> Option<FetchEvent> {
        let round = self.game.round;
        dispatch_mvi!(self, game, GameReducer, GameIntent::Reset);
        self.restart_if_new_round(round)
    }

    /// Submit an answer. `None` when the question is locked or absent.
    pub fn on_answer(&mut self, answer: &str) -> Option<AnswerFeedback> {
        if !self.game.can_submit() {
            tracing::debug!("Ignoring answer for locked or missing question");
            return None;
        }
        dispatch_mvi!(
            self,
            game,
            GameReducer,
            GameIntent::SubmitAnswer {
                answer: answer.to_string()
            }
        );
        let feedback = self.game.last_answer.clone();
        if let Some(feedback) = &feedback {
            tracing::info!(
                correct = feedback.is_correct,
                score = self.game.stats.score,
                streak = self.game.stats.streak,
                progress = self.game.progress.value(),
                "Answer submitted"
            );
        }
        feedback
    }

    /// Wait for the next fetch event, presenting any question it delivers.
    pub async fn next_event(&mut self) -> Option<FetchEvent> {
        let event = self.controller.next_event().await?;
        if let FetchEvent::QuestionReady(question) = &event {
            let seed = self.rng.gen();
            dispatch_mvi!(
                self,
                game,
                GameReducer,
                GameIntent::QuestionLoaded {
                    question: question.clone(),
                    seed
                }
            );
        }
        Some(event)
    }

    pub fn shutdown(&mut self) {
        self.controller.shutdown();
    }

    fn restart_if_new_round(&mut self, previous_round: u64) -> Option<FetchEvent> {
        if self.game.round == previous_round {
            return None;
        }
        tracing::info!(category = ?self.game.category, round = self.game.round, "Starting new game");
        if self.controller.state().category == self.game.category {
            self.controller.reset()
        } else {
            self.controller.change_category(self.game.category)
        }
    }
}
