//! Game state.

use crate::game::score::{GameStats, Progress};
use crate::mvi::State;
use crate::trivia::{CategoryId, Question};

/// The question on screen with its cached answer order.
#[derive(Debug, Clone, PartialEq)]
pub struct PresentedQuestion {
    pub question: Question,
    /// Display order, shuffled once when the question arrived.
    pub answers: Vec<String>,
    pub selected: Option<String>,
    /// Set on the first submission. A locked question takes no more answers.
    pub locked: bool,
}

/// Result of the last answer, for the "Correct! +20" style toast.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub score_delta: u64,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameState {
    pub category: Option<CategoryId>,
    pub stats: GameStats,
    pub progress: Progress,
    pub current: Option<PresentedQuestion>,
    pub last_answer: Option<AnswerFeedback>,
    /// A category change waiting for the player to confirm losing progress.
    pub pending_category: Option<Option<CategoryId>>,
    pub completed: bool,
    /// Bumped whenever a new game starts (reset or category change).
    pub round: u64,
}

impl State for GameState {}

impl GameState {
    pub fn new(category: Option<CategoryId>) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn is_locked(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.locked)
    }

    /// Whether an answer submitted now would be scored.
    pub fn can_submit(&self) -> bool {
        !self.completed && self.current.as_ref().is_some_and(|c| !c.locked)
    }

    /// Changing category now would throw away answered questions.
    pub fn needs_category_confirmation(&self) -> bool {
        self.stats.total_questions > 0
    }

    pub fn is_confirming_category(&self) -> bool {
        self.pending_category.is_some()
    }
}
