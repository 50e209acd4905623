use crate::mvi::Intent;
use crate::trivia::{CategoryId, Question};

#[derive(Debug, Clone)]
pub enum GameIntent {
    /// A fetched question is ready to show. `seed` fixes its answer order.
    QuestionLoaded { question: Question, seed: u64 },
    SubmitAnswer { answer: String },
    /// Player picked a category. Asks for confirmation mid-game.
    RequestCategoryChange { category: Option<CategoryId> },
    ConfirmCategoryChange,
    CancelCategoryChange,
    /// Start over in the same category.
    Reset,
}

impl Intent for GameIntent {}
