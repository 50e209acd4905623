//! Scoring, progress, and the per-question game state.

mod intent;
mod reducer;
mod score;
mod shuffle;
mod state;

pub use intent::GameIntent;
pub use reducer::GameReducer;
pub use score::{submit_answer, AnswerOutcome, GameStats, Progress, MAX_QUESTIONS, POINTS_PER_STREAK};
pub use shuffle::shuffled_answers;
pub use state::{AnswerFeedback, GameState, PresentedQuestion};
