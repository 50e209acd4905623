//! Pure scoring rules.

use crate::trivia::Question;

/// Effective correct answers needed to finish a game.
pub const MAX_QUESTIONS: u32 = 12;

/// A correct answer is worth this times the streak it extends.
pub const POINTS_PER_STREAK: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStats {
    pub total_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    /// Consecutive correct answers.
    pub streak: u32,
    pub score: u64,
}

/// Progress toward `MAX_QUESTIONS`, always within `[0, MAX_QUESTIONS]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Progress(f64);

impl Progress {
    pub fn new(value: f64) -> Self {
        let max = f64::from(MAX_QUESTIONS);
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, max))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Share of the bar that is filled, in `[0, 1]`.
    pub fn fraction(self) -> f64 {
        self.0 / f64::from(MAX_QUESTIONS)
    }

    pub fn is_complete(self) -> bool {
        self.0 >= f64::from(MAX_QUESTIONS)
    }

    fn advance(self) -> Self {
        Self::new(self.0 + 1.0)
    }

    fn penalize(self, penalty: f64) -> Self {
        Self::new(self.0 - penalty)
    }
}

/// Result of answering one question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerOutcome {
    pub stats: GameStats,
    pub progress: Progress,
    pub is_correct: bool,
    pub is_complete: bool,
    pub score_delta: u64,
}

/// Score one answer.
///
/// Pure: callers enforce one submission per question.
pub fn submit_answer(
    question: &Question,
    chosen: &str,
    stats: GameStats,
    progress: Progress,
) -> AnswerOutcome {
    let is_correct = question.is_correct(chosen);

    let (score_delta, progress) = if is_correct {
        (POINTS_PER_STREAK * (u64::from(stats.streak) + 1), progress.advance())
    } else {
        (0, progress.penalize(question.difficulty().penalty()))
    };

    let stats = GameStats {
        total_questions: stats.total_questions + 1,
        correct_answers: stats.correct_answers + u32::from(is_correct),
        incorrect_answers: stats.incorrect_answers + u32::from(!is_correct),
        streak: if is_correct { stats.streak + 1 } else { 0 },
        score: stats.score + score_delta,
    };

    AnswerOutcome {
        stats,
        progress,
        is_correct,
        is_complete: progress.is_complete(),
        score_delta,
    }
}
