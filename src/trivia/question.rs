//! The `Question` value object.

use serde::{Deserialize, Serialize};

use crate::trivia::error::FetchError;

/// Question difficulty as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Progress lost when this question is answered wrong.
    pub fn penalty(self) -> f64 {
        match self {
            Difficulty::Easy => 0.1,
            Difficulty::Medium => 0.25,
            Difficulty::Hard => 0.4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single multiple-choice question, already decoded to plain text.
///
/// Fields are private: once constructed a question never changes, and
/// `new` is the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
    category: String,
    difficulty: Difficulty,
}

impl Question {
    /// Build a question, rejecting ones that cannot be played.
    ///
    /// # Errors
    /// `FetchError::Malformed` when the text or correct answer is blank,
    /// there are no incorrect answers, or an incorrect answer duplicates the
    /// correct one.
    pub fn new(
        text: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, FetchError> {
        let text = text.into();
        let correct_answer = correct_answer.into();

        if text.trim().is_empty() {
            return Err(FetchError::Malformed("question text is empty".to_string()));
        }
        if correct_answer.trim().is_empty() {
            return Err(FetchError::Malformed("correct answer is empty".to_string()));
        }
        if incorrect_answers.is_empty() {
            return Err(FetchError::Malformed(
                "question has no incorrect answers".to_string(),
            ));
        }
        if incorrect_answers.iter().any(|a| a == &correct_answer) {
            return Err(FetchError::Malformed(format!(
                "incorrect answers repeat the correct answer '{}'",
                correct_answer
            )));
        }

        Ok(Self {
            text,
            correct_answer,
            incorrect_answers,
            category: category.into(),
            difficulty,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_answer
    }

    /// Number of answer buttons this question needs.
    pub fn answer_count(&self) -> usize {
        self.incorrect_answers.len() + 1
    }
}
