//! Game transitions.

use crate::game::intent::GameIntent;
use crate::game::score::submit_answer;
use crate::game::shuffle::shuffled_answers;
use crate::game::state::{AnswerFeedback, GameState, PresentedQuestion};
use crate::mvi::Reducer;
use crate::trivia::CategoryId;

pub struct GameReducer;

impl Reducer for GameReducer {
    type State = GameState;
    type Intent = GameIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            GameIntent::QuestionLoaded { question, seed } => {
                let answers = shuffled_answers(&question, seed);
                GameState {
                    current: Some(PresentedQuestion {
                        question,
                        answers,
                        selected: None,
                        locked: false,
                    }),
                    last_answer: None,
                    ..state
                }
            }

            GameIntent::SubmitAnswer { answer } => {
                if !state.can_submit() {
                    return state;
                }
                let Some(current) = state.current.clone() else {
                    return state;
                };

                let outcome =
                    submit_answer(&current.question, &answer, state.stats, state.progress);
                let feedback = AnswerFeedback {
                    is_correct: outcome.is_correct,
                    score_delta: outcome.score_delta,
                    correct_answer: current.question.correct_answer().to_string(),
                };

                GameState {
                    stats: outcome.stats,
                    progress: outcome.progress,
                    current: Some(PresentedQuestion {
                        selected: Some(answer),
                        locked: true,
                        ..current
                    }),
                    last_answer: Some(feedback),
                    completed: outcome.is_complete,
                    ..state
                }
            }

            GameIntent::RequestCategoryChange { category } => {
                if state.needs_category_confirmation() {
                    GameState {
                        pending_category: Some(category),
                        ..state
                    }
                } else {
                    new_round(state, category)
                }
            }

            GameIntent::ConfirmCategoryChange => match state.pending_category {
                Some(category) => new_round(state, category),
                None => state,
            },

            GameIntent::CancelCategoryChange => GameState {
                pending_category: None,
                ..state
            },

            GameIntent::Reset => {
                let category = state.category;
                new_round(state, category)
            }
        }
    }
}

fn new_round(state: GameState, category: Option<CategoryId>) -> GameState {
    GameState {
        round: state.round + 1,
        ..GameState::new(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::score::MAX_QUESTIONS;
    use crate::trivia::{Difficulty, Question};

    fn question(difficulty: Difficulty) -> Question {
        Question::new(
            "Which animal is a mammal?",
            "Dolphin",
            vec!["Shark".into(), "Trout".into(), "Eel".into()],
            "Animals",
            difficulty,
        )
        .unwrap()
    }

    fn loaded(state: GameState, difficulty: Difficulty) -> GameState {
        GameReducer::reduce(
            state,
            GameIntent::QuestionLoaded {
                question: question(difficulty),
                seed: 1,
            },
        )
    }

    fn answer(state: GameState, answer: &str) -> GameState {
        GameReducer::reduce(
            state,
            GameIntent::SubmitAnswer {
                answer: answer.to_string(),
            },
        )
    }

    #[test]
    fn loading_shuffles_once_and_unlocks() {
        let state = loaded(GameState::default(), Difficulty::Easy);
        let current = state.current.as_ref().unwrap();
        assert_eq!(current.answers.len(), 4);
        assert!(!current.locked);
        assert!(state.can_submit());
    }

    #[test]
    fn presented_answers_come_from_the_question() {
        assert_eq!(GameState::default().current, None);

        let question = question(Difficulty::Hard);
        let state = GameReducer::reduce(
            GameState::default(),
            GameIntent::QuestionLoaded {
                question: question.clone(),
                seed: 9,
            },
        );
        let current = state.current.unwrap();
        assert_eq!(current.answers.len(), question.answer_count());
        assert!(current.answers.len() >= 2);
        assert!(current.answers.contains(&"Dolphin".to_string()));
    }

    #[test]
    fn answer_locks_question() {
        let state = answer(loaded(GameState::default(), Difficulty::Easy), "Dolphin");
        assert!(state.is_locked());
        assert_eq!(state.stats.score, 10);
        assert_eq!(
            state.last_answer,
            Some(AnswerFeedback {
                is_correct: true,
                score_delta: 10,
                correct_answer: "Dolphin".into(),
            })
        );
        assert_eq!(
            state.current.as_ref().unwrap().selected.as_deref(),
            Some("Dolphin")
        );
    }

    #[test]
    fn locked_question_rejects_second_answer() {
        let state = answer(loaded(GameState::default(), Difficulty::Easy), "Shark");
        let again = answer(state.clone(), "Dolphin");
        assert_eq!(again, state);
        assert_eq!(again.stats.total_questions, 1);
    }

    #[test]
    fn answer_without_question_is_ignored() {
        let state = answer(GameState::default(), "Dolphin");
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn twelve_correct_answers_complete_the_game() {
        let mut state = GameState::default();
        for _ in 0..MAX_QUESTIONS {
            assert!(!state.completed);
            state = answer(loaded(state, Difficulty::Medium), "Dolphin");
        }
        assert!(state.completed);
        assert_eq!(state.progress.value(), 12.0);
        assert_eq!(state.stats.streak, 12);
        // 10 × (1 + 2 + … + 12)
        assert_eq!(state.stats.score, 780);

        let after = answer(loaded(state.clone(), Difficulty::Medium), "Dolphin");
        assert_eq!(after.stats, state.stats);
    }

    #[test]
    fn score_never_decreases_across_mixed_answers() {
        let mut state = GameState::default();
        let mut last_score = 0;
        for (i, difficulty) in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .iter()
            .cycle()
            .take(30)
            .enumerate()
        {
            let choice = if i % 3 == 0 { "Shark" } else { "Dolphin" };
            state = answer(loaded(state, *difficulty), choice);
            assert!(state.stats.score >= last_score);
            assert!(state.progress.value() >= 0.0);
            assert!(state.progress.value() <= 12.0);
            last_score = state.stats.score;
            if state.completed {
                break;
            }
        }
    }

    #[test]
    fn category_change_on_fresh_game_applies_immediately() {
        let state = GameReducer::reduce(
            GameState::default(),
            GameIntent::RequestCategoryChange {
                category: Some(CategoryId(11)),
            },
        );
        assert_eq!(state.category, Some(CategoryId(11)));
        assert_eq!(state.round, 1);
        assert!(!state.is_confirming_category());
    }

    #[test]
    fn category_change_mid_game_needs_confirmation() {
        let played = answer(loaded(GameState::new(Some(CategoryId(11))), Difficulty::Easy), "Dolphin");
        let state = GameReducer::reduce(
            played.clone(),
            GameIntent::RequestCategoryChange {
                category: Some(CategoryId(21)),
            },
        );
        assert!(state.is_confirming_category());
        assert_eq!(state.category, Some(CategoryId(11)));
        assert_eq!(state.stats, played.stats);

        let cancelled = GameReducer::reduce(state.clone(), GameIntent::CancelCategoryChange);
        assert_eq!(cancelled, played);

        let confirmed = GameReducer::reduce(state, GameIntent::ConfirmCategoryChange);
        assert_eq!(confirmed.category, Some(CategoryId(21)));
        assert_eq!(confirmed.stats.total_questions, 0);
        assert_eq!(confirmed.progress.value(), 0.0);
        assert!(confirmed.current.is_none());
        assert_eq!(confirmed.round, played.round + 1);
    }

    #[test]
    fn confirm_without_pending_is_noop() {
        let state = GameState::new(Some(CategoryId(9)));
        assert_eq!(
            GameReducer::reduce(state.clone(), GameIntent::ConfirmCategoryChange),
            state
        );
    }

    #[test]
    fn reset_keeps_category_and_clears_stats() {
        let played = answer(loaded(GameState::new(Some(CategoryId(23))), Difficulty::Hard), "Dolphin");
        let state = GameReducer::reduce(played, GameIntent::Reset);
        assert_eq!(state.category, Some(CategoryId(23)));
        assert_eq!(state.stats.score, 0);
        assert!(state.current.is_none());
        assert!(!state.completed);
        assert_eq!(state.round, 1);
    }
}
