use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::trivia::Question;

/// All answers of `question` in a Fisher–Yates order determined by `seed`.
///
/// Called once when a question is presented; the order is then cached so
/// buttons stay put until the next question.
pub fn shuffled_answers(question: &Question, seed: u64) -> Vec<String> {
    let mut answers: Vec<String> = question
        .incorrect_answers()
        .iter()
        .cloned()
        .chain(std::iter::once(question.correct_answer().to_string()))
        .collect();
    let mut rng = StdRng::seed_from_u64(seed);
    answers.shuffle(&mut rng);
    answers
}
