//! Per-play-through shuffling of question order and answer choices.
//!
//! Correctness is tracked by answer text, never by index, so shuffling
//! cannot change which choice is right.

use crate::data::Question;
use rand::Rng;
use rand::seq::SliceRandom;

/// Shuffle the order in which questions are asked.
pub fn shuffle_questions<R: Rng>(questions: &mut [Question], rng: &mut R) {
    questions.shuffle(rng);
}

/// Shuffle a single question's choices in place.
///
/// Free-text and informational questions are left untouched.
pub fn shuffle_choices<R: Rng>(question: &mut Question, rng: &mut R) {
    if question.choices.len() > 1 {
        question.choices.shuffle(rng);
    }
}

/// Prepare a freshly loaded question list for play: shuffle question order,
/// then each question's choices.
pub fn prepare_questions<R: Rng>(questions: &mut Vec<Question>, rng: &mut R) {
    shuffle_questions(questions, rng);
    for question in questions.iter_mut() {
        shuffle_choices(question, rng);
    }
}
