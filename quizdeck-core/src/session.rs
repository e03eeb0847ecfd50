//! Quiz session state machine.
//!
//! One question at a time moves through `Displaying -> Answered -> Advancing`.
//! The countdown tick and the manual submit are mutually exclusive paths into
//! `Answered`; once there, further submissions are rejected until `advance`.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::data::{Question, QuestionKind, QuizFile};
use crate::shuffle::prepare_questions;

/// Selectable per-question time limits, in seconds.
pub const TIME_LIMIT_CHOICES: [u32; 4] = [5, 10, 15, 20];
pub const DEFAULT_TIME_LIMIT: u32 = 10;

/// Score percentage below which a run earns nothing.
pub const PASS_THRESHOLD: u32 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionPhase {
    /// Question shown, timer running, submissions accepted.
    Displaying,
    /// Answer recorded, feedback shown, submissions rejected.
    Answered,
    /// Feedback dismissed, about to show the next question.
    Advancing,
}

/// How a question reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    TimedOut,
    /// Informational question; never scored.
    Informational,
}

impl Outcome {
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// What the player did for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SubmittedAnswer {
    Choice { index: usize, text: String },
    Text { text: String },
    TimedOut,
    Informational,
}

/// Log entry for one answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_index: usize,
    pub answer: SubmittedAnswer,
    pub correct: bool,
    pub seconds_used: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("question already answered")]
    AlreadyAnswered,
    #[error("session is complete")]
    Complete,
    #[error("submission does not match the question kind")]
    WrongKind,
}

/// Result of advancing past the feedback stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Next question is now displaying.
    NextQuestion,
    /// No questions remain; the session is finished.
    Complete,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Case- and whitespace-insensitive free-text match.
#[must_use]
pub fn text_matches(question: &Question, input: &str) -> bool {
    let given = normalize(input);
    !given.is_empty()
        && question
            .accepted()
            .iter()
            .any(|accepted| normalize(accepted) == given)
}

/// A running play-through of one quiz. Created at quiz start, dropped at
/// quiz end or restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    quiz_id: String,
    title: String,
    spoiler_mode: bool,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    time_limit: u32,
    time_remaining: u32,
    phase: QuestionPhase,
    answers: Vec<AnswerRecord>,
}

impl QuizSession {
    /// Start a session from a loaded quiz file. Question order and each
    /// question's choices are shuffled with the given seed.
    #[must_use]
    pub fn new(quiz_id: impl Into<String>, quiz: QuizFile, time_limit: u32, seed: u64) -> Self {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut questions = quiz.questions;
        prepare_questions(&mut questions, &mut rng);

        Self {
            quiz_id: quiz_id.into(),
            title: quiz.config.title,
            spoiler_mode: quiz.config.spoiler_mode,
            questions,
            current: 0,
            score: 0,
            time_limit,
            time_remaining: time_limit,
            phase: QuestionPhase::Displaying,
            answers: Vec::new(),
        }
    }

    #[must_use]
    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub const fn spoiler_mode(&self) -> bool {
        self.spoiler_mode
    }

    #[must_use]
    pub const fn phase(&self) -> QuestionPhase {
        self.phase
    }

    #[must_use]
    pub const fn time_limit(&self) -> u32 {
        self.time_limit
    }

    #[must_use]
    pub const fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Questions that count toward the score (informational ones do not).
    #[must_use]
    pub fn scored_question_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_scored()).count()
    }

    /// Score as a whole percentage of the scorable questions.
    #[must_use]
    pub fn score_percentage(&self) -> u32 {
        let scorable = self.scored_question_count();
        if scorable == 0 {
            return 0;
        }
        (f64::from(self.score) * 100.0 / scorable as f64).round() as u32
    }

    /// One-second countdown tick. Returns the terminal outcome when the
    /// timer expires, `None` while the question keeps displaying. Ticks
    /// outside the `Displaying` phase are ignored.
    pub fn tick(&mut self) -> Option<Outcome> {
        if self.phase != QuestionPhase::Displaying || self.is_complete() {
            return None;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return None;
        }

        let (outcome, answer) = match self.current_question().map(Question::kind) {
            Some(QuestionKind::MultipleChoice | QuestionKind::FreeText) => {
                (Outcome::TimedOut, SubmittedAnswer::TimedOut)
            }
            Some(QuestionKind::Informational) => {
                (Outcome::Informational, SubmittedAnswer::Informational)
            }
            None => return None,
        };
        self.record(answer, false);
        Some(outcome)
    }

    /// Submit a multiple-choice answer by index.
    ///
    /// # Errors
    ///
    /// Rejected when the question was already answered, the session is
    /// complete, or the current question is not multiple-choice.
    pub fn submit_choice(&mut self, index: usize) -> Result<Outcome, SubmitError> {
        let question = self.answerable()?;
        if question.kind() != QuestionKind::MultipleChoice {
            return Err(SubmitError::WrongKind);
        }
        let text = question.choices.get(index).cloned().unwrap_or_default();
        let correct = question.correct_choice_index() == Some(index);
        self.record(SubmittedAnswer::Choice { index, text }, correct);
        Ok(if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        })
    }

    /// Submit a free-text answer. An empty submission records a timeout-style
    /// miss (that is how the countdown path reports expired text questions).
    ///
    /// # Errors
    ///
    /// Rejected when the question was already answered, the session is
    /// complete, or the current question is not free-text.
    pub fn submit_text(&mut self, input: &str) -> Result<Outcome, SubmitError> {
        let question = self.answerable()?;
        if question.kind() != QuestionKind::FreeText {
            return Err(SubmitError::WrongKind);
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            self.record(SubmittedAnswer::TimedOut, false);
            return Ok(Outcome::TimedOut);
        }
        let correct = text_matches(question, trimmed);
        self.record(
            SubmittedAnswer::Text {
                text: trimmed.to_string(),
            },
            correct,
        );
        Ok(if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        })
    }

    /// Acknowledge an informational question.
    ///
    /// # Errors
    ///
    /// Rejected when already answered, complete, or the question is scored.
    pub fn acknowledge_informational(&mut self) -> Result<Outcome, SubmitError> {
        let question = self.answerable()?;
        if question.kind() != QuestionKind::Informational {
            return Err(SubmitError::WrongKind);
        }
        self.record(SubmittedAnswer::Informational, false);
        Ok(Outcome::Informational)
    }

    /// Leave the feedback stage and move to the next question, resetting the
    /// countdown, or finish the session when no questions remain.
    ///
    /// Calling this outside the feedback stage leaves the current question and
    /// its remaining time untouched.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.phase != QuestionPhase::Answered {
            return if self.is_complete() {
                AdvanceOutcome::Complete
            } else {
                AdvanceOutcome::NextQuestion
            };
        }
        self.phase = QuestionPhase::Advancing;
        self.current += 1;
        if self.is_complete() {
            AdvanceOutcome::Complete
        } else {
            self.time_remaining = self.time_limit;
            self.phase = QuestionPhase::Displaying;
            AdvanceOutcome::NextQuestion
        }
    }

    fn answerable(&self) -> Result<&Question, SubmitError> {
        if self.is_complete() {
            return Err(SubmitError::Complete);
        }
        if self.phase != QuestionPhase::Displaying {
            return Err(SubmitError::AlreadyAnswered);
        }
        Ok(self.current_question().ok_or(SubmitError::Complete)?)
    }

    fn record(&mut self, answer: SubmittedAnswer, correct: bool) {
        if correct {
            self.score += 1;
        }
        self.answers.push(AnswerRecord {
            question_index: self.current,
            answer,
            correct,
            seconds_used: self.time_limit.saturating_sub(self.time_remaining),
        });
        self.phase = QuestionPhase::Answered;
    }
}
