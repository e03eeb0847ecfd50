//! Player profile: display name, preferred time limit, result history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{DEFAULT_TIME_LIMIT, QuizSession};

/// One finished play-through in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub quiz_id: String,
    pub quiz_title: String,
    pub score: u32,
    /// Number of scorable questions in the run.
    pub total: u32,
    pub percentage: u32,
    pub points_earned: u32,
    pub time_limit: u32,
    pub date: DateTime<Utc>,
}

/// Persisted player blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub name: String,
    #[serde(default = "default_time_limit")]
    pub default_time_limit: u32,
    #[serde(default)]
    pub results: Vec<QuizResult>,
}

const fn default_time_limit() -> u32 {
    DEFAULT_TIME_LIMIT
}

impl PlayerProfile {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_time_limit: DEFAULT_TIME_LIMIT,
            results: Vec::new(),
        }
    }

    pub fn set_default_time_limit(&mut self, seconds: u32) {
        self.default_time_limit = seconds;
    }

    /// Append a finished session to the history.
    pub fn record_result(
        &mut self,
        session: &QuizSession,
        points_earned: u32,
        now: DateTime<Utc>,
    ) {
        self.results.push(QuizResult {
            quiz_id: session.quiz_id().to_string(),
            quiz_title: session.title().to_string(),
            score: session.score(),
            total: session.scored_question_count() as u32,
            percentage: session.score_percentage(),
            points_earned,
            time_limit: session.time_limit(),
            date: now,
        });
    }

    /// All results for one quiz, newest last.
    #[must_use]
    pub fn results_for(&self, quiz_id: &str) -> Vec<&QuizResult> {
        self.results.iter().filter(|r| r.quiz_id == quiz_id).collect()
    }

    /// Best percentage achieved on a quiz, if it was ever played.
    #[must_use]
    pub fn best_percentage(&self, quiz_id: &str) -> Option<u32> {
        self.results_for(quiz_id)
            .iter()
            .map(|r| r.percentage)
            .max()
    }
}
