use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

const NEW_QUIZ_WINDOW_DAYS: i64 = 30;

/// A single quiz question.
///
/// A question is multiple-choice (`choices` + `correct_answer`), free-text
/// (`answer` and/or `accepted_answers`), or informational (neither). The kind
/// is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_answers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice,
    FreeText,
    /// Displayed but never scored.
    Informational,
}

impl Question {
    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        if !self.choices.is_empty() {
            QuestionKind::MultipleChoice
        } else if self.answer.is_some() || !self.accepted_answers.is_empty() {
            QuestionKind::FreeText
        } else {
            QuestionKind::Informational
        }
    }

    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.kind() != QuestionKind::Informational
    }

    /// Index of the correct choice in the (possibly shuffled) choice list.
    #[must_use]
    pub fn correct_choice_index(&self) -> Option<usize> {
        let correct = self.correct_answer.as_deref()?;
        self.choices.iter().position(|c| c == correct)
    }

    /// Accepted free-text answers; `accepted_answers` wins over `answer`
    /// when both are present.
    #[must_use]
    pub fn accepted(&self) -> Vec<&str> {
        if self.accepted_answers.is_empty() {
            self.answer.as_deref().into_iter().collect()
        } else {
            self.accepted_answers.iter().map(String::as_str).collect()
        }
    }
}

/// Per-quiz configuration block from the quiz JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Difficulty rating, 1-5.
    pub difficulty: u8,
    pub question_count: usize,
    pub category: String,
    /// ISO date (YYYY-MM-DD) the quiz was published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Blur question images until the feedback overlay reveals them.
    #[serde(default)]
    pub spoiler_mode: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl QuizConfig {
    #[must_use]
    pub fn created_date(&self) -> Option<NaiveDate> {
        let raw = self.created_at.as_deref()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Whether the quiz was published within the last 30 days.
    #[must_use]
    pub fn is_new(&self, today: NaiveDate) -> bool {
        self.created_date()
            .is_some_and(|created| (today - created).num_days() <= NEW_QUIZ_WINDOW_DAYS)
    }

    /// Rough play time in whole minutes for a given per-question time limit.
    #[must_use]
    pub fn estimated_minutes(&self, time_limit_secs: u32) -> u32 {
        let total = self.question_count as u32 * time_limit_secs;
        total.div_ceil(60).max(1)
    }
}

/// One quiz data file: `{ config, questions }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizFile {
    pub config: QuizConfig,
    pub questions: Vec<Question>,
}

impl QuizFile {
    /// Parse a quiz file from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a quiz file.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The quiz index file: ids of available quizzes plus the category list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuizIndex {
    #[serde(default)]
    pub quizzes: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl QuizIndex {
    /// Parse the index from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// What the quiz selector lists: a quiz id plus its config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    #[serde(flatten)]
    pub config: QuizConfig,
}

/// The validated listing the selector renders: one summary per loadable
/// quiz plus the category list from the index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizCatalog {
    pub quizzes: Vec<QuizSummary>,
    pub categories: Vec<String>,
}

/// Sort summaries newest-first; quizzes without a creation date go last.
pub fn sort_newest_first(summaries: &mut [QuizSummary]) {
    summaries.sort_by(|a, b| {
        b.config
            .created_date()
            .cmp(&a.config.created_date())
    });
}

/// Trophy rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cosmetic unlockable reward tied to a secret code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trophy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    pub rarity: Rarity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    /// Code printed on the locked card; redeeming it costs points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_code: Option<String>,
}

/// Container for all trophy data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrophyCatalog {
    pub trophies: Vec<Trophy>,
}

impl TrophyCatalog {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the catalog from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn find(&self, trophy_id: &str) -> Option<&Trophy> {
        self.trophies.iter().find(|t| t.id == trophy_id)
    }

    /// Look up a trophy by its printed card code, case-insensitively.
    #[must_use]
    pub fn find_by_printed_code(&self, code: &str) -> Option<&Trophy> {
        self.trophies.iter().find(|t| {
            t.secret_code
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(code))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_file_parses_both_question_kinds() {
        let json = r#"{
            "config": {
                "title": "Web basics",
                "description": "HTML and friends",
                "difficulty": 2,
                "questionCount": 2,
                "category": "Development",
                "createdAt": "2024-03-01",
                "tag": ["html"]
            },
            "questions": [
                {
                    "question": "What does CSS stand for?",
                    "choices": ["Cascading Style Sheets", "Creative Style System"],
                    "correctAnswer": "Cascading Style Sheets"
                },
                {
                    "question": "Name the default branch",
                    "acceptedAnswers": ["main", "master"]
                }
            ]
        }"#;

        let quiz = QuizFile::from_json(json).unwrap();
        assert_eq!(quiz.config.title, "Web basics");
        assert_eq!(quiz.questions[0].kind(), QuestionKind::MultipleChoice);
        assert_eq!(quiz.questions[0].correct_choice_index(), Some(0));
        assert_eq!(quiz.questions[1].kind(), QuestionKind::FreeText);
        assert_eq!(quiz.questions[1].accepted(), vec!["main", "master"]);
    }

    #[test]
    fn question_without_choices_or_answer_is_informational() {
        let q = Question {
            question: "Fun fact: the first quiz was in 1781.".into(),
            image_url: None,
            choices: vec![],
            correct_answer: None,
            answer: None,
            accepted_answers: vec![],
        };
        assert_eq!(q.kind(), QuestionKind::Informational);
        assert!(!q.is_scored());
    }

    #[test]
    fn accepted_answers_win_over_single_answer() {
        let q = Question {
            question: "Capital of France?".into(),
            image_url: None,
            choices: vec![],
            correct_answer: None,
            answer: Some("paris".into()),
            accepted_answers: vec!["Paris".into(), "paris".into()],
        };
        assert_eq!(q.accepted(), vec!["Paris", "paris"]);
    }

    #[test]
    fn quiz_is_new_within_thirty_days() {
        let cfg = QuizConfig {
            title: "t".into(),
            description: String::new(),
            difficulty: 1,
            question_count: 10,
            category: "Education".into(),
            created_at: Some("2024-06-01".into()),
            spoiler_mode: false,
            tag: vec![],
            image_url: None,
        };
        let recent = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let late = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert!(cfg.is_new(recent));
        assert!(!cfg.is_new(late));
    }

    #[test]
    fn estimated_minutes_rounds_up() {
        let cfg = QuizConfig {
            title: "t".into(),
            description: String::new(),
            difficulty: 1,
            question_count: 7,
            category: "Education".into(),
            created_at: None,
            spoiler_mode: false,
            tag: vec![],
            image_url: None,
        };
        // 7 questions * 10s = 70s -> 2 minutes
        assert_eq!(cfg.estimated_minutes(10), 2);
        assert_eq!(cfg.estimated_minutes(5), 1);
    }

    #[test]
    fn summaries_sort_newest_first_with_dateless_last() {
        let mk = |id: &str, created: Option<&str>| QuizSummary {
            id: id.into(),
            config: QuizConfig {
                title: id.into(),
                description: String::new(),
                difficulty: 1,
                question_count: 1,
                category: "Education".into(),
                created_at: created.map(String::from),
                spoiler_mode: false,
                tag: vec![],
                image_url: None,
            },
        };
        let mut all = vec![
            mk("old", Some("2023-01-01")),
            mk("undated", None),
            mk("new", Some("2024-05-05")),
        ];
        sort_newest_first(&mut all);
        let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "undated"]);
    }

    #[test]
    fn trophy_catalog_lookup_by_printed_code() {
        let catalog = TrophyCatalog::from_json(
            r#"{"trophies":[
                {"id":"gold-owl","name":"Gold Owl","image":"/images/owl.png",
                 "rarity":"legendary","secretCode":"OWL42WIN"}
            ]}"#,
        )
        .unwrap();
        assert!(catalog.find("gold-owl").is_some());
        let t = catalog.find_by_printed_code("owl42win").unwrap();
        assert_eq!(t.rarity, Rarity::Legendary);
        assert_eq!(t.rarity.label(), "Legendary");
    }
}
