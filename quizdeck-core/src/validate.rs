//! Structural validation of quiz JSON files.
//!
//! Works on raw `serde_json::Value` so a file missing whole sections still
//! produces a readable error list instead of a deserialization failure.
//! A file is valid iff the error list is empty; warnings never fail a file.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

pub const VALID_DIFFICULTIES: std::ops::RangeInclusive<u64> = 1..=5;

/// Recommended categories; anything else is a warning, not an error.
pub const VALID_CATEGORIES: [&str; 5] = [
    "Development",
    "Entertainment",
    "Coaching",
    "Education",
    "General Knowledge",
];

pub const VALID_IMAGE_FORMATS: [&str; 6] = [".jpg", ".jpeg", ".png", ".webp", ".gif", ".svg"];

const MIN_CHOICES: usize = 2;
const RECOMMENDED_MAX_CHOICES: usize = 6;

/// Outcome of validating one quiz file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub question_count: usize,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validate a quiz file from its JSON text.
#[must_use]
pub fn validate_quiz_json(raw: &str) -> ValidationReport {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => validate_quiz_value(&value),
        Err(err) => {
            let mut report = ValidationReport::default();
            report.error(format!("JSON parse error: {err}"));
            report
        }
    }
}

/// Validate an already parsed quiz document.
#[must_use]
pub fn validate_quiz_value(value: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    let config = value.get("config");
    let questions = value.get("questions");
    if config.is_none() {
        report.error("missing \"config\" property");
    }
    if questions.is_none() {
        report.error("missing \"questions\" property");
    }
    if !report.is_valid() {
        return report;
    }

    if let Some(config) = config {
        validate_config(config, &mut report);
    }
    if let Some(questions) = questions {
        validate_questions(questions, config, &mut report);
    }
    report
}

fn validate_config(config: &Value, report: &mut ValidationReport) {
    for prop in ["title", "description", "difficulty", "questionCount", "category"] {
        if config.get(prop).is_none_or(Value::is_null) {
            report.error(format!("config.{prop} is required"));
        }
    }

    if let Some(difficulty) = config.get("difficulty")
        && !difficulty.is_null()
    {
        match difficulty.as_u64() {
            Some(d) if VALID_DIFFICULTIES.contains(&d) => {}
            _ => report.error(format!(
                "config.difficulty invalid: {difficulty}; accepted values: 1-5"
            )),
        }
    }

    if let Some(category) = config.get("category").and_then(Value::as_str)
        && !VALID_CATEGORIES.contains(&category)
    {
        report.warn(format!(
            "config.category \"{category}\" is non-standard; recommended: {}",
            VALID_CATEGORIES.join(", ")
        ));
    }

    if let Some(count) = config.get("questionCount")
        && !count.is_null()
        && !count.is_u64()
    {
        report.error("config.questionCount must be a number");
    }

    if let Some(spoiler) = config.get("spoilerMode")
        && !spoiler.is_boolean()
    {
        report.error("config.spoilerMode must be a boolean");
    }

    if let Some(tag) = config.get("tag")
        && !tag.is_array()
    {
        report.error("config.tag must be an array");
    }

    if let Some(created) = config.get("createdAt").and_then(Value::as_str)
        && NaiveDate::parse_from_str(created, "%Y-%m-%d").is_err()
    {
        report.error(format!(
            "config.createdAt \"{created}\" must be a valid YYYY-MM-DD date"
        ));
    }
}

fn validate_questions(questions: &Value, config: Option<&Value>, report: &mut ValidationReport) {
    let Some(items) = questions.as_array() else {
        report.error("questions must be an array");
        return;
    };
    report.question_count = items.len();

    if let Some(expected) = config
        .and_then(|c| c.get("questionCount"))
        .and_then(Value::as_u64)
        && expected as usize != items.len()
    {
        report.warn(format!(
            "config.questionCount = {expected} but {} questions found",
            items.len()
        ));
    }

    for (index, q) in items.iter().enumerate() {
        validate_question(q, index + 1, report);
    }
}

fn validate_question(q: &Value, number: usize, report: &mut ValidationReport) {
    if q.get("question").and_then(Value::as_str).is_none() {
        report.error(format!("question {number}: missing \"question\" prompt"));
    }

    let choices = q.get("choices").and_then(Value::as_array);
    let is_multiple_choice = choices.is_some();
    let is_text_input = q.get("acceptedAnswers").is_some() || q.get("answer").is_some();

    if let Some(choices) = choices {
        if q.get("correctAnswer").is_none() {
            report.error(format!(
                "question {number}: \"correctAnswer\" is required for multiple choice"
            ));
        }
        if choices.len() < MIN_CHOICES {
            report.error(format!("question {number}: at least {MIN_CHOICES} choices required"));
        }
        if choices.len() > RECOMMENDED_MAX_CHOICES {
            report.warn(format!(
                "question {number}: more than {RECOMMENDED_MAX_CHOICES} choices ({}); recommended: 4",
                choices.len()
            ));
        }

        let texts: Vec<&str> = choices.iter().filter_map(Value::as_str).collect();
        let mut unique = texts.clone();
        unique.sort_unstable();
        unique.dedup();
        if unique.len() != texts.len() {
            report.error(format!("question {number}: duplicate choices detected"));
        }

        if let Some(correct) = q.get("correctAnswer").and_then(Value::as_str)
            && !texts.contains(&correct)
        {
            report.error(format!(
                "question {number}: correctAnswer \"{correct}\" is not among the choices"
            ));
        }
    }

    if is_text_input {
        match q.get("acceptedAnswers") {
            Some(accepted) => match accepted.as_array() {
                Some(list) if list.is_empty() => {
                    report.error(format!("question {number}: \"acceptedAnswers\" must not be empty"));
                }
                Some(_) => {}
                None => {
                    report.error(format!("question {number}: \"acceptedAnswers\" must be an array"));
                }
            },
            None => {
                if let Some(answer) = q.get("answer")
                    && !answer.is_string()
                {
                    report.error(format!("question {number}: \"answer\" must be a string"));
                }
            }
        }
        if q.get("acceptedAnswers").is_some() && q.get("answer").is_some() {
            report.warn(format!(
                "question {number}: both \"acceptedAnswers\" and \"answer\" present; \"acceptedAnswers\" wins"
            ));
        }
    }

    // Neither shape: allowed only as an informational question, which must
    // still carry a prompt; flag the empty object case loudly.
    if !is_multiple_choice && !is_text_input && q.get("question").is_none() {
        report.error(format!(
            "question {number}: needs \"choices\" + \"correctAnswer\", \"answer\"/\"acceptedAnswers\", or a prompt"
        ));
    }

    if let Some(image) = q.get("imageUrl").and_then(Value::as_str) {
        let lower = image.to_lowercase();
        if !VALID_IMAGE_FORMATS.iter().any(|ext| lower.ends_with(ext)) {
            report.warn(format!(
                "question {number}: image \"{image}\" has a non-standard format; recommended: {}",
                VALID_IMAGE_FORMATS.join(", ")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_config_or_questions_is_fatal() {
        let report = validate_quiz_value(&json!({ "questions": [] }));
        assert!(!report.is_valid());
        assert_eq!(report.errors, vec!["missing \"config\" property"]);

        let report = validate_quiz_value(&json!({ "config": {} }));
        assert_eq!(report.errors, vec!["missing \"questions\" property"]);

        let report = validate_quiz_value(&json!({}));
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn unparsable_json_reports_one_error() {
        let report = validate_quiz_json("{ not json");
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("JSON parse error"));
    }

    #[test]
    fn difficulty_out_of_range_is_an_error() {
        let report = validate_quiz_value(&json!({
            "config": {
                "title": "t", "description": "d", "difficulty": 9,
                "questionCount": 0, "category": "Education"
            },
            "questions": []
        }));
        assert!(report.errors.iter().any(|e| e.contains("difficulty")));
    }

    #[test]
    fn non_standard_category_only_warns() {
        let report = validate_quiz_value(&json!({
            "config": {
                "title": "t", "description": "d", "difficulty": 3,
                "questionCount": 0, "category": "Cooking"
            },
            "questions": []
        }));
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.contains("Cooking")));
    }

    #[test]
    fn multiple_choice_rules_are_enforced() {
        let report = validate_quiz_value(&json!({
            "config": {
                "title": "t", "description": "d", "difficulty": 1,
                "questionCount": 2, "category": "Education"
            },
            "questions": [
                { "question": "one choice", "choices": ["a"], "correctAnswer": "a" },
                { "question": "bad correct", "choices": ["a", "a"], "correctAnswer": "b" }
            ]
        }));
        assert!(report.errors.iter().any(|e| e.contains("at least 2 choices")));
        assert!(report.errors.iter().any(|e| e.contains("duplicate choices")));
        assert!(report.errors.iter().any(|e| e.contains("not among the choices")));
    }

    #[test]
    fn question_count_mismatch_and_invalid_date_are_reported() {
        let report = validate_quiz_value(&json!({
            "config": {
                "title": "t", "description": "d", "difficulty": 1,
                "questionCount": 5, "category": "Education",
                "createdAt": "2024-13-40"
            },
            "questions": [
                { "question": "q", "answer": "a" }
            ]
        }));
        assert!(report.errors.iter().any(|e| e.contains("createdAt")));
        assert!(report.warnings.iter().any(|w| w.contains("questionCount = 5")));
        assert_eq!(report.question_count, 1);
    }

    #[test]
    fn empty_accepted_answers_is_an_error() {
        let report = validate_quiz_value(&json!({
            "config": {
                "title": "t", "description": "d", "difficulty": 1,
                "questionCount": 1, "category": "Education"
            },
            "questions": [
                { "question": "q", "acceptedAnswers": [], "answer": "a" }
            ]
        }));
        assert!(report.errors.iter().any(|e| e.contains("must not be empty")));
        assert!(report.warnings.iter().any(|w| w.contains("wins")));
    }

    #[test]
    fn clean_quiz_passes() {
        let report = validate_quiz_json(
            r#"{
                "config": {
                    "title": "Web", "description": "d", "difficulty": 2,
                    "questionCount": 1, "category": "Development",
                    "createdAt": "2024-02-29"
                },
                "questions": [
                    { "question": "q", "choices": ["a", "b"], "correctAnswer": "b",
                      "imageUrl": "/images/q.png" }
                ]
            }"#,
        );
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
        assert_eq!(report.question_count, 1);
    }
}
