use quizdeck_core::{validate_quiz_json, validate_quiz_value};
use serde_json::json;

#[test]
fn a_realistic_quiz_validates_cleanly() {
    let report = validate_quiz_json(
        r#"{
            "config": {
                "title": "Frontend Fundamentals",
                "description": "HTML, CSS and a little JS",
                "difficulty": 2,
                "questionCount": 3,
                "category": "Development",
                "createdAt": "2024-03-15",
                "spoilerMode": false,
                "tag": ["frontend", "beginner"]
            },
            "questions": [
                {
                    "question": "Which tag makes a hyperlink?",
                    "choices": ["<a>", "<link>", "<href>", "<url>"],
                    "correctAnswer": "<a>",
                    "imageUrl": "/images/questions/anchor.webp"
                },
                {
                    "question": "CSS property for text size?",
                    "acceptedAnswers": ["font-size"]
                },
                {
                    "question": "The DOM is a tree."
                }
            ]
        }"#,
    );
    assert!(report.is_valid(), "errors: {:?}", report.errors);
    assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    assert_eq!(report.question_count, 3);
}

#[test]
fn every_required_config_field_is_checked() {
    let report = validate_quiz_value(&json!({ "config": {}, "questions": [] }));
    for field in ["title", "description", "difficulty", "questionCount", "category"] {
        assert!(
            report.errors.iter().any(|e| e.contains(field)),
            "no error for missing {field}: {:?}",
            report.errors
        );
    }
}

#[test]
fn errors_fail_a_file_but_warnings_do_not() {
    // Non-standard category, 7 choices, image with an odd extension: all
    // warnings, still valid.
    let warned = validate_quiz_value(&json!({
        "config": {
            "title": "t", "description": "d", "difficulty": 4,
            "questionCount": 1, "category": "Astrology"
        },
        "questions": [{
            "question": "pick one",
            "choices": ["a", "b", "c", "d", "e", "f", "g"],
            "correctAnswer": "a",
            "imageUrl": "/images/q.bmp"
        }]
    }));
    assert!(warned.is_valid());
    assert_eq!(warned.warnings.len(), 3, "warnings: {:?}", warned.warnings);

    // One real error flips the file invalid.
    let failed = validate_quiz_value(&json!({
        "config": {
            "title": "t", "description": "d", "difficulty": 4,
            "questionCount": 1, "category": "Development"
        },
        "questions": [{
            "question": "pick one",
            "choices": ["a", "b"],
            "correctAnswer": "z"
        }]
    }));
    assert!(!failed.is_valid());
    assert_eq!(failed.errors.len(), 1);
}

#[test]
fn question_shape_errors_carry_the_question_number() {
    let report = validate_quiz_value(&json!({
        "config": {
            "title": "t", "description": "d", "difficulty": 1,
            "questionCount": 3, "category": "Development"
        },
        "questions": [
            { "question": "fine", "choices": ["a", "b"], "correctAnswer": "a" },
            { "choices": ["a", "b"], "correctAnswer": "a" },
            { "question": "dup", "choices": ["same", "same"], "correctAnswer": "same" }
        ]
    }));
    assert!(report.errors.iter().any(|e| e.starts_with("question 2:")));
    assert!(report.errors.iter().any(|e| e.starts_with("question 3:")));
    assert!(!report.errors.iter().any(|e| e.starts_with("question 1:")));
}

#[test]
fn free_text_answer_shapes() {
    let report = validate_quiz_value(&json!({
        "config": {
            "title": "t", "description": "d", "difficulty": 1,
            "questionCount": 3, "category": "Development"
        },
        "questions": [
            { "question": "ok string answer", "answer": "yes" },
            { "question": "bad answer type", "answer": 42 },
            { "question": "bad accepted type", "acceptedAnswers": "yes" }
        ]
    }));
    assert_eq!(report.errors.len(), 2, "errors: {:?}", report.errors);
    assert!(report.errors.iter().any(|e| e.contains("\"answer\" must be a string")));
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("\"acceptedAnswers\" must be an array")));
}

#[test]
fn question_count_mismatch_is_a_warning_only() {
    let report = validate_quiz_value(&json!({
        "config": {
            "title": "t", "description": "d", "difficulty": 1,
            "questionCount": 10, "category": "Development"
        },
        "questions": [
            { "question": "q", "choices": ["a", "b"], "correctAnswer": "a" }
        ]
    }));
    assert!(report.is_valid());
    assert!(report.warnings.iter().any(|w| w.contains("questionCount = 10")));
}

#[test]
fn questions_must_be_an_array() {
    let report = validate_quiz_value(&json!({
        "config": {
            "title": "t", "description": "d", "difficulty": 1,
            "questionCount": 0, "category": "Development"
        },
        "questions": { "oops": true }
    }));
    assert!(!report.is_valid());
    assert!(report.errors.iter().any(|e| e.contains("must be an array")));
    assert_eq!(report.question_count, 0);
}
