use quizdeck_core::{
    AdvanceOutcome, Outcome, QuestionKind, QuizFile, QuizSession, SubmitError, SubmittedAnswer,
    points_for,
};

const MIXED_QUIZ: &str = r#"{
    "config": {
        "title": "Capitals and commits",
        "description": "A mixed bag",
        "difficulty": 3,
        "questionCount": 4,
        "category": "General Knowledge",
        "createdAt": "2024-04-10"
    },
    "questions": [
        {
            "question": "Capital of France?",
            "choices": ["Paris", "Lyon", "Marseille", "Lille"],
            "correctAnswer": "Paris"
        },
        {
            "question": "Default git branch name since 2020?",
            "acceptedAnswers": ["main"]
        },
        {
            "question": "The first commit in a repository has no parent."
        },
        {
            "question": "2 + 2?",
            "choices": ["3", "4"],
            "correctAnswer": "4"
        }
    ]
}"#;

fn load() -> QuizFile {
    QuizFile::from_json(MIXED_QUIZ).unwrap()
}

#[test]
fn shuffling_is_deterministic_per_seed() {
    let a = QuizSession::new("mixed", load(), 10, 77);
    let b = QuizSession::new("mixed", load(), 10, 77);

    let prompts = |s: &QuizSession| -> Vec<String> {
        let mut s = s.clone();
        let mut out = Vec::new();
        loop {
            let Some(q) = s.current_question() else { break };
            out.push(q.question.clone());
            match q.kind() {
                QuestionKind::MultipleChoice => {
                    s.submit_choice(0).unwrap();
                }
                QuestionKind::FreeText => {
                    s.submit_text("x").unwrap();
                }
                QuestionKind::Informational => {
                    s.acknowledge_informational().unwrap();
                }
            }
            s.advance();
        }
        out
    };

    assert_eq!(prompts(&a), prompts(&b));
    // Some other seed must reorder; checking a handful keeps this free of
    // a fragile single-seed assumption.
    let baseline = prompts(&a);
    assert!((78..90)
        .any(|seed| prompts(&QuizSession::new("mixed", load(), 10, seed)) != baseline));
}

#[test]
fn perfect_run_scores_one_hundred_percent() {
    let mut session = QuizSession::new("mixed", load(), 5, 42);

    while let Some(question) = session.current_question().cloned() {
        match question.kind() {
            QuestionKind::MultipleChoice => {
                let idx = question.correct_choice_index().unwrap();
                assert_eq!(session.submit_choice(idx), Ok(Outcome::Correct));
            }
            QuestionKind::FreeText => {
                assert_eq!(session.submit_text(" MAIN "), Ok(Outcome::Correct));
            }
            QuestionKind::Informational => {
                assert_eq!(
                    session.acknowledge_informational(),
                    Ok(Outcome::Informational)
                );
            }
        }
        session.advance();
    }

    assert!(session.is_complete());
    assert_eq!(session.question_count(), 4);
    // The informational question is not part of the denominator.
    assert_eq!(session.scored_question_count(), 3);
    assert_eq!(session.score(), 3);
    assert_eq!(session.score_percentage(), 100);
    assert_eq!(points_for(session.score_percentage(), session.time_limit()), 5);
}

#[test]
fn two_of_three_lands_under_the_pass_threshold() {
    let mut session = QuizSession::new("mixed", load(), 10, 42);

    while let Some(question) = session.current_question().cloned() {
        match question.kind() {
            QuestionKind::MultipleChoice => {
                let idx = question.correct_choice_index().unwrap();
                session.submit_choice(idx).unwrap();
            }
            // Miss the only free-text question.
            QuestionKind::FreeText => {
                assert_eq!(session.submit_text("trunk"), Ok(Outcome::Incorrect));
            }
            QuestionKind::Informational => {
                session.acknowledge_informational().unwrap();
            }
        }
        session.advance();
    }

    assert_eq!(session.score(), 2);
    assert_eq!(session.score_percentage(), 67);
    assert_eq!(points_for(session.score_percentage(), session.time_limit()), 0);
}

#[test]
fn countdown_expiry_walks_the_whole_quiz() {
    let mut session = QuizSession::new("mixed", load(), 5, 1);

    loop {
        // Run the clock out on every question.
        let mut outcome = None;
        for _ in 0..5 {
            outcome = session.tick();
            if outcome.is_some() {
                break;
            }
        }
        let outcome = outcome.expect("timer must expire within the limit");
        assert!(
            matches!(outcome, Outcome::TimedOut | Outcome::Informational),
            "unexpected expiry outcome {outcome:?}"
        );
        // The answer log mirrors the outcome: informational questions are
        // never recorded as timeouts.
        let expected = if outcome == Outcome::Informational {
            SubmittedAnswer::Informational
        } else {
            SubmittedAnswer::TimedOut
        };
        assert_eq!(
            session.answers().last().map(|record| &record.answer),
            Some(&expected)
        );
        if session.advance() == AdvanceOutcome::Complete {
            break;
        }
    }

    assert_eq!(session.score(), 0);
    assert_eq!(session.score_percentage(), 0);
    assert_eq!(session.answers().len(), 4);
    assert!(session.answers().iter().all(|r| r.seconds_used == 5));
}

#[test]
fn informational_question_expires_as_informational() {
    let quiz = QuizFile::from_json(
        r#"{
            "config": {
                "title": "t", "description": "d", "difficulty": 1,
                "questionCount": 1, "category": "Education"
            },
            "questions": [ { "question": "Just so you know." } ]
        }"#,
    )
    .unwrap();
    let mut session = QuizSession::new("info", quiz, 5, 1);
    let mut outcome = None;
    while outcome.is_none() {
        outcome = session.tick();
    }
    assert_eq!(outcome, Some(Outcome::Informational));
    assert_eq!(session.answers()[0].answer, SubmittedAnswer::Informational);
    assert_eq!(session.score_percentage(), 0);
}

#[test]
fn submissions_must_match_the_question_kind() {
    let mut session = QuizSession::new("mixed", load(), 10, 42);
    let question = session.current_question().unwrap().clone();
    match question.kind() {
        QuestionKind::MultipleChoice => {
            assert_eq!(session.submit_text("paris"), Err(SubmitError::WrongKind));
            assert_eq!(
                session.acknowledge_informational(),
                Err(SubmitError::WrongKind)
            );
        }
        QuestionKind::FreeText => {
            assert_eq!(session.submit_choice(0), Err(SubmitError::WrongKind));
        }
        QuestionKind::Informational => {
            assert_eq!(session.submit_choice(0), Err(SubmitError::WrongKind));
            assert_eq!(session.submit_text("x"), Err(SubmitError::WrongKind));
        }
    }
    // A mismatched submission does not consume the question.
    assert!(session.answers().is_empty());
}
