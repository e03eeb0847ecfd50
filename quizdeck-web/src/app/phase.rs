use once_cell::sync::Lazy;
use quizdeck_core::{PlayerProfile, QuizSession};
use regex::Regex;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Boot,
    PlayerName,
    Selection,
    Question,
    Result,
    History,
    Trophies,
}

static CODE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9]{8}$").expect("code pattern is a valid regex")
});

/// Quick shape check for redeem input before hitting the ledger, so the
/// dialog can disable its submit button on obviously malformed codes.
#[must_use]
pub fn is_redeem_code_shaped(input: &str) -> bool {
    CODE_SHAPE.is_match(&input.trim().to_uppercase())
}

/// Where the app lands once boot finishes: returning players skip the
/// name prompt.
#[must_use]
pub fn phase_after_boot(profile: Option<&PlayerProfile>) -> Phase {
    match profile {
        Some(profile) if !profile.name.trim().is_empty() => Phase::Selection,
        _ => Phase::PlayerName,
    }
}

/// Phase matching the state of a running session, used after a reload
/// lands on a session-dependent route without a session.
#[must_use]
pub fn phase_for_session(session: Option<&QuizSession>) -> Phase {
    match session {
        Some(session) if session.is_complete() => Phase::Result,
        Some(_) => Phase::Question,
        None => Phase::Selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizdeck_core::QuizFile;

    #[test]
    fn redeem_code_shape_accepts_either_case_and_padding() {
        assert!(is_redeem_code_shaped("OWL42WIN"));
        assert!(is_redeem_code_shaped("  owl42win "));
        assert!(!is_redeem_code_shaped("SHORT"));
        assert!(!is_redeem_code_shaped("WAY-TOO-LONG-CODE"));
        assert!(!is_redeem_code_shaped("OWL42WI!"));
        assert!(!is_redeem_code_shaped(""));
    }

    #[test]
    fn boot_lands_on_name_prompt_for_new_players() {
        assert_eq!(phase_after_boot(None), Phase::PlayerName);
        let unnamed = PlayerProfile::new("   ");
        assert_eq!(phase_after_boot(Some(&unnamed)), Phase::PlayerName);
        let named = PlayerProfile::new("Lee");
        assert_eq!(phase_after_boot(Some(&named)), Phase::Selection);
    }

    #[test]
    fn session_state_maps_to_question_or_result() {
        assert_eq!(phase_for_session(None), Phase::Selection);

        let quiz = QuizFile::from_json(
            r#"{
                "config": {
                    "title": "t", "description": "d", "difficulty": 1,
                    "questionCount": 1, "category": "Education"
                },
                "questions": [
                    { "question": "q", "choices": ["a", "b"], "correctAnswer": "a" }
                ]
            }"#,
        )
        .unwrap();
        let mut session = QuizSession::new("t", quiz, 10, 1);
        assert_eq!(phase_for_session(Some(&session)), Phase::Question);
        session.submit_choice(0).unwrap();
        session.advance();
        assert_eq!(phase_for_session(Some(&session)), Phase::Result);
    }
}
