//! QuizDeck Engine
//!
//! Platform-agnostic core for the QuizDeck trivia app. This crate holds
//! the quiz data model, session state machine, scoring and rewards
//! ledger, player history, quiz-file validation, and the offline cache
//! strategies, with no UI or platform dependencies.

pub mod cache;
pub mod data;
pub mod player;
pub mod rewards;
pub mod session;
pub mod shuffle;
pub mod validate;

// Re-export commonly used types
pub use cache::{
    CACHE_VERSION, CacheError, CacheStore, CacheStrategy, CachedResponse, NetworkFetch,
    PRECACHE_MANIFEST, ResponseSource, cache_first, cache_name, fetch_with_strategy,
    is_stale_cache, network_first, refresh_into_cache, stale_while_revalidate, strategy_for_url,
};
pub use data::{
    Question, QuestionKind, QuizCatalog, QuizConfig, QuizFile, QuizIndex, QuizSummary, Rarity,
    Trophy, TrophyCatalog, sort_newest_first,
};
pub use player::{PlayerProfile, QuizResult};
pub use rewards::{
    CODE_COST, MintError, MintedCode, PointsEvent, QuizReward, RedeemError, RewardsLedger,
    SecretCode, points_for,
};
pub use session::{
    AdvanceOutcome, AnswerRecord, DEFAULT_TIME_LIMIT, Outcome, PASS_THRESHOLD, QuestionPhase,
    QuizSession, SubmitError, SubmittedAnswer, TIME_LIMIT_CHOICES,
};
pub use shuffle::{prepare_questions, shuffle_choices, shuffle_questions};
pub use validate::{ValidationReport, validate_quiz_json, validate_quiz_value};

/// Storage key for the rewards ledger.
pub const REWARDS_STORAGE_KEY: &str = "quizdeck.rewards";
/// Storage key for the player profile.
pub const PLAYER_STORAGE_KEY: &str = "quizdeck.player";

/// Trait for abstracting data loading operations.
/// Platform-specific implementations should provide this.
pub trait DataLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the quiz index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be loaded or parsed.
    fn load_index(&self) -> Result<QuizIndex, Self::Error>;

    /// Load the raw JSON text of a quiz by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the quiz file cannot be loaded.
    fn load_quiz_raw(&self, quiz_id: &str) -> Result<String, Self::Error>;

    /// Load the trophy catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or parsed.
    fn load_trophies(&self) -> Result<TrophyCatalog, Self::Error>;
}

/// Trait for abstracting persistence of the rewards ledger and profile.
/// Platform-specific implementations should provide this.
pub trait ProfileStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the rewards ledger, or `None` on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored ledger cannot be read.
    fn load_rewards(&self) -> Result<Option<RewardsLedger>, Self::Error>;

    /// Persist the rewards ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written.
    fn save_rewards(&self, ledger: &RewardsLedger) -> Result<(), Self::Error>;

    /// Load the player profile, or `None` on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored profile cannot be read.
    fn load_profile(&self) -> Result<Option<PlayerProfile>, Self::Error>;

    /// Persist the player profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be written.
    fn save_profile(&self, profile: &PlayerProfile) -> Result<(), Self::Error>;

    /// Delete all stored progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be removed.
    fn clear(&self) -> Result<(), Self::Error>;
}

/// Main engine tying data loading, sessions, and persistence together.
pub struct QuizEngine<L, S>
where
    L: DataLoader,
    S: ProfileStorage,
{
    data_loader: L,
    storage: S,
}

impl<L, S> QuizEngine<L, S>
where
    L: DataLoader,
    S: ProfileStorage,
{
    pub const fn new(data_loader: L, storage: S) -> Self {
        Self {
            data_loader,
            storage,
        }
    }

    /// List available quizzes, newest first. Index entries whose quiz
    /// file fails validation are skipped with a warning rather than
    /// failing the whole list.
    ///
    /// # Errors
    ///
    /// Returns an error if the index itself cannot be loaded.
    pub fn available_quizzes(&self) -> Result<Vec<QuizSummary>, L::Error> {
        let index = self.data_loader.load_index()?;
        let mut quizzes = Vec::with_capacity(index.quizzes.len());
        for quiz_id in &index.quizzes {
            let raw = match self.data_loader.load_quiz_raw(quiz_id) {
                Ok(raw) => raw,
                Err(err) => {
                    log::warn!("skipping quiz '{quiz_id}': {err}");
                    continue;
                }
            };
            let report = validate_quiz_json(&raw);
            if !report.is_valid() {
                log::warn!(
                    "skipping quiz '{quiz_id}': {} validation error(s)",
                    report.errors.len()
                );
                continue;
            }
            match QuizFile::from_json(&raw) {
                Ok(quiz) => quizzes.push(QuizSummary {
                    id: quiz_id.clone(),
                    config: quiz.config,
                }),
                Err(err) => log::warn!("skipping quiz '{quiz_id}': {err}"),
            }
        }
        sort_newest_first(&mut quizzes);
        Ok(quizzes)
    }

    /// Load a quiz and start a session over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the quiz file cannot be loaded or parsed.
    pub fn start_session(
        &self,
        quiz_id: &str,
        time_limit: u32,
        seed: u64,
    ) -> Result<QuizSession, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let raw = self.data_loader.load_quiz_raw(quiz_id).map_err(Into::into)?;
        let quiz = QuizFile::from_json(&raw)?;
        Ok(QuizSession::new(quiz_id, quiz, time_limit, seed))
    }

    /// Settle a completed session: award points, append the result to
    /// the player's history, and persist both.
    ///
    /// # Errors
    ///
    /// Returns an error if stored state cannot be read or written.
    pub fn settle_session(
        &self,
        session: &QuizSession,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<QuizReward, S::Error> {
        let mut ledger = self.storage.load_rewards()?.unwrap_or_default();
        let reward = ledger.record_quiz(
            session.score_percentage(),
            session.title(),
            session.time_limit(),
            now,
        );
        self.storage.save_rewards(&ledger)?;

        let mut profile = self
            .storage
            .load_profile()?
            .unwrap_or_else(|| PlayerProfile::new(""));
        profile.record_result(session, reward.points_earned, now);
        self.storage.save_profile(&profile)?;

        Ok(reward)
    }

    /// Load the rewards ledger, or a fresh one on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored ledger cannot be read.
    pub fn rewards(&self) -> Result<RewardsLedger, S::Error> {
        Ok(self.storage.load_rewards()?.unwrap_or_default())
    }

    /// Persist the rewards ledger after a mint or redeem.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written.
    pub fn save_rewards(&self, ledger: &RewardsLedger) -> Result<(), S::Error> {
        self.storage.save_rewards(ledger)
    }

    /// Load the player profile, or `None` before the name prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored profile cannot be read.
    pub fn profile(&self) -> Result<Option<PlayerProfile>, S::Error> {
        self.storage.load_profile()
    }

    /// Persist the player profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be written.
    pub fn save_profile(&self, profile: &PlayerProfile) -> Result<(), S::Error> {
        self.storage.save_profile(profile)
    }

    /// Load the trophy catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn trophies(&self) -> Result<TrophyCatalog, L::Error> {
        self.data_loader.load_trophies()
    }

    /// Delete all stored progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data cannot be removed.
    pub fn reset_progress(&self) -> Result<(), S::Error> {
        self.storage.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    const GOOD_QUIZ: &str = r#"{
        "config": {
            "title": "Rust Basics", "description": "d", "difficulty": 2,
            "questionCount": 1, "category": "Development",
            "createdAt": "2024-05-01"
        },
        "questions": [
            { "question": "q", "choices": ["a", "b"], "correctAnswer": "a" }
        ]
    }"#;

    const BROKEN_QUIZ: &str = r#"{
        "config": {
            "title": "Broken", "description": "d", "difficulty": 2,
            "questionCount": 1, "category": "Development"
        },
        "questions": [
            { "question": "q", "choices": ["only one"], "correctAnswer": "only one" }
        ]
    }"#;

    #[derive(Clone, Default)]
    struct FixtureLoader {
        quizzes: HashMap<String, String>,
    }

    impl FixtureLoader {
        fn with_quizzes(pairs: &[(&str, &str)]) -> Self {
            Self {
                quizzes: pairs
                    .iter()
                    .map(|(id, raw)| (id.to_string(), raw.to_string()))
                    .collect(),
            }
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("no such quiz: {0}")]
    struct MissingQuiz(String);

    impl DataLoader for FixtureLoader {
        type Error = MissingQuiz;

        fn load_index(&self) -> Result<QuizIndex, Self::Error> {
            let mut quizzes: Vec<String> = self.quizzes.keys().cloned().collect();
            quizzes.sort();
            Ok(QuizIndex {
                quizzes,
                categories: vec!["Development".to_string()],
            })
        }

        fn load_quiz_raw(&self, quiz_id: &str) -> Result<String, Self::Error> {
            self.quizzes
                .get(quiz_id)
                .cloned()
                .ok_or_else(|| MissingQuiz(quiz_id.to_string()))
        }

        fn load_trophies(&self) -> Result<TrophyCatalog, Self::Error> {
            Ok(TrophyCatalog::default())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryStorage {
        rewards: Rc<RefCell<Option<RewardsLedger>>>,
        profile: Rc<RefCell<Option<PlayerProfile>>>,
    }

    impl ProfileStorage for MemoryStorage {
        type Error = Infallible;

        fn load_rewards(&self) -> Result<Option<RewardsLedger>, Self::Error> {
            Ok(self.rewards.borrow().clone())
        }

        fn save_rewards(&self, ledger: &RewardsLedger) -> Result<(), Self::Error> {
            *self.rewards.borrow_mut() = Some(ledger.clone());
            Ok(())
        }

        fn load_profile(&self) -> Result<Option<PlayerProfile>, Self::Error> {
            Ok(self.profile.borrow().clone())
        }

        fn save_profile(&self, profile: &PlayerProfile) -> Result<(), Self::Error> {
            *self.profile.borrow_mut() = Some(profile.clone());
            Ok(())
        }

        fn clear(&self) -> Result<(), Self::Error> {
            *self.rewards.borrow_mut() = None;
            *self.profile.borrow_mut() = None;
            Ok(())
        }
    }

    #[test]
    fn invalid_quizzes_are_skipped_from_listing() {
        let loader =
            FixtureLoader::with_quizzes(&[("rust-basics", GOOD_QUIZ), ("broken", BROKEN_QUIZ)]);
        let engine = QuizEngine::new(loader, MemoryStorage::default());

        let quizzes = engine.available_quizzes().unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].id, "rust-basics");
    }

    #[test]
    fn full_session_settles_into_storage() {
        let loader = FixtureLoader::with_quizzes(&[("rust-basics", GOOD_QUIZ)]);
        let storage = MemoryStorage::default();
        let engine = QuizEngine::new(loader, storage.clone());

        let mut session = engine.start_session("rust-basics", 5, 42).unwrap();
        let index = session.current_question().unwrap().correct_choice_index().unwrap();
        session.submit_choice(index).unwrap();
        assert_eq!(session.advance(), AdvanceOutcome::Complete);

        let reward = engine.settle_session(&session, chrono::Utc::now()).unwrap();
        assert_eq!(session.score_percentage(), 100);
        assert_eq!(reward.points_earned, 5);
        assert_eq!(reward.total_points, 5);
        assert!(reward.can_buy_code);

        let ledger = engine.rewards().unwrap();
        assert_eq!(ledger.total_points, 5);
        let profile = engine.profile().unwrap().unwrap();
        assert_eq!(profile.results.len(), 1);
        assert_eq!(profile.results[0].quiz_id, "rust-basics");
    }

    #[test]
    fn reset_progress_clears_both_stores() {
        let loader = FixtureLoader::with_quizzes(&[("rust-basics", GOOD_QUIZ)]);
        let storage = MemoryStorage::default();
        let engine = QuizEngine::new(loader, storage.clone());

        let mut session = engine.start_session("rust-basics", 10, 7).unwrap();
        session.submit_choice(0).unwrap();
        session.advance();
        engine.settle_session(&session, chrono::Utc::now()).unwrap();

        engine.reset_progress().unwrap();
        assert_eq!(engine.rewards().unwrap().total_points, 0);
        assert!(engine.profile().unwrap().is_none());
    }
}
