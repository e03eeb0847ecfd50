//! Browser-backed data loading and persistence.

use gloo::storage::{LocalStorage, Storage};
use quizdeck_core::{
    PLAYER_STORAGE_KEY, PlayerProfile, ProfileStorage, QuizCatalog, QuizFile, QuizIndex,
    QuizSummary, REWARDS_STORAGE_KEY, RewardsLedger, TrophyCatalog, sort_newest_first,
    validate_quiz_json,
};

use crate::paths;

/// Shipped quiz ids, used when the index itself cannot be fetched.
const FALLBACK_QUIZ_IDS: [&str; 4] = [
    "rust-basics",
    "web-dev-interview-1",
    "movie-night",
    "animal-kingdom",
];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("request for {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not parse {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, LoadError> {
    let text = fetch_text(url).await?;
    serde_json::from_str(&text).map_err(|source| LoadError::Parse {
        url: url.to_string(),
        source,
    })
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let resp = gloo::net::http::Request::get(url)
        .send()
        .await
        .map_err(|err| LoadError::Request {
            url: url.to_string(),
            message: err.to_string(),
        })?;
    if resp.status() != 200 {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    resp.text().await.map_err(|err| LoadError::Request {
        url: url.to_string(),
        message: err.to_string(),
    })
}

/// Load the quiz index over the network.
///
/// # Errors
/// Fails when the index cannot be fetched or parsed.
pub async fn load_index() -> Result<QuizIndex, LoadError> {
    fetch_json(&paths::index_url()).await
}

/// Build the quiz catalog: resolve the index (falling back to the
/// built-in id list when it cannot be fetched), then load every quiz
/// config, skipping files that fail structural validation.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn load_catalog() -> QuizCatalog {
    let index = match load_index().await {
        Ok(index) => index,
        Err(err) => {
            log::warn!("quiz index unavailable, using the built-in list: {err}");
            QuizIndex {
                quizzes: FALLBACK_QUIZ_IDS.iter().map(ToString::to_string).collect(),
                categories: Vec::new(),
            }
        }
    };

    let mut quizzes = Vec::with_capacity(index.quizzes.len());
    for quiz_id in &index.quizzes {
        let raw = match fetch_text(&paths::quiz_url(quiz_id)).await {
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

    let mut categories = index.categories;
    if categories.is_empty() {
        for summary in &quizzes {
            if !categories.contains(&summary.config.category) {
                categories.push(summary.config.category.clone());
            }
        }
    }

    QuizCatalog {
        quizzes,
        categories,
    }
}

/// Load one quiz file over the network.
///
/// # Errors
/// Fails when the quiz cannot be fetched or parsed.
pub async fn load_quiz(quiz_id: &str) -> Result<QuizFile, LoadError> {
    fetch_json(&paths::quiz_url(quiz_id)).await
}

/// Load the trophy catalog; a missing catalog is not fatal, the trophies
/// page just renders empty.
pub async fn load_trophies() -> TrophyCatalog {
    match fetch_json(&paths::trophies_url()).await {
        Ok(catalog) => catalog,
        Err(err) => {
            log::warn!("trophy catalog unavailable: {err}");
            TrophyCatalog::default()
        }
    }
}

/// `localStorage` failure flattened to a message; the browser error
/// itself is not `Send + Sync`.
#[derive(Debug, thiserror::Error)]
#[error("storage error: {0}")]
pub struct StorageFault(String);

/// `localStorage`-backed implementation of [`ProfileStorage`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WebProfileStorage;

impl ProfileStorage for WebProfileStorage {
    type Error = StorageFault;

    fn load_rewards(&self) -> Result<Option<RewardsLedger>, Self::Error> {
        load_optional(REWARDS_STORAGE_KEY)
    }

    fn save_rewards(&self, ledger: &RewardsLedger) -> Result<(), Self::Error> {
        LocalStorage::set(REWARDS_STORAGE_KEY, ledger).map_err(|err| StorageFault(err.to_string()))
    }

    fn load_profile(&self) -> Result<Option<PlayerProfile>, Self::Error> {
        load_optional(PLAYER_STORAGE_KEY)
    }

    fn save_profile(&self, profile: &PlayerProfile) -> Result<(), Self::Error> {
        LocalStorage::set(PLAYER_STORAGE_KEY, profile).map_err(|err| StorageFault(err.to_string()))
    }

    fn clear(&self) -> Result<(), Self::Error> {
        LocalStorage::delete(REWARDS_STORAGE_KEY);
        LocalStorage::delete(PLAYER_STORAGE_KEY);
        Ok(())
    }
}

fn load_optional<T: serde::de::DeserializeOwned>(key: &str) -> Result<Option<T>, StorageFault> {
    match LocalStorage::get(key) {
        Ok(value) => Ok(Some(value)),
        Err(gloo::storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
        Err(err) => Err(StorageFault(err.to_string())),
    }
}

/// Fire-and-forget persistence for UI handlers: a full `localStorage`
/// (or a blocked one in private browsing) degrades to in-memory state
/// with a logged warning instead of a crash.
pub trait ProfileStorageExt: ProfileStorage {
    fn persist_rewards(&self, ledger: &RewardsLedger) {
        if let Err(err) = self.save_rewards(ledger) {
            log::warn!("rewards not persisted: {err}");
        }
    }

    fn persist_profile(&self, profile: &PlayerProfile) {
        if let Err(err) = self.save_profile(profile) {
            log::warn!("profile not persisted: {err}");
        }
    }
}

impl<S: ProfileStorage> ProfileStorageExt for S {}

/// Load the rewards ledger, swallowing storage errors into a fresh
/// ledger so a corrupt blob cannot brick the app.
#[must_use]
pub fn rewards_or_default() -> RewardsLedger {
    match WebProfileStorage.load_rewards() {
        Ok(Some(ledger)) => ledger,
        Ok(None) => RewardsLedger::default(),
        Err(err) => {
            log::warn!("stored rewards unreadable, starting fresh: {err}");
            RewardsLedger::default()
        }
    }
}

/// Load the player profile, treating unreadable blobs as absent.
#[must_use]
pub fn profile_or_none() -> Option<PlayerProfile> {
    match WebProfileStorage.load_profile() {
        Ok(profile) => profile,
        Err(err) => {
            log::warn!("stored profile unreadable: {err}");
            None
        }
    }
}
