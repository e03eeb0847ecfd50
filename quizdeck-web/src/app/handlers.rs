use chrono::{DateTime, Utc};
use quizdeck_core::{PlayerProfile, QuizReward, QuizSession, RewardsLedger};
use yew::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::app::phase::Phase;
#[cfg(target_arch = "wasm32")]
use crate::app::state::AppState;
#[cfg(target_arch = "wasm32")]
use crate::platform::{ProfileStorageExt, WebProfileStorage};

/// All callbacks the pages hang off. Built once per render from the
/// state handles.
#[derive(Clone, PartialEq)]
pub struct AppHandlers {
    pub submit_name: Callback<String>,
    pub choose_time_limit: Callback<u32>,
    pub toggle_free_mode: Callback<bool>,
    pub start_quiz: Callback<String>,
    pub finish_quiz: Callback<QuizSession>,
    pub quit_quiz: Callback<()>,
    pub go_selection: Callback<()>,
    pub go_history: Callback<()>,
    pub go_trophies: Callback<()>,
    pub open_redeem: Callback<()>,
    pub close_redeem: Callback<()>,
    pub redeem_code: Callback<String>,
    pub mint_code: Callback<String>,
    pub reset_progress: Callback<()>,
}

/// Apply a finished session to the ledger and profile. Pure so the
/// settle flow is testable off-browser; the caller persists the results.
#[must_use]
pub fn settle_finished_session(
    mut ledger: RewardsLedger,
    profile: Option<PlayerProfile>,
    session: &QuizSession,
    now: DateTime<Utc>,
) -> (RewardsLedger, PlayerProfile, QuizReward) {
    let reward = ledger.record_quiz(
        session.score_percentage(),
        session.title(),
        session.time_limit(),
        now,
    );
    let mut profile = profile.unwrap_or_else(|| PlayerProfile::new(""));
    profile.record_result(session, reward.points_earned, now);
    (ledger, profile, reward)
}

#[cfg(target_arch = "wasm32")]
fn fresh_seed() -> u64 {
    js_sys::Date::now().to_bits()
}

#[cfg(target_arch = "wasm32")]
impl AppHandlers {
    #[allow(clippy::too_many_lines)]
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        let submit_name = {
            let state = state.clone();
            Callback::from(move |name: String| {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return;
                }
                let mut profile = (*state.profile)
                    .clone()
                    .unwrap_or_else(|| PlayerProfile::new(""));
                profile.name = name;
                WebProfileStorage.persist_profile(&profile);
                state.profile.set(Some(profile));
                state.phase.set(Phase::Selection);
            })
        };

        let choose_time_limit = {
            let state = state.clone();
            Callback::from(move |seconds: u32| {
                state.time_limit.set(seconds);
                if let Some(mut profile) = (*state.profile).clone() {
                    profile.set_default_time_limit(seconds);
                    WebProfileStorage.persist_profile(&profile);
                    state.profile.set(Some(profile));
                }
            })
        };

        let toggle_free_mode = {
            let state = state.clone();
            Callback::from(move |enabled: bool| state.free_mode.set(enabled))
        };

        let start_quiz = {
            let state = state.clone();
            Callback::from(move |quiz_id: String| {
                let state = state.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    match crate::platform::load_quiz(&quiz_id).await {
                        Ok(quiz) => {
                            let session =
                                QuizSession::new(quiz_id, quiz, *state.time_limit, fresh_seed());
                            state.last_reward.set(None);
                            state.session.set(Some(session));
                            state.phase.set(Phase::Question);
                        }
                        Err(err) => {
                            log::error!("quiz failed to load: {err}");
                            state.load_error.set(Some(err.to_string()));
                        }
                    }
                });
            })
        };

        let finish_quiz = {
            let state = state.clone();
            Callback::from(move |session: QuizSession| {
                // Free-mode runs are practice: shown, never settled.
                if *state.free_mode {
                    state.last_reward.set(None);
                    state.session.set(Some(session));
                    state.phase.set(Phase::Result);
                    return;
                }
                let (ledger, profile, reward) = settle_finished_session(
                    (*state.ledger).clone(),
                    (*state.profile).clone(),
                    &session,
                    Utc::now(),
                );
                WebProfileStorage.persist_rewards(&ledger);
                WebProfileStorage.persist_profile(&profile);
                state.ledger.set(ledger);
                state.profile.set(Some(profile));
                state.last_reward.set(Some(reward));
                state.session.set(Some(session));
                state.phase.set(Phase::Result);
            })
        };

        let quit_quiz = {
            let state = state.clone();
            Callback::from(move |()| {
                state.session.set(None);
                state.phase.set(Phase::Selection);
            })
        };

        let go_selection = {
            let state = state.clone();
            Callback::from(move |()| state.phase.set(Phase::Selection))
        };
        let go_history = {
            let state = state.clone();
            Callback::from(move |()| state.phase.set(Phase::History))
        };
        let go_trophies = {
            let state = state.clone();
            Callback::from(move |()| state.phase.set(Phase::Trophies))
        };

        let open_redeem = {
            let state = state.clone();
            Callback::from(move |()| {
                state.redeem_feedback.set(None);
                state.show_redeem.set(true);
            })
        };
        let close_redeem = {
            let state = state.clone();
            Callback::from(move |()| state.show_redeem.set(false))
        };

        let redeem_code = {
            let state = state.clone();
            Callback::from(move |input: String| {
                let mut ledger = (*state.ledger).clone();
                match ledger.redeem_input(&input, &state.trophies, Utc::now()) {
                    Ok(trophy_id) => {
                        WebProfileStorage.persist_rewards(&ledger);
                        let name = state
                            .trophies
                            .find(&trophy_id)
                            .map_or(trophy_id, |t| t.name.clone());
                        state.ledger.set(ledger);
                        state
                            .redeem_feedback
                            .set(Some(AttrValue::from(format!("Unlocked: {name}"))));
                    }
                    Err(err) => {
                        state
                            .redeem_feedback
                            .set(Some(AttrValue::from(err.to_string())));
                    }
                }
            })
        };

        let mint_code = {
            let state = state.clone();
            Callback::from(move |trophy_id: String| {
                use rand::SeedableRng;
                let mut ledger = (*state.ledger).clone();
                let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(fresh_seed());
                match ledger.mint_code(&trophy_id, &mut rng, Utc::now()) {
                    Ok(minted) => {
                        WebProfileStorage.persist_rewards(&ledger);
                        state.ledger.set(ledger);
                        state.last_minted.set(Some(minted));
                    }
                    Err(err) => {
                        log::warn!("mint refused: {err}");
                        state
                            .redeem_feedback
                            .set(Some(AttrValue::from(err.to_string())));
                    }
                }
            })
        };

        let reset_progress = {
            let state = state.clone();
            Callback::from(move |()| {
                use quizdeck_core::ProfileStorage;
                if let Err(err) = WebProfileStorage.clear() {
                    log::error!("reset failed: {err}");
                    return;
                }
                state.ledger.set(RewardsLedger::default());
                state.profile.set(None);
                state.session.set(None);
                state.last_reward.set(None);
                state.phase.set(Phase::PlayerName);
            })
        };

        Self {
            submit_name,
            choose_time_limit,
            toggle_free_mode,
            start_quiz,
            finish_quiz,
            quit_quiz,
            go_selection,
            go_history,
            go_trophies,
            open_redeem,
            close_redeem,
            redeem_code,
            mint_code,
            reset_progress,
        }
    }
}
