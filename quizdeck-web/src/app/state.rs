use crate::app::phase::Phase;
use quizdeck_core::{
    DEFAULT_TIME_LIMIT, MintedCode, PlayerProfile, QuizCatalog, QuizReward, QuizSession,
    RewardsLedger, TrophyCatalog,
};
use yew::prelude::*;

#[derive(Clone)]
pub struct AppState {
    pub phase: UseStateHandle<Phase>,
    pub catalog: UseStateHandle<QuizCatalog>,
    pub trophies: UseStateHandle<TrophyCatalog>,
    pub ledger: UseStateHandle<RewardsLedger>,
    pub profile: UseStateHandle<Option<PlayerProfile>>,
    pub session: UseStateHandle<Option<QuizSession>>,
    pub last_reward: UseStateHandle<Option<QuizReward>>,
    pub time_limit: UseStateHandle<u32>,
    pub free_mode: UseStateHandle<bool>,
    pub boot_ready: UseStateHandle<bool>,
    pub load_error: UseStateHandle<Option<String>>,
    pub show_redeem: UseStateHandle<bool>,
    pub redeem_feedback: UseStateHandle<Option<AttrValue>>,
    pub last_minted: UseStateHandle<Option<MintedCode>>,
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        phase: use_state(|| Phase::Boot),
        catalog: use_state(QuizCatalog::default),
        trophies: use_state(TrophyCatalog::default),
        ledger: use_state(RewardsLedger::default),
        profile: use_state(|| None::<PlayerProfile>),
        session: use_state(|| None::<QuizSession>),
        last_reward: use_state(|| None::<QuizReward>),
        time_limit: use_state(|| DEFAULT_TIME_LIMIT),
        free_mode: use_state(|| false),
        boot_ready: use_state(|| false),
        load_error: use_state(|| None::<String>),
        show_redeem: use_state(|| false),
        redeem_feedback: use_state(|| None::<AttrValue>),
        last_minted: use_state(|| None::<MintedCode>),
    }
}

impl AppState {
    /// Name shown in the header; empty until the prompt is answered.
    #[must_use]
    pub fn player_name(&self) -> String {
        self.profile
            .as_ref()
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }
}
