use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/name")]
    PlayerName,
    #[at("/quiz")]
    Question,
    #[at("/result")]
    Result,
    #[at("/history")]
    History,
    #[at("/trophies")]
    Trophies,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub const fn from_phase(phase: &crate::app::Phase) -> Self {
        match phase {
            crate::app::Phase::Boot | crate::app::Phase::Selection => Self::Home,
            crate::app::Phase::PlayerName => Self::PlayerName,
            crate::app::Phase::Question => Self::Question,
            crate::app::Phase::Result => Self::Result,
            crate::app::Phase::History => Self::History,
            crate::app::Phase::Trophies => Self::Trophies,
        }
    }

    #[must_use]
    pub const fn to_phase(&self) -> Option<crate::app::Phase> {
        match self {
            // Preserve the current phase on Home / 404 so a reload during
            // boot stays in boot.
            Self::Home | Self::NotFound => None,
            Self::PlayerName => Some(crate::app::Phase::PlayerName),
            Self::Question => Some(crate::app::Phase::Question),
            Self::Result => Some(crate::app::Phase::Result),
            Self::History => Some(crate::app::Phase::History),
            Self::Trophies => Some(crate::app::Phase::Trophies),
        }
    }
}
