#[cfg(target_arch = "wasm32")]
use crate::app::phase::phase_after_boot;
#[cfg(target_arch = "wasm32")]
use crate::app::state::AppState;
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;

/// Load everything the shell needs before leaving the boot screen: the
/// quiz index and trophy catalog over the network, stored rewards and
/// profile from `localStorage`.
#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_bootstrap(app_state: &AppState) {
    let state = app_state.clone();

    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let catalog = crate::platform::load_catalog().await;
            if catalog.quizzes.is_empty() {
                state
                    .load_error
                    .set(Some("No quizzes could be loaded.".to_string()));
            }
            state.catalog.set(catalog);
            state.trophies.set(crate::platform::load_trophies().await);
            state.ledger.set(crate::platform::rewards_or_default());

            let profile = crate::platform::profile_or_none();
            if let Some(profile) = &profile {
                state.time_limit.set(profile.default_time_limit);
            }
            state.phase.set(phase_after_boot(profile.as_ref()));
            state.profile.set(profile);
            state.boot_ready.set(true);
        });
        || {}
    });
}
