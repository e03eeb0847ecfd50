use crate::app::handlers::AppHandlers;
use crate::app::phase::Phase;
use crate::app::state::AppState;
use crate::router::Route;
use yew::prelude::*;

/// Dispatch the main view for the current phase and wrap it in the
/// app shell (header, redeem dialog, footer).
pub fn render_app(state: &AppState, handlers: &AppHandlers, route: Option<Route>) -> Html {
    let main_view = if matches!(route, None | Some(Route::NotFound)) {
        html! {
            <crate::pages::not_found::NotFoundPage
                on_go_home={handlers.go_selection.clone()}
            />
        }
    } else {
        render_main_view(state, handlers)
    };

    let redeem_submit = handlers.redeem_code.clone();
    let redeem_close = handlers.close_redeem.clone();

    html! {
        <>
            <crate::components::header::Header
                player_name={state.player_name()}
                total_points={state.ledger.total_points}
                on_home={handlers.go_selection.clone()}
                on_history={handlers.go_history.clone()}
                on_trophies={handlers.go_trophies.clone()}
            />
            <main id="main" role="main">
                <crate::components::redeem_dialog::RedeemDialog
                    open={*state.show_redeem}
                    feedback={(*state.redeem_feedback).clone()}
                    on_submit={redeem_submit}
                    on_close={redeem_close}
                />
                { main_view }
            </main>
            <crate::components::footer::Footer />
        </>
    }
}

fn render_main_view(state: &AppState, handlers: &AppHandlers) -> Html {
    match *state.phase {
        Phase::Boot => html! {
            <crate::pages::boot::BootPage error={(*state.load_error).clone()} />
        },
        Phase::PlayerName => html! {
            <crate::pages::player_name::PlayerNamePage
                on_submit={handlers.submit_name.clone()}
            />
        },
        Phase::Selection => html! {
            <crate::pages::selection::SelectionPage
                catalog={(*state.catalog).clone()}
                time_limit={*state.time_limit}
                free_mode={*state.free_mode}
                player_name={state.player_name()}
                profile={(*state.profile).clone()}
                load_error={(*state.load_error).clone()}
                on_pick={handlers.start_quiz.clone()}
                on_time_limit={handlers.choose_time_limit.clone()}
                on_free_mode={handlers.toggle_free_mode.clone()}
            />
        },
        Phase::Question => match &*state.session {
            Some(session) => html! {
                <crate::pages::question::QuestionPage
                    session={session.clone()}
                    free_mode={*state.free_mode}
                    on_finish={handlers.finish_quiz.clone()}
                    on_quit={handlers.quit_quiz.clone()}
                />
            },
            None => html! {
                <crate::pages::selection::SelectionPage
                    catalog={(*state.catalog).clone()}
                    time_limit={*state.time_limit}
                    free_mode={*state.free_mode}
                    player_name={state.player_name()}
                    profile={(*state.profile).clone()}
                    load_error={(*state.load_error).clone()}
                    on_pick={handlers.start_quiz.clone()}
                    on_time_limit={handlers.choose_time_limit.clone()}
                    on_free_mode={handlers.toggle_free_mode.clone()}
                />
            },
        },
        Phase::Result => html! {
            <crate::pages::result::ResultPage
                session={(*state.session).clone()}
                reward={*state.last_reward}
                on_replay={handlers.start_quiz.clone()}
                on_back={handlers.go_selection.clone()}
                on_trophies={handlers.go_trophies.clone()}
            />
        },
        Phase::History => html! {
            <crate::pages::history::HistoryPage
                profile={(*state.profile).clone()}
                ledger={(*state.ledger).clone()}
                on_back={handlers.go_selection.clone()}
                on_reset={handlers.reset_progress.clone()}
            />
        },
        Phase::Trophies => html! {
            <crate::pages::trophies::TrophiesPage
                catalog={(*state.trophies).clone()}
                ledger={(*state.ledger).clone()}
                last_minted={(*state.last_minted).clone()}
                on_mint={handlers.mint_code.clone()}
                on_open_redeem={handlers.open_redeem.clone()}
                on_back={handlers.go_selection.clone()}
            />
        },
    }
}
