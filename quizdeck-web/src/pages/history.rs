use quizdeck_core::{PlayerProfile, QuizResult, RewardsLedger};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub profile: Option<PlayerProfile>,
    pub ledger: RewardsLedger,
    pub on_back: Callback<()>,
    pub on_reset: Callback<()>,
}

/// Results newest first for display.
#[must_use]
pub fn results_newest_first(profile: &PlayerProfile) -> Vec<&QuizResult> {
    let mut results: Vec<&QuizResult> = profile.results.iter().collect();
    results.reverse();
    results
}

fn result_row(result: &QuizResult) -> Html {
    html! {
        <tr>
            <td>{ result.quiz_title.clone() }</td>
            <td>{ format!("{} / {}", result.score, result.total) }</td>
            <td>{ format!("{}%", result.percentage) }</td>
            <td>{ format!("{}s", result.time_limit) }</td>
            <td>{ format!("+{} ⭐", result.points_earned) }</td>
            <td>{ result.date.format("%Y-%m-%d").to_string() }</td>
        </tr>
    }
}

#[function_component(HistoryPage)]
pub fn history_page(props: &Props) -> Html {
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let confirming = use_state(|| false);
    let ask_reset = {
        let confirming = confirming.clone();
        Callback::from(move |_| confirming.set(true))
    };
    let cancel_reset = {
        let confirming = confirming.clone();
        Callback::from(move |_| confirming.set(false))
    };
    let confirm_reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let body = match &props.profile {
        Some(profile) if !profile.results.is_empty() => {
            let rows = results_newest_first(profile)
                .into_iter()
                .map(result_row)
                .collect::<Html>();
            html! {
                <table class="history-table">
                    <thead>
                        <tr>
                            <th>{ "Quiz" }</th>
                            <th>{ "Score" }</th>
                            <th>{ "%" }</th>
                            <th>{ "Limit" }</th>
                            <th>{ "Points" }</th>
                            <th>{ "Date" }</th>
                        </tr>
                    </thead>
                    <tbody>{ rows }</tbody>
                </table>
            }
        }
        _ => html! { <p>{ "No quizzes played yet." }</p> },
    };

    html! {
        <section class="panel history">
            <h1>{ "History" }</h1>
            <p class="history-totals">
                { format!(
                    "{} ⭐ total, {} trophies unlocked",
                    props.ledger.total_points,
                    props.ledger.unlocked_trophies.len()
                ) }
            </p>
            { body }
            <div class="history-actions">
                <button type="button" onclick={back}>{ "Back to quizzes" }</button>
                if *confirming {
                    <span class="reset-confirm">
                        { "Delete all progress?" }
                        <button type="button" onclick={confirm_reset}>{ "Yes, delete" }</button>
                        <button type="button" onclick={cancel_reset}>{ "Keep it" }</button>
                    </span>
                } else {
                    <button type="button" class="danger" onclick={ask_reset}>
                        { "Reset progress" }
                    </button>
                }
            </div>
        </section>
    }
}
