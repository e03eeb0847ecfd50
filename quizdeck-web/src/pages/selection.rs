use chrono::Utc;
use quizdeck_core::{PlayerProfile, QuizCatalog, QuizSummary, TIME_LIMIT_CHOICES, sort_newest_first};
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::components::quiz_card::QuizCard;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub catalog: QuizCatalog,
    pub time_limit: u32,
    pub free_mode: bool,
    #[prop_or_default]
    pub player_name: String,
    #[prop_or_default]
    pub profile: Option<PlayerProfile>,
    #[prop_or_default]
    pub load_error: Option<String>,
    pub on_pick: Callback<String>,
    pub on_time_limit: Callback<u32>,
    pub on_free_mode: Callback<bool>,
}

/// Quizzes of one category, newest first.
#[must_use]
pub fn quizzes_in_category(catalog: &QuizCatalog, category: &str) -> Vec<QuizSummary> {
    let mut quizzes: Vec<QuizSummary> = catalog
        .quizzes
        .iter()
        .filter(|q| q.config.category == category)
        .cloned()
        .collect();
    sort_newest_first(&mut quizzes);
    quizzes
}

/// Categories that actually contain quizzes, in index order.
#[must_use]
pub fn populated_categories(catalog: &QuizCatalog) -> Vec<String> {
    catalog
        .categories
        .iter()
        .filter(|c| catalog.quizzes.iter().any(|q| &q.config.category == *c))
        .cloned()
        .collect()
}

/// Case-insensitive match against title, description, and tags.
#[must_use]
pub fn matches_query(summary: &QuizSummary, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    summary.config.title.to_lowercase().contains(&query)
        || summary.config.description.to_lowercase().contains(&query)
        || summary
            .config
            .tag
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query))
}

/// Catalog narrowed to quizzes matching the search query.
#[must_use]
pub fn filtered_catalog(catalog: &QuizCatalog, query: &str) -> QuizCatalog {
    QuizCatalog {
        quizzes: catalog
            .quizzes
            .iter()
            .filter(|q| matches_query(q, query))
            .cloned()
            .collect(),
        categories: catalog.categories.clone(),
    }
}

/// The hero slot: the most recently created quiz, if any carries a date.
#[must_use]
pub fn newest_quiz(catalog: &QuizCatalog) -> Option<&QuizSummary> {
    catalog
        .quizzes
        .iter()
        .filter(|q| q.config.created_date().is_some())
        .max_by_key(|q| q.config.created_date())
}

#[function_component(SelectionPage)]
pub fn selection_page(props: &Props) -> Html {
    let today = Utc::now().date_naive();
    let query = use_state(String::new);

    let on_search = {
        let query = query.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(el) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                query.set(el.value());
            }
        })
    };

    let on_free_toggle = {
        let cb = props.on_free_mode.clone();
        let enabled = props.free_mode;
        Callback::from(move |_| cb.emit(!enabled))
    };

    let best_for = |quiz_id: &str| {
        props
            .profile
            .as_ref()
            .and_then(|p| p.best_percentage(quiz_id))
    };

    let render_card = |summary: QuizSummary| {
        let minutes = summary.config.estimated_minutes(props.time_limit);
        let is_new = summary.config.is_new(today);
        let best = best_for(&summary.id);
        let key = summary.id.clone();
        html! {
            <QuizCard
                {key}
                {summary}
                {minutes}
                {is_new}
                {best}
                on_pick={props.on_pick.clone()}
            />
        }
    };

    let limit_buttons = TIME_LIMIT_CHOICES
        .iter()
        .map(|&seconds| {
            let on_time_limit = props.on_time_limit.clone();
            let active = seconds == props.time_limit;
            let onclick = Callback::from(move |_| on_time_limit.emit(seconds));
            html! {
                <button
                    type="button"
                    class={classes!("limit-btn", active.then_some("limit-active"))}
                    aria-pressed={active.to_string()}
                    {onclick}
                >
                    { format!("{seconds}s") }
                </button>
            }
        })
        .collect::<Html>();

    let visible = filtered_catalog(&props.catalog, &query);
    let searching = !query.trim().is_empty();

    let hero = if searching {
        Html::default()
    } else {
        newest_quiz(&props.catalog).map_or_else(Html::default, |summary| {
            html! {
                <section class="hero-card">
                    <h2>{ "Latest quiz" }</h2>
                    { render_card(summary.clone()) }
                </section>
            }
        })
    };

    let categories = populated_categories(&visible)
        .into_iter()
        .map(|category| {
            let cards = quizzes_in_category(&visible, &category)
                .into_iter()
                .map(&render_card)
                .collect::<Html>();
            html! {
                <section class="category-group">
                    <h2>{ category }</h2>
                    <div class="quiz-grid">{ cards }</div>
                </section>
            }
        })
        .collect::<Html>();

    let heading = if props.player_name.is_empty() {
        "Pick a quiz".to_string()
    } else {
        format!("Pick a quiz, {}!", props.player_name)
    };

    html! {
        <section class="panel selection">
            <h1>{ heading }</h1>
            if let Some(error) = &props.load_error {
                <p role="alert">{ format!("Some quizzes may be missing: {error}") }</p>
            }
            <input
                type="search"
                class="quiz-search"
                placeholder="Search quizzes"
                aria-label="Search quizzes"
                value={(*query).clone()}
                oninput={on_search}
            />
            <div class="time-limit-picker" role="group" aria-label="Seconds per question">
                <span>{ "Seconds per question:" }</span>
                { limit_buttons }
                <label class="free-mode-toggle">
                    <input
                        type="checkbox"
                        checked={props.free_mode}
                        onchange={on_free_toggle}
                    />
                    { "Free mode (answers hidden until time runs out, no points)" }
                </label>
            </div>
            { hero }
            if searching && visible.quizzes.is_empty() {
                <p>{ "No quiz matches that search." }</p>
            }
            { categories }
        </section>
    }
}
