use quizdeck_core::{
    AdvanceOutcome, Outcome, Question, QuestionKind, QuestionPhase, QuizSession,
};
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::components::countdown::Countdown;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub session: QuizSession,
    /// Practice mode: the answer options stay hidden until the countdown
    /// expires and reveals the correct answer; the run is never settled.
    #[prop_or_default]
    pub free_mode: bool,
    pub on_finish: Callback<QuizSession>,
    pub on_quit: Callback<()>,
}

#[must_use]
pub const fn outcome_heading(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Correct => "Correct!",
        Outcome::Incorrect => "Not quite.",
        Outcome::TimedOut => "Time's up!",
        Outcome::Informational => "Good to know.",
    }
}

/// True once the typed text already equals an accepted answer, ignoring
/// case and surrounding whitespace. Such input submits itself.
#[must_use]
pub fn is_live_match(question: &Question, input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    !normalized.is_empty()
        && question
            .accepted()
            .iter()
            .any(|accepted| accepted.trim().to_lowercase() == normalized)
}

/// True while free mode keeps the answer controls off the screen. Choice
/// buttons and the text input stay hidden until the countdown expires;
/// informational questions have nothing to hide, so their "Got it" button
/// stays.
#[must_use]
pub fn answer_controls_hidden(free_mode: bool, displaying: bool, question: &Question) -> bool {
    free_mode && displaying && question.kind() != QuestionKind::Informational
}

/// What to show as "the right answer" on the feedback card.
#[must_use]
pub fn correct_answer_text(question: &Question) -> Option<String> {
    match question.kind() {
        QuestionKind::MultipleChoice => question.correct_answer.clone(),
        QuestionKind::FreeText => question.accepted().first().map(ToString::to_string),
        QuestionKind::Informational => None,
    }
}

#[function_component(QuestionPage)]
pub fn question_page(props: &Props) -> Html {
    let session = use_state(|| props.session.clone());
    let last_outcome = use_state(|| None::<Outcome>);
    let text_input = use_state(String::new);

    let displaying = session.phase() == QuestionPhase::Displaying;

    let on_tick = {
        let session = session.clone();
        let last_outcome = last_outcome.clone();
        Callback::from(move |()| {
            let mut next = (*session).clone();
            if let Some(outcome) = next.tick() {
                last_outcome.set(Some(outcome));
            }
            session.set(next);
        })
    };

    let pick_choice = {
        let session = session.clone();
        let last_outcome = last_outcome.clone();
        Callback::from(move |index: usize| {
            let mut next = (*session).clone();
            if let Ok(outcome) = next.submit_choice(index) {
                last_outcome.set(Some(outcome));
                session.set(next);
            }
        })
    };

    let submit_text = {
        let session = session.clone();
        let last_outcome = last_outcome.clone();
        let text_input = text_input.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut next = (*session).clone();
            if let Ok(outcome) = next.submit_text(&text_input) {
                last_outcome.set(Some(outcome));
                session.set(next);
                text_input.set(String::new());
            }
        })
    };

    let acknowledge = {
        let session = session.clone();
        let last_outcome = last_outcome.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            if let Ok(outcome) = next.acknowledge_informational() {
                last_outcome.set(Some(outcome));
                session.set(next);
            }
        })
    };

    let advance = {
        let session = session.clone();
        let last_outcome = last_outcome.clone();
        let on_finish = props.on_finish.clone();
        Callback::from(move |_| {
            let mut next = (*session).clone();
            match next.advance() {
                AdvanceOutcome::Complete => on_finish.emit(next),
                AdvanceOutcome::NextQuestion => {
                    last_outcome.set(None);
                    session.set(next);
                }
            }
        })
    };

    let quit = {
        let cb = props.on_quit.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let Some(question) = session.current_question().cloned() else {
        // Session arrived already complete (e.g. an empty quiz slipped
        // through validation); fall through to the result immediately.
        props.on_finish.emit((*session).clone());
        return Html::default();
    };

    let on_text_input = {
        let text_input = text_input.clone();
        let session = session.clone();
        let last_outcome = last_outcome.clone();
        let question = question.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(el) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                let value = el.value();
                if is_live_match(&question, &value) {
                    let mut next = (*session).clone();
                    if let Ok(outcome) = next.submit_text(&value) {
                        last_outcome.set(Some(outcome));
                        session.set(next);
                        text_input.set(String::new());
                        return;
                    }
                }
                text_input.set(value);
            }
        })
    };

    let answer_area = if answer_controls_hidden(props.free_mode, displaying, &question) {
        html! {
            <p class="free-mode-note">
                { "Think it over. The answer appears when the clock runs out." }
            </p>
        }
    } else if displaying {
        match question.kind() {
            QuestionKind::MultipleChoice => {
                let buttons = question
                    .choices
                    .iter()
                    .enumerate()
                    .map(|(index, choice)| {
                        let pick = pick_choice.clone();
                        let onclick = Callback::from(move |_| pick.emit(index));
                        html! {
                            <button type="button" class="choice-btn" {onclick}>
                                { choice.clone() }
                            </button>
                        }
                    })
                    .collect::<Html>();
                html! { <div class="choice-grid">{ buttons }</div> }
            }
            QuestionKind::FreeText => html! {
                <form class="free-text" onsubmit={submit_text}>
                    <input
                        type="text"
                        value={(*text_input).clone()}
                        oninput={on_text_input}
                        aria-label="Your answer"
                    />
                    <button type="submit">{ "Answer" }</button>
                </form>
            },
            QuestionKind::Informational => html! {
                <button type="button" class="choice-btn" onclick={acknowledge}>
                    { "Got it" }
                </button>
            },
        }
    } else {
        let outcome = *last_outcome;
        let heading = outcome.map_or("", outcome_heading);
        let is_last = session.current_index() + 1 >= session.question_count();
        html! {
            <div class="feedback" aria-live="polite">
                <h2>{ heading }</h2>
                if let (Some(Outcome::Incorrect | Outcome::TimedOut), Some(correct)) =
                    (outcome, correct_answer_text(&question))
                {
                    <p>{ format!("The answer was: {correct}") }</p>
                }
                <button type="button" onclick={advance}>
                    { if is_last { "See results" } else { "Next question" } }
                </button>
            </div>
        }
    };

    let blurred = session.spoiler_mode() && displaying;

    html! {
        <section class="panel question">
            <div class="question-top">
                <span class="progress-label">
                    { format!("Question {} of {}", session.current_index() + 1, session.question_count()) }
                </span>
                if props.free_mode {
                    <span class="free-mode-tag">{ "Free mode" }</span>
                }
                <Countdown
                    remaining={session.time_remaining()}
                    limit={session.time_limit()}
                    running={displaying}
                    {on_tick}
                />
            </div>
            <h1>{ question.question.clone() }</h1>
            if let Some(image) = &question.image_url {
                <img
                    class={classes!("question-image", blurred.then_some("spoiler-blur"))}
                    src={crate::paths::asset_path(image)}
                    alt=""
                />
            }
            { answer_area }
            <button type="button" class="quit-link" onclick={quit}>
                { "Abandon quiz" }
            </button>
        </section>
    }
}
