use quizdeck_core::QuizSummary;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub summary: QuizSummary,
    /// Estimated play time in minutes for the selected time limit.
    pub minutes: u32,
    pub is_new: bool,
    /// Best score percentage from the player's history, if any.
    #[prop_or_default]
    pub best: Option<u32>,
    pub on_pick: Callback<String>,
}

#[must_use]
pub fn difficulty_stars(difficulty: u8) -> String {
    let filled = usize::from(difficulty.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[function_component(QuizCard)]
pub fn quiz_card(props: &Props) -> Html {
    let pick = {
        let cb = props.on_pick.clone();
        let id = props.summary.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    let config = &props.summary.config;

    html! {
        <article class="quiz-card" data-quiz-id={props.summary.id.clone()}>
            <div class="quiz-card-head">
                <h3>{ config.title.clone() }</h3>
                if props.is_new {
                    <span class="badge-new">{ "New" }</span>
                }
                if let Some(best) = props.best {
                    <span class="badge-best">{ format!("Best: {best}%") }</span>
                }
            </div>
            <p class="quiz-card-desc">{ config.description.clone() }</p>
            <dl class="quiz-card-meta">
                <dt>{ "Category" }</dt>
                <dd>{ config.category.clone() }</dd>
                <dt>{ "Difficulty" }</dt>
                <dd aria-label={format!("Difficulty {} of 5", config.difficulty)}>
                    { difficulty_stars(config.difficulty) }
                </dd>
                <dt>{ "Questions" }</dt>
                <dd>{ config.question_count }</dd>
                <dt>{ "Time" }</dt>
                <dd>{ format!("~{} min", props.minutes) }</dd>
            </dl>
            <button type="button" onclick={pick}>{ "Play" }</button>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::difficulty_stars;

    #[test]
    fn stars_fill_up_to_five() {
        assert_eq!(difficulty_stars(0), "☆☆☆☆☆");
        assert_eq!(difficulty_stars(3), "★★★☆☆");
        assert_eq!(difficulty_stars(5), "★★★★★");
        // Out-of-range difficulty clamps instead of panicking.
        assert_eq!(difficulty_stars(9), "★★★★★");
    }
}
