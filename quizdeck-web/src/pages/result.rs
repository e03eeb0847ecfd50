use quizdeck_core::{PASS_THRESHOLD, QuizReward, QuizSession};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub session: Option<QuizSession>,
    pub reward: Option<QuizReward>,
    pub on_replay: Callback<String>,
    pub on_back: Callback<()>,
    pub on_trophies: Callback<()>,
}

#[must_use]
pub fn result_image(percentage: u32) -> &'static str {
    if percentage >= PASS_THRESHOLD {
        "images/win.gif"
    } else {
        "images/loose.gif"
    }
}

#[must_use]
pub fn points_line(reward: &QuizReward) -> String {
    if reward.points_earned == 0 {
        format!(
            "No points this time — reach {PASS_THRESHOLD}% to score. Total: {} ⭐",
            reward.total_points
        )
    } else {
        format!(
            "+{} point{} earned! Total: {} ⭐",
            reward.points_earned,
            if reward.points_earned == 1 { "" } else { "s" },
            reward.total_points
        )
    }
}

#[function_component(ResultPage)]
pub fn result_page(props: &Props) -> Html {
    let Some(session) = &props.session else {
        let back = {
            let cb = props.on_back.clone();
            Callback::from(move |_| cb.emit(()))
        };
        return html! {
            <section class="panel result">
                <p>{ "No finished quiz to show." }</p>
                <button type="button" onclick={back}>{ "Back to quizzes" }</button>
            </section>
        };
    };

    let percentage = session.score_percentage();
    let replay = {
        let cb = props.on_replay.clone();
        let id = session.quiz_id().to_string();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let trophies = {
        let cb = props.on_trophies.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="panel result">
            <h1>{ session.title() }</h1>
            <img class="result-gif" src={crate::paths::asset_path(result_image(percentage))} alt="" />
            <p class="result-score">
                { format!("{} / {} — {percentage}%", session.score(), session.scored_question_count()) }
            </p>
            if let Some(reward) = &props.reward {
                <p class="result-points">{ points_line(reward) }</p>
                if reward.can_buy_code {
                    <button type="button" class="trophy-hint" onclick={trophies}>
                        { "You can afford a trophy code — visit the trophy room" }
                    </button>
                }
            }
            <div class="result-actions">
                <button type="button" onclick={replay}>{ "Play again" }</button>
                <button type="button" onclick={back}>{ "Back to quizzes" }</button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gif_flips_at_the_pass_threshold() {
        assert_eq!(result_image(100), "images/win.gif");
        assert_eq!(result_image(80), "images/win.gif");
        assert_eq!(result_image(79), "images/loose.gif");
        assert_eq!(result_image(0), "images/loose.gif");
    }

    #[test]
    fn points_line_reads_naturally() {
        let one = QuizReward { points_earned: 1, total_points: 7, can_buy_code: true };
        assert_eq!(points_line(&one), "+1 point earned! Total: 7 ⭐");

        let many = QuizReward { points_earned: 4, total_points: 4, can_buy_code: false };
        assert_eq!(points_line(&many), "+4 points earned! Total: 4 ⭐");

        let none = QuizReward { points_earned: 0, total_points: 2, can_buy_code: false };
        assert!(points_line(&none).starts_with("No points this time"));
    }
}
