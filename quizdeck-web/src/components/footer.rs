use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer>{ "QuizDeck — works offline once loaded" }</footer>
    }
}
