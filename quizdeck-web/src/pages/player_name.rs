use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_submit: Callback<String>,
}

#[function_component(PlayerNamePage)]
pub fn player_name_page(props: &Props) -> Html {
    let name = use_state(String::new);
    let valid = !name.trim().is_empty();

    let on_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(el) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                name.set(el.value());
            }
        })
    };
    let submit = {
        let name = name.clone();
        let cb = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            cb.emit((*name).clone());
        })
    };

    html! {
        <section class="panel player-name">
            <h1>{ "Welcome to QuizDeck" }</h1>
            <p>{ "Pick a name for the score history." }</p>
            <form onsubmit={submit}>
                <label for="player-name-input">{ "Your name" }</label>
                <input
                    id="player-name-input"
                    type="text"
                    maxlength="40"
                    value={(*name).clone()}
                    oninput={on_input}
                />
                <button type="submit" disabled={!valid}>{ "Start" }</button>
            </form>
        </section>
    }
}
