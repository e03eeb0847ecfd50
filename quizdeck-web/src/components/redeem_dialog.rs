use crate::app::phase::is_redeem_code_shaped;
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    #[prop_or_default]
    pub feedback: Option<AttrValue>,
    pub on_submit: Callback<String>,
    pub on_close: Callback<()>,
}

/// Modal for typing a secret code, minted or printed on a trophy card.
#[function_component(RedeemDialog)]
pub fn redeem_dialog(props: &Props) -> Html {
    let input = use_state(String::new);

    if !props.open {
        return Html::default();
    }

    let shaped = is_redeem_code_shaped(&input);

    let on_input = {
        let input = input.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(el) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                input.set(el.value());
            }
        })
    };
    let submit = {
        let input = input.clone();
        let cb = props.on_submit.clone();
        Callback::from(move |_| {
            cb.emit((*input).clone());
            input.set(String::new());
        })
    };
    let close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };

    html! {
        <div class="dialog-backdrop" role="dialog" aria-modal="true"
             aria-labelledby="redeem-title" onkeydown={on_keydown}>
            <div class="dialog-card">
                <h2 id="redeem-title">{ "Redeem a code" }</h2>
                <p>{ "Enter the 8-character code from a trophy card or a purchased unlock." }</p>
                <input
                    type="text"
                    maxlength="8"
                    placeholder="XXXXXXXX"
                    value={(*input).clone()}
                    oninput={on_input}
                    aria-label="Secret code"
                />
                if let Some(feedback) = &props.feedback {
                    <p class="dialog-feedback" aria-live="polite">{ feedback.clone() }</p>
                }
                <div class="dialog-actions">
                    <button type="button" disabled={!shaped} onclick={submit}>
                        { "Redeem" }
                    </button>
                    <button type="button" onclick={close}>{ "Close" }</button>
                </div>
            </div>
        </div>
    }
}
