use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(BootPage)]
pub fn boot_page(props: &Props) -> Html {
    html! {
        <section class="panel boot" aria-busy={props.error.is_none().to_string()}>
            if let Some(error) = &props.error {
                <p role="alert">{ format!("Loading failed: {error}") }</p>
                <p>{ "Check the connection and reload." }</p>
            } else {
                <p>{ "Loading quizzes…" }</p>
            }
        </section>
    }
}
