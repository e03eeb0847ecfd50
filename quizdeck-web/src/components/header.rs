use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub player_name: String,
    pub total_points: u32,
    pub on_home: Callback<()>,
    pub on_history: Callback<()>,
    pub on_trophies: Callback<()>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let home = {
        let cb = p.on_home.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let history = {
        let cb = p.on_history.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let trophies = {
        let cb = p.on_trophies.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <header role="banner">
            <a href="#main" class="sr-only">{ "Skip to content" }</a>
            <div class="header-content">
                <button class="header-title" onclick={home}>{ "QuizDeck" }</button>
                <nav aria-label="Main" class="header-nav">
                    <button onclick={history}>{ "History" }</button>
                    <button onclick={trophies}>{ "Trophies" }</button>
                </nav>
                <div class="header-right">
                    if !p.player_name.is_empty() {
                        <span class="player-name">{ p.player_name.clone() }</span>
                    }
                    <span class="points-badge" aria-label="Total points">
                        { format!("{} ⭐", p.total_points) }
                    </span>
                </div>
            </div>
        </header>
    }
}
