use quizdeck_core::{CODE_COST, MintedCode, RewardsLedger, SecretCode, Trophy, TrophyCatalog};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub catalog: TrophyCatalog,
    pub ledger: RewardsLedger,
    pub last_minted: Option<MintedCode>,
    pub on_mint: Callback<String>,
    pub on_open_redeem: Callback<()>,
    pub on_back: Callback<()>,
}

/// Stat line for the header: unlocked count over catalog size.
#[must_use]
pub fn collection_line(catalog: &TrophyCatalog, ledger: &RewardsLedger) -> String {
    format!(
        "{} of {} trophies unlocked — {} ⭐",
        ledger.unlocked_trophies.len(),
        catalog.trophies.len(),
        ledger.total_points
    )
}

/// Minted codes not yet spent, for the "your codes" list.
#[must_use]
pub fn unused_codes(ledger: &RewardsLedger) -> Vec<(&str, &SecretCode)> {
    ledger
        .secret_codes
        .iter()
        .filter(|(_, entry)| !entry.used)
        .map(|(code, entry)| (code.as_str(), entry))
        .collect()
}

fn trophy_card(
    trophy: &Trophy,
    ledger: &RewardsLedger,
    on_mint: &Callback<String>,
) -> Html {
    let unlocked = ledger.is_unlocked(&trophy.id);
    let mint = {
        let cb = on_mint.clone();
        let id = trophy.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };

    html! {
        <li class={classes!("trophy-card", trophy.rarity.as_str(), (!unlocked).then_some("locked"))}>
            <img
                class="trophy-image"
                src={crate::paths::asset_path(&trophy.image)}
                alt={trophy.name.clone()}
            />
            <h3>{ trophy.name.clone() }</h3>
            <span class="trophy-rarity">{ trophy.rarity.label() }</span>
            if unlocked {
                <p>{ trophy.description.clone() }</p>
            } else {
                <div class="trophy-overlay">
                    if let Some(code) = &trophy.secret_code {
                        <p class="printed-code">{ format!("Card code: {code}") }</p>
                    }
                    <button
                        type="button"
                        disabled={!ledger.can_buy_code()}
                        onclick={mint}
                    >
                        { format!("Buy code ({CODE_COST} ⭐)") }
                    </button>
                </div>
            }
        </li>
    }
}

#[function_component(TrophiesPage)]
pub fn trophies_page(props: &Props) -> Html {
    let back = {
        let cb = props.on_back.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let open_redeem = {
        let cb = props.on_open_redeem.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let cards = props
        .catalog
        .trophies
        .iter()
        .map(|trophy| trophy_card(trophy, &props.ledger, &props.on_mint))
        .collect::<Html>();

    let codes = unused_codes(&props.ledger);

    html! {
        <section class="panel trophies">
            <h1>{ "Trophy room" }</h1>
            <p class="trophy-stats">{ collection_line(&props.catalog, &props.ledger) }</p>
            if let Some(minted) = &props.last_minted {
                <p class="minted-code" aria-live="polite">
                    { format!(
                        "New code {} — redeem it to unlock. {} ⭐ left.",
                        minted.code, minted.remaining_points
                    ) }
                </p>
            }
            <ul class="trophy-grid">{ cards }</ul>
            if !codes.is_empty() {
                <div class="code-list">
                    <h2>{ "Your codes" }</h2>
                    <ul>
                        { for codes.iter().map(|(code, _)| html! {
                            <li><code>{ (*code).to_string() }</code></li>
                        }) }
                    </ul>
                </div>
            }
            <div class="trophy-actions">
                <button type="button" onclick={open_redeem}>{ "Redeem a code" }</button>
                <button type="button" onclick={back}>{ "Back to quizzes" }</button>
            </div>
        </section>
    }
}
