use expedition_game::{GameState, Phase, TOTAL_STEPS, region_for_position};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub state: GameState,
    pub on_roll: Callback<()>,
    pub on_retry: Callback<()>,
}

fn render_track(state: &GameState) -> Html {
    let squares = (0..=TOTAL_STEPS).map(|square| {
        let region = region_for_position(square);
        let endpoint = square == 0 || square == TOTAL_STEPS;
        let tokens = state
            .players
            .iter()
            .filter(|p| p.position == square)
            .map(|p| html! { <span key={p.id.clone()} class="token" title={p.name.clone()}>{ p.avatar_icon.clone() }</span> });
        html! {
            <li key={square} class={classes!("square", region.palette, endpoint.then_some("endpoint"))}>
                <span class="square-number">{ square.to_string() }</span>
                if square == 0 { <span class="marker">{ "🚩" }</span> }
                if square == TOTAL_STEPS { <span class="marker">{ "🏆" }</span> }
                <div class="tokens">{ for tokens }</div>
                if square == region.start {
                    <span class="region-label">{ region.name }</span>
                }
            </li>
        }
    });
    html! { <ol class="track" aria-label="Expedition track">{ for squares }</ol> }
}

fn render_visual(state: &GameState) -> Html {
    let Some(region) = state.current_region() else {
        return Html::default();
    };
    html! {
        <figure class="region-visual">
            if let Some(visual) = state.region_visual.as_ref() {
                <img src={visual.as_str().to_string()} alt={format!("Illustration of {}", region.name)} />
            } else {
                <div class="visual-loading">{ "Sketching the scenery..." }</div>
            }
            <figcaption>
                <small>{ "Current expedition site" }</small>
                <h3>{ region.name }</h3>
            </figcaption>
        </figure>
    }
}

#[function_component(Board)]
pub fn board(p: &Props) -> Html {
    let state = &p.state;
    let on_roll = {
        let cb = p.on_roll.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_retry = {
        let cb = p.on_retry.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let stalled = state.stalled_topic.is_some() && !state.resolution_pending;
    let can_roll = state.phase == Phase::Playing && !state.is_busy() && !stalled;

    let controls = state.current_player().map_or_else(Html::default, |player| {
        html! {
            <div class="turn-panel">
                <p class="eyebrow">{ "On the trail" }</p>
                <div class="turn-avatar">{ player.avatar_icon.clone() }</div>
                <h4>{ player.name.clone() }</h4>
                if stalled {
                    <p class="stall-note" role="status">{ "The trail guides lost their notes." }</p>
                    <button class="retry-btn" onclick={on_retry}>{ "Ask again" }</button>
                } else {
                    <button class="roll-btn" disabled={!can_roll} onclick={on_roll} aria-busy={state.resolution_pending.to_string()}>
                        if state.resolution_pending {
                            { "Consulting the trail guides..." }
                        } else {
                            { "Roll the die" }
                        }
                    </button>
                }
                if let Some(value) = state.dice_value {
                    <p class="last-roll">{ format!("Last roll: {value}") }</p>
                }
            </div>
        }
    });

    html! {
        <section class="board" aria-label="Board">
            <div class="board-top">
                { render_visual(state) }
                { controls }
            </div>
            { render_track(state) }
        </section>
    }
}
