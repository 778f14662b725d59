use expedition_game::{AVATARS, MAX_PLAYERS, Roster};
use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub roster: Roster,
    pub on_team_name: Callback<String>,
    pub on_player_name: Callback<(usize, String)>,
    pub on_claim_avatar: Callback<(usize, String)>,
    pub on_add_slot: Callback<()>,
    pub on_remove_slot: Callback<usize>,
    pub on_start: Callback<()>,
}

fn input_value(e: &InputEvent) -> Option<String> {
    e.target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        .map(|input| input.value())
}

#[function_component(SetupPanel)]
pub fn setup_panel(p: &Props) -> Html {
    let on_team = {
        let cb = p.on_team_name.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(value) = input_value(&e) {
                cb.emit(value);
            }
        })
    };
    let on_add = {
        let cb = p.on_add_slot.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_start = {
        let cb = p.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let can_remove = p.roster.len() > 1;

    let slots = p.roster.slots().iter().enumerate().map(|(idx, entry)| {
        let on_name = {
            let cb = p.on_player_name.clone();
            Callback::from(move |e: InputEvent| {
                if let Some(value) = input_value(&e) {
                    cb.emit((idx, value));
                }
            })
        };
        let on_remove = {
            let cb = p.on_remove_slot.clone();
            Callback::from(move |_| cb.emit(idx))
        };
        let avatars = AVATARS.iter().map(|avatar| {
            let mine = entry.avatar_id == avatar.id;
            let taken = !mine && p.roster.is_claimed(avatar.id);
            let on_pick = {
                let cb = p.on_claim_avatar.clone();
                let id = avatar.id.to_string();
                Callback::from(move |_| cb.emit((idx, id.clone())))
            };
            html! {
                <button
                    key={avatar.id}
                    class={classes!("avatar-choice", avatar.palette, mine.then_some("selected"))}
                    title={format!("{}: {}", avatar.name, avatar.description)}
                    aria-pressed={mine.to_string()}
                    disabled={taken}
                    onclick={on_pick}
                >
                    { avatar.icon }
                </button>
            }
        });
        html! {
            <li key={idx} class="setup-slot" data-testid={format!("slot-{idx}")}>
                <label for={format!("player-name-{idx}")} class="sr-only">
                    { format!("Explorer {} name", idx + 1) }
                </label>
                <input
                    id={format!("player-name-{idx}")}
                    type="text"
                    placeholder={format!("Explorer {}", idx + 1)}
                    value={entry.name.clone()}
                    oninput={on_name}
                />
                <div class="avatar-row" role="group" aria-label="Avatar">
                    { for avatars }
                </div>
                if can_remove {
                    <button class="remove-slot" onclick={on_remove} aria-label="Remove explorer">{ "✕" }</button>
                }
            </li>
        }
    });

    html! {
        <section class="setup-panel" aria-labelledby="setup-title">
            <h1 id="setup-title">{ "The Great Canadian Grammar Expedition" }</h1>
            <label for="team-name">{ "Team name" }</label>
            <input
                id="team-name"
                type="text"
                value={p.roster.team_name.clone()}
                oninput={on_team}
            />
            <ul class="setup-slots">{ for slots }</ul>
            if !p.roster.is_full() {
                <button class="add-slot" onclick={on_add}>
                    { format!("Add explorer ({}/{MAX_PLAYERS})", p.roster.len()) }
                </button>
            }
            <button class="start-btn" disabled={!p.roster.can_start()} onclick={on_start}>
                { "Start the expedition" }
            </button>
        </section>
    }
}
