use expedition_game::Player;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub team_name: AttrValue,
    pub maple_leaves: u32,
    pub players: Vec<Player>,
    pub on_new_expedition: Callback<()>,
}

#[function_component(FinishScreen)]
pub fn finish_screen(p: &Props) -> Html {
    let on_new = {
        let cb = p.on_new_expedition.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let tallies = p.players.iter().map(|player| {
        html! {
            <li key={player.id.clone()}>
                <span class="token">{ player.avatar_icon.clone() }</span>
                <span class="name">{ player.name.clone() }</span>
                <span class="tally">{ format!("🍁 {}", player.leaves) }</span>
            </li>
        }
    });
    html! {
        <section class="finish-screen" aria-labelledby="finish-title">
            <span class="trophy" aria-hidden="true">{ "🏆" }</span>
            <h1 id="finish-title">{ "Mission Accomplished!" }</h1>
            <p>
                { format!("Incredible teamwork, {}! You crossed Canada coast to coast and reached the ", p.team_name) }
                <strong>{ "Golden Lighthouse" }</strong>
                { "." }
            </p>
            <dl class="finish-stats">
                <dt>{ "Distance" }</dt>
                <dd>{ "Coast-to-Coast" }</dd>
                <dt>{ "Leaves collected" }</dt>
                <dd>{ format!("🍁 {}", p.maple_leaves) }</dd>
            </dl>
            <ol class="tallies">{ for tallies }</ol>
            <button class="new-expedition" onclick={on_new}>{ "New expedition" }</button>
        </section>
    }
}
