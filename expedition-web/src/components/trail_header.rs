use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub team_name: AttrValue,
    pub maple_leaves: u32,
    #[prop_or_default]
    pub region_name: Option<AttrValue>,
    /// Whether questions come from the live generator.
    #[prop_or_default]
    pub live: bool,
}

#[function_component(TrailHeader)]
pub fn trail_header(p: &Props) -> Html {
    html! {
        <header class="trail-header" role="banner">
            <div class="team">
                <span class="crest">{ "🍁" }</span>
                <h1>{ p.team_name.clone() }</h1>
            </div>
            if let Some(region) = p.region_name.clone() {
                <span class="region">{ region }</span>
            }
            <span class="leaves" aria-label="Maple leaves collected">
                { format!("🍁 {}", p.maple_leaves) }
            </span>
            if !p.live {
                <span class="offline-badge" title="Questions come from the built-in bank">{ "Offline" }</span>
            }
        </header>
    }
}
