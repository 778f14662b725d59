use yew::prelude::*;

pub mod effects;
pub mod handlers;
pub mod state;
pub mod store;
pub mod view;

pub use handlers::AppHandlers;
pub use store::{Store, StoreAction};

#[function_component(App)]
pub fn app() -> Html {
    let app_state = state::use_app_state();
    effects::use_effect_runner(&app_state);
    view::render_app(&app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn app_opens_on_setup_or_config_notice() {
        let html = block_on(LocalServerRenderer::<App>::new().render());
        assert!(
            html.contains("setup-panel") || html.contains("config-notice"),
            "unexpected landing view: {html}"
        );
    }
}
