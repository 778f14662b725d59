//! Diagnostic shown when the content generator could not be configured.

use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub problem: AttrValue,
    pub on_continue: Callback<()>,
}

#[function_component(ConfigNotice)]
pub fn config_notice(p: &Props) -> Html {
    let on_continue = {
        let cb = p.on_continue.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="config-notice" role="alert" aria-labelledby="config-title">
            <h1 id="config-title">{ "The trail guides are unavailable" }</h1>
            <p class="problem">{ p.problem.clone() }</p>
            <p>
                { "Rebuild with " }
                <code>{ "GEMINI_API_KEY" }</code>
                { " set to use generated questions and region art, or continue with the built-in question bank." }
            </p>
            <button class="continue-offline" onclick={on_continue}>{ "Continue offline" }</button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn notice_names_the_problem() {
        let props = Props {
            problem: AttrValue::from("no API key configured"),
            on_continue: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<ConfigNotice>::with_props(props).render());
        assert!(html.contains("no API key configured"));
        assert!(html.contains("GEMINI_API_KEY"));
        assert!(html.contains("Continue offline"));
    }
}
