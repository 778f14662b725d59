use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement};
use yew::Renderer;

use expedition_web::app::App;
use expedition_web::dom;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

async fn settle() {
    dom::sleep_ms(20).await.expect("timer");
}

fn query(selector: &str) -> Option<Element> {
    dom::document()
        .expect("document")
        .query_selector(selector)
        .expect("valid selector")
}

fn click(selector: &str) {
    query(selector)
        .unwrap_or_else(|| panic!("{selector} exists"))
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

async fn render_setup() {
    Renderer::<App>::with_root(ensure_app_root()).render();
    settle().await;
    if query(".continue-offline").is_some() {
        click(".continue-offline");
        settle().await;
    }
}

#[wasm_bindgen_test]
async fn app_opens_on_the_setup_screen() {
    render_setup().await;
    let main = dom::document()
        .expect("document")
        .get_element_by_id("main")
        .expect("main landmark exists");
    assert_eq!(main.get_attribute("role").unwrap_or_default(), "main");
    assert!(query(".setup-panel").is_some());
    let start = query(".start-btn").expect("start button");
    assert!(start.has_attribute("disabled"), "unnamed team cannot start");
}

#[wasm_bindgen_test]
async fn naming_an_explorer_starts_the_expedition() {
    render_setup().await;
    let input: HtmlInputElement = query("#player-name-0")
        .expect("name input")
        .dyn_into()
        .expect("input element");
    input.set_value("Ada");
    input
        .dispatch_event(&Event::new("input").expect("input event"))
        .expect("dispatch input");
    settle().await;

    click(".start-btn");
    settle().await;

    assert!(query(".setup-panel").is_none());
    assert!(query(".trail-header").is_some());
    assert!(query(".track").is_some());
}

#[wasm_bindgen_test]
async fn adding_explorers_stops_at_four() {
    render_setup().await;
    for _ in 0..3 {
        click(".add-slot");
        settle().await;
    }
    assert!(query("[data-testid='slot-3']").is_some());
    assert!(query(".add-slot").is_none());
}
