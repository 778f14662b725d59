use std::cell::RefCell;
use std::rc::Rc;

use expedition_game::Question;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// How long feedback stays on screen before the answer is submitted.
pub const FEEDBACK_DELAY_MS: i32 = 2500;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub question: Question,
    pub player_name: AttrValue,
    pub on_answer: Callback<String>,
}

/// Emits `choice` once per card, however many paths try to submit it.
fn submit_once(submitted: &Rc<RefCell<bool>>, on_answer: &Callback<String>, choice: String) {
    let mut done = submitted.borrow_mut();
    if !*done {
        *done = true;
        on_answer.emit(choice);
    }
}

fn option_class(question: &Question, option: &str, selected: Option<&str>) -> Classes {
    match selected {
        None => classes!("option"),
        Some(_) if question.is_correct(option) => classes!("option", "correct"),
        Some(chosen) if chosen == option => classes!("option", "wrong"),
        Some(_) => classes!("option", "faded"),
    }
}

#[function_component(QuestionCard)]
pub fn question_card(p: &Props) -> Html {
    let selected = use_state(|| None::<String>);
    let draft = use_state(String::new);
    let submitted = use_mut_ref(|| false);

    {
        let submitted = submitted.clone();
        let on_answer = p.on_answer.clone();
        use_effect_with((*selected).clone(), move |choice| {
            if let Some(choice) = choice.clone() {
                #[cfg(target_arch = "wasm32")]
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = crate::dom::sleep_ms(FEEDBACK_DELAY_MS).await {
                        log::warn!("feedback timer failed: {}", crate::dom::js_error_message(&err));
                    }
                    submit_once(&submitted, &on_answer, choice);
                });
                #[cfg(not(target_arch = "wasm32"))]
                submit_once(&submitted, &on_answer, choice);
            }
            || ()
        });
    }

    let choose = {
        let selected = selected.clone();
        Callback::from(move |choice: String| {
            if selected.is_none() {
                selected.set(Some(choice));
            }
        })
    };
    let on_continue = {
        let submitted = submitted.clone();
        let on_answer = p.on_answer.clone();
        let selected = selected.clone();
        Callback::from(move |_| {
            if let Some(choice) = (*selected).clone() {
                submit_once(&submitted, &on_answer, choice);
            }
        })
    };

    let q = &p.question;
    let chosen = selected.as_deref();
    let answered = chosen.is_some();

    let answer_area = if q.is_multiple_choice() {
        let options = q.options.iter().map(|option| {
            let onclick = {
                let choose = choose.clone();
                let option = option.clone();
                Callback::from(move |_| choose.emit(option.clone()))
            };
            html! {
                <button key={option.clone()} class={option_class(q, option, chosen)} disabled={answered} {onclick}>
                    { option.clone() }
                </button>
            }
        });
        html! { <div class="options">{ for options }</div> }
    } else {
        let oninput = {
            let draft = draft.clone();
            Callback::from(move |e: InputEvent| {
                if let Some(input) = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                {
                    draft.set(input.value());
                }
            })
        };
        let onsubmit = {
            let choose = choose.clone();
            let draft = draft.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                if !draft.trim().is_empty() {
                    choose.emit((*draft).clone());
                }
            })
        };
        html! {
            <form class="free-answer" {onsubmit}>
                <label for="free-answer-input" class="sr-only">{ "Your answer" }</label>
                <input id="free-answer-input" type="text" value={(*draft).clone()} disabled={answered} {oninput} />
                <button type="submit" disabled={answered}>{ "Answer" }</button>
            </form>
        }
    };

    let feedback = chosen.map_or_else(Html::default, |choice| {
        let correct = q.is_correct(choice);
        html! {
            <div class={classes!("feedback", if correct { "correct" } else { "wrong" })} role="status">
                if correct {
                    { "🇨🇦 Correct! You found a Maple Leaf!" }
                } else {
                    { "Oops! Let's try another one next time." }
                }
                <p class="explanation">{ q.explanation.clone() }</p>
                <button class="continue-btn" onclick={on_continue}>{ "Continue" }</button>
            </div>
        }
    });

    html! {
        <article class="question-card" aria-labelledby="question-text">
            <header class="question-meta">
                <span class="topic">{ q.topic.label() }</span>
                <span class="turn-of">{ format!("{}'s turn", p.player_name) }</span>
            </header>
            if let Some(passage) = q.reading_passage.as_ref() {
                <blockquote class="reading-passage">{ passage.clone() }</blockquote>
            }
            <h2 id="question-text">{ q.text.clone() }</h2>
            { answer_area }
            { feedback }
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expedition_game::{GrammarTopic, QuestionPayload};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn question(options: Option<Vec<&str>>, passage: Option<&str>) -> Question {
        Question::from_payload(
            "card-1",
            GrammarTopic::ReadingComprehension,
            QuestionPayload {
                text: Some("Where do polar bears live?".into()),
                options: options.map(|o| o.into_iter().map(String::from).collect()),
                correct_answer: Some("The Arctic".into()),
                explanation: Some("Polar bears live on the sea ice.".into()),
                reading_passage: passage.map(String::from),
            },
        )
        .unwrap()
    }

    fn render(question: Question) -> String {
        let props = Props {
            question,
            player_name: AttrValue::from("Ada"),
            on_answer: Callback::noop(),
        };
        block_on(LocalServerRenderer::<QuestionCard>::with_props(props).render())
    }

    #[test]
    fn multiple_choice_lists_every_option() {
        let html = render(question(Some(vec!["The Prairies", "The Arctic"]), None));
        assert!(html.contains("The Prairies"));
        assert!(html.contains("The Arctic"));
        assert!(html.contains("Ada&#x27;s turn") || html.contains("Ada's turn"));
        assert!(!html.contains("free-answer"));
        assert!(!html.contains("Continue"));
    }

    #[test]
    fn questions_without_options_take_free_text() {
        let html = render(question(None, Some("Far in the north...")));
        assert!(html.contains("free-answer"));
        assert!(html.contains("reading-passage"));
        assert!(html.contains("Far in the north"));
    }

    #[test]
    fn feedback_classes_follow_the_choice() {
        let q = question(Some(vec!["The Prairies", "The Arctic"]), None);
        assert_eq!(option_class(&q, "The Arctic", None), classes!("option"));
        assert_eq!(
            option_class(&q, "The Arctic", Some("The Prairies")),
            classes!("option", "correct")
        );
        assert_eq!(
            option_class(&q, "The Prairies", Some("The Prairies")),
            classes!("option", "wrong")
        );
    }

    #[test]
    fn a_card_submits_only_once() {
        let submitted = Rc::new(RefCell::new(false));
        let count = Rc::new(RefCell::new(0));
        let on_answer = {
            let count = count.clone();
            Callback::from(move |_: String| *count.borrow_mut() += 1)
        };
        submit_once(&submitted, &on_answer, "a".into());
        submit_once(&submitted, &on_answer, "b".into());
        assert_eq!(*count.borrow(), 1);
    }
}
