use expedition_game::{
    DiceRoll, GameState, GrammarTopic, Intent, Phase, Question, QuestionPayload, Roster,
    SetupEntry, reduce,
};
use expedition_web::components::board::{self, Board};
use expedition_web::components::question_card::{self, QuestionCard};
use expedition_web::components::setup_panel::{self, SetupPanel};
use futures::executor::block_on;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn two_explorers() -> GameState {
    reduce(
        &GameState::default(),
        Intent::Start {
            entries: vec![
                SetupEntry::new("Ada", "beaver"),
                SetupEntry::new("Bo", "moose"),
            ],
            team_name: "Northern Lights".into(),
        },
    )
    .expect("start")
    .state
}

#[test]
fn board_places_tokens_on_their_squares() {
    let state = two_explorers();
    let state = reduce(
        &state,
        Intent::Roll {
            roll: DiceRoll::new(3).expect("die face"),
            topic: GrammarTopic::QuestionTags,
        },
    )
    .expect("roll")
    .state;
    let props = board::Props {
        state,
        on_roll: Callback::noop(),
        on_retry: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Board>::with_props(props).render());
    assert!(html.contains("Consulting the trail guides"));
    assert!(html.contains("Last roll: 3"));
    assert!(html.contains("🦫"));
    assert!(html.contains("🫎"));
}

#[test]
fn finished_board_disables_rolling() {
    let mut state = two_explorers();
    state.phase = Phase::Finished;
    for player in &mut state.players {
        player.position = expedition_game::TOTAL_STEPS;
    }
    let props = board::Props {
        state,
        on_roll: Callback::noop(),
        on_retry: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<Board>::with_props(props).render());
    assert!(html.contains("disabled"));
}

#[test]
fn setup_panel_marks_claimed_avatars() {
    let mut roster = Roster::default();
    roster.add_slot();
    roster.set_name(0, "Ada");
    let props = setup_panel::Props {
        roster,
        on_team_name: Callback::noop(),
        on_player_name: Callback::noop(),
        on_claim_avatar: Callback::noop(),
        on_add_slot: Callback::noop(),
        on_remove_slot: Callback::noop(),
        on_start: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SetupPanel>::with_props(props).render());
    assert!(html.contains("aria-pressed=\"true\""));
    assert!(html.contains("slot-1"));
    assert!(html.contains("Start the expedition"));
}

#[test]
fn question_card_shows_topic_label() {
    let question = Question::from_payload(
        "render-1",
        GrammarTopic::Quantifiers,
        QuestionPayload {
            text: Some("How ___ snow fell?".into()),
            options: Some(vec!["much".into(), "many".into()]),
            correct_answer: Some("much".into()),
            explanation: Some("Snow is uncountable.".into()),
            reading_passage: None,
        },
    )
    .expect("valid question");
    let props = question_card::Props {
        question,
        player_name: AttrValue::from("Bo"),
        on_answer: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<QuestionCard>::with_props(props).render());
    assert!(html.contains(GrammarTopic::Quantifiers.label()));
    assert!(html.contains("How ___ snow fell?"));
    assert!(!html.contains("reading-passage"));
}
