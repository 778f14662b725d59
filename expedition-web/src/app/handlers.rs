use expedition_game::{Intent, Phase};
use yew::prelude::*;

use crate::app::state::AppState;

#[derive(Clone, PartialEq)]
pub struct AppHandlers {
    pub team_name: Callback<String>,
    pub player_name: Callback<(usize, String)>,
    pub claim_avatar: Callback<(usize, String)>,
    pub add_slot: Callback<()>,
    pub remove_slot: Callback<usize>,
    pub start: Callback<()>,
    pub roll: Callback<()>,
    pub retry_question: Callback<()>,
    pub answer: Callback<String>,
    pub new_expedition: Callback<()>,
    pub continue_offline: Callback<()>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            team_name: build_team_name(state),
            player_name: build_player_name(state),
            claim_avatar: build_claim_avatar(state),
            add_slot: build_add_slot(state),
            remove_slot: build_remove_slot(state),
            start: build_start(state),
            roll: build_roll(state),
            retry_question: build_retry_question(state),
            answer: build_answer(state),
            new_expedition: build_new_expedition(state),
            continue_offline: build_continue_offline(state),
        }
    }
}

fn build_team_name(state: &AppState) -> Callback<String> {
    let roster = state.roster.clone();
    Callback::from(move |name: String| {
        let mut next = (*roster).clone();
        next.team_name = name;
        roster.set(next);
    })
}

fn build_player_name(state: &AppState) -> Callback<(usize, String)> {
    let roster = state.roster.clone();
    Callback::from(move |(slot, name): (usize, String)| {
        let mut next = (*roster).clone();
        if next.set_name(slot, name) {
            roster.set(next);
        }
    })
}

fn build_claim_avatar(state: &AppState) -> Callback<(usize, String)> {
    let roster = state.roster.clone();
    Callback::from(move |(slot, avatar_id): (usize, String)| {
        let mut next = (*roster).clone();
        if next.claim_avatar(slot, avatar_id) {
            roster.set(next);
        }
    })
}

fn build_add_slot(state: &AppState) -> Callback<()> {
    let roster = state.roster.clone();
    Callback::from(move |()| {
        let mut next = (*roster).clone();
        if next.add_slot() {
            roster.set(next);
        }
    })
}

fn build_remove_slot(state: &AppState) -> Callback<usize> {
    let roster = state.roster.clone();
    Callback::from(move |slot: usize| {
        let mut next = (*roster).clone();
        if next.remove_slot(slot) {
            roster.set(next);
        }
    })
}

fn build_start(state: &AppState) -> Callback<()> {
    let roster = state.roster.clone();
    let store = state.store.clone();
    Callback::from(move |()| {
        store.dispatch(
            Intent::Start {
                entries: roster.slots().to_vec(),
                team_name: roster.team_name.clone(),
            }
            .into(),
        );
    })
}

fn build_roll(state: &AppState) -> Callback<()> {
    let store = state.store.clone();
    let rng = state.rng.clone();
    Callback::from(move |()| {
        // The reducer refuses a second roll while one is resolving; skip the
        // draw so the die sequence is not consumed by double clicks.
        if store.state.resolution_pending {
            return;
        }
        let intent = Intent::random_roll(&mut *rng.borrow_mut());
        store.dispatch(intent.into());
    })
}

fn build_retry_question(state: &AppState) -> Callback<()> {
    let store = state.store.clone();
    Callback::from(move |()| store.dispatch(Intent::RetryQuestion.into()))
}

fn build_answer(state: &AppState) -> Callback<String> {
    let store = state.store.clone();
    Callback::from(move |choice: String| {
        if store.state.phase == Phase::Question {
            store.dispatch(Intent::Answer { choice }.into());
        }
    })
}

fn build_new_expedition(state: &AppState) -> Callback<()> {
    let store = state.store.clone();
    Callback::from(move |()| store.dispatch(Intent::Reset.into()))
}

fn build_continue_offline(state: &AppState) -> Callback<()> {
    let acknowledged = state.offline_acknowledged.clone();
    Callback::from(move |()| acknowledged.set(true))
}
