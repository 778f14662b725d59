use expedition_game::{Collaborators, Effect, execute_effect};
use yew::prelude::*;

use crate::app::state::AppState;
use crate::app::store::StoreAction;

/// Run newly queued effects after each render that produced some.
///
/// Each batch runs in emission order on its own local task; provider
/// answers are dispatched back into the store as intents.
#[hook]
pub fn use_effect_runner(state: &AppState) {
    let cursor = use_mut_ref(|| 0_u64);
    let store = state.store.clone();
    let providers = state.providers.clone();
    let audio = state.audio.clone();

    use_effect_with(store.next_seq(), move |_| {
        let from = *cursor.borrow();
        let batch: Vec<Effect> = store.pending_since(from).map(|q| q.effect).collect();
        let upto = store.next_seq();
        *cursor.borrow_mut() = upto;

        if !batch.is_empty() {
            store.dispatch(StoreAction::Taken(upto));
            let dispatcher = store.dispatcher();
            wasm_bindgen_futures::spawn_local(async move {
                for effect in batch {
                    let with = Collaborators {
                        questions: providers.questions(),
                        visuals: providers.visuals(),
                        audio: &*audio,
                        fallback: providers.fallback(),
                    };
                    if let Some(intent) = execute_effect(effect, with).await {
                        dispatcher.dispatch(intent.into());
                    }
                }
            });
        }
        || ()
    });
}
