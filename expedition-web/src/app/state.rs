use std::cell::RefCell;
use std::rc::Rc;

use expedition_game::{GameState, Roster};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use yew::prelude::*;

use crate::app::store::Store;
use crate::audio::WebAudioNotifier;
use crate::providers::Providers;

#[derive(Clone)]
pub struct AppState {
    pub store: UseReducerHandle<Store>,
    pub roster: UseStateHandle<Roster>,
    /// The player chose to continue with built-in content after a config problem.
    pub offline_acknowledged: UseStateHandle<bool>,
    pub providers: Rc<Providers>,
    pub audio: Rc<WebAudioNotifier>,
    pub rng: Rc<RefCell<ChaCha8Rng>>,
}

fn page_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        crate::dom::entropy_seed()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0
    }
}

#[hook]
pub fn use_app_state() -> AppState {
    AppState {
        store: use_reducer(Store::default),
        roster: use_state(Roster::default),
        offline_acknowledged: use_state(|| false),
        providers: use_memo((), |_| Providers::from_build_env()),
        audio: use_memo((), |_| WebAudioNotifier::new()),
        rng: use_mut_ref(|| ChaCha8Rng::seed_from_u64(page_seed())),
    }
}

impl AppState {
    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.store.state
    }

    /// Whether the config diagnostic should block the game.
    #[must_use]
    pub fn needs_config_notice(&self) -> bool {
        self.providers.problem().is_some() && !*self.offline_acknowledged
    }
}
