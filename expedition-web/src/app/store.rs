use std::rc::Rc;

use expedition_game::{Effect, GameState, Intent, reduce};
use yew::Reducible;

/// An effect waiting to run, numbered in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Queued {
    pub seq: u64,
    pub effect: Effect,
}

/// What the store accepts: player and provider intents, plus the runner's
/// note that effects below a sequence number have been picked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    Apply(Intent),
    Taken(u64),
}

impl From<Intent> for StoreAction {
    fn from(intent: Intent) -> Self {
        Self::Apply(intent)
    }
}

/// The canonical game snapshot plus the effects its transitions asked for.
///
/// Transitions only ever happen inside [`Reducible::reduce`]; components read
/// the snapshot and dispatch intents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Store {
    pub state: GameState,
    outbox: Vec<Queued>,
    next_seq: u64,
    /// Why the last intent was refused, for the status line.
    pub notice: Option<String>,
    /// Set once the engine reports a broken invariant; the app stops taking turns.
    pub fatal: Option<String>,
}

impl Store {
    /// Effects with a sequence number at or above `from`.
    pub fn pending_since(&self, from: u64) -> impl Iterator<Item = Queued> + '_ {
        self.outbox.iter().copied().filter(move |q| q.seq >= from)
    }

    /// Sequence number the next queued effect will get.
    #[must_use]
    pub const fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Forget effects the runner has already picked up.
    fn taken(self: Rc<Self>, upto: u64) -> Rc<Self> {
        if self.outbox.iter().all(|q| q.seq >= upto) {
            return self;
        }
        let mut next = (*self).clone();
        next.outbox.retain(|q| q.seq >= upto);
        Rc::new(next)
    }

    fn apply(self: Rc<Self>, intent: Intent) -> Rc<Self> {
        if self.fatal.is_some() {
            return self;
        }
        let fresh_expedition = matches!(intent, Intent::Start { .. } | Intent::Reset);
        match reduce(&self.state, intent) {
            Ok(transition) => {
                let mut next = (*self).clone();
                if fresh_expedition {
                    next.outbox.clear();
                }
                for effect in transition.effects {
                    next.outbox.push(Queued {
                        seq: next.next_seq,
                        effect,
                    });
                    next.next_seq += 1;
                }
                next.state = transition.state;
                next.notice = None;
                Rc::new(next)
            }
            Err(err) if err.is_fatal() => {
                log::error!("expedition halted: {err}");
                #[cfg(target_arch = "wasm32")]
                crate::dom::console_error(&format!("expedition halted: {err}"));
                Rc::new(Self {
                    fatal: Some(err.to_string()),
                    ..(*self).clone()
                })
            }
            Err(err) => {
                log::debug!("intent refused: {err}");
                Rc::new(Self {
                    notice: Some(err.to_string()),
                    ..(*self).clone()
                })
            }
        }
    }
}

impl Reducible for Store {
    type Action = StoreAction;

    fn reduce(self: Rc<Self>, action: StoreAction) -> Rc<Self> {
        match action {
            StoreAction::Apply(intent) => self.apply(intent),
            StoreAction::Taken(upto) => self.taken(upto),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expedition_game::{DiceRoll, GrammarTopic, Phase, SetupEntry};

    fn apply(store: Rc<Store>, intent: Intent) -> Rc<Store> {
        store.reduce(intent.into())
    }

    fn started() -> Rc<Store> {
        apply(
            Rc::new(Store::default()),
            Intent::Start {
                entries: vec![SetupEntry::new("Maple", "beaver")],
                team_name: String::new(),
            },
        )
    }

    #[test]
    fn transitions_queue_their_effects_in_order() {
        let store = started();
        assert_eq!(store.state.phase, Phase::Playing);
        let queued: Vec<_> = store.pending_since(0).collect();
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[0].seq, 0);
        assert_eq!(queued[1].seq, 1);

        let store = apply(
            store,
            Intent::Roll {
                roll: DiceRoll::new(2).unwrap(),
                topic: GrammarTopic::Quantifiers,
            },
        );
        let fresh: Vec<_> = store.pending_since(2).map(|q| q.effect).collect();
        assert_eq!(fresh.len(), 2);
        assert!(matches!(fresh[1], Effect::FetchQuestion { .. }));
        assert_eq!(store.next_seq(), 4);
    }

    #[test]
    fn refused_intents_only_set_a_notice() {
        let store = Rc::new(Store::default());
        let next = apply(
            Rc::clone(&store),
            Intent::Roll {
                roll: DiceRoll::new(1).unwrap(),
                topic: GrammarTopic::Comparisons,
            },
        );
        assert_eq!(next.state, store.state);
        assert!(next.notice.is_some());
        assert!(next.fatal.is_none());
        assert_eq!(next.next_seq(), 0);
    }

    #[test]
    fn broken_invariants_freeze_the_store() {
        let store = apply(started(), Intent::answer("anything"));
        assert!(store.fatal.is_some());
        let after = apply(Rc::clone(&store), Intent::Reset);
        assert_eq!(after.state, store.state);
    }

    #[test]
    fn new_expedition_drops_stale_effects() {
        let store = apply(started(), Intent::Reset);
        assert_eq!(store.pending_since(0).count(), 0);
        assert_eq!(store.state.phase, Phase::Setup);
    }

    #[test]
    fn taken_effects_leave_the_outbox() {
        let store = started();
        let store = Rc::clone(&store).reduce(StoreAction::Taken(store.next_seq()));
        assert_eq!(store.pending_since(0).count(), 0);

        let store = apply(
            store,
            Intent::Roll {
                roll: DiceRoll::new(1).unwrap(),
                topic: GrammarTopic::Comparisons,
            },
        );
        let seqs: Vec<u64> = store.pending_since(0).map(|q| q.seq).collect();
        assert_eq!(seqs, vec![2, 3]);

        let same = Rc::clone(&store).reduce(StoreAction::Taken(2));
        assert!(Rc::ptr_eq(&same, &store));
    }
}
