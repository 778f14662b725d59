use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::effects::{Collaborators, execute_effect};
use crate::error::EngineError;
use crate::fallback::OfflineQuestionBank;
use crate::provider::{AudioNotifier, QuestionProvider, SilentNotifier, VisualProvider};
use crate::question::GrammarTopic;
use crate::rules::{DiceRoll, Effect, Intent, reduce};
use crate::setup::SetupEntry;
use crate::state::GameState;

/// Drives the reducer against real providers, one intent at a time.
///
/// Every effect of a transition runs to completion, in order, before the
/// next intent is accepted; provider answers are fed straight back through
/// the reducer.
pub struct GameSession<Q, V, A = SilentNotifier> {
    state: GameState,
    questions: Q,
    visuals: V,
    audio: A,
    fallback: Option<OfflineQuestionBank>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl<Q, V, A> GameSession<Q, V, A>
where
    Q: QuestionProvider,
    V: VisualProvider,
    A: AudioNotifier,
{
    /// Construct a fresh session in the setup phase.
    #[must_use]
    pub fn new(questions: Q, visuals: V, audio: A, seed: u64) -> Self {
        Self {
            state: GameState::default(),
            questions,
            visuals,
            audio,
            fallback: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Build a session around an existing snapshot.
    #[must_use]
    pub fn from_state(state: GameState, questions: Q, visuals: V, audio: A, seed: u64) -> Self {
        Self {
            state,
            ..Self::new(questions, visuals, audio, seed)
        }
    }

    /// Answer from the built-in bank whenever the question provider fails.
    #[must_use]
    pub fn with_fallback(mut self, bank: OfflineQuestionBank) -> Self {
        self.fallback = Some(bank);
        self
    }

    /// Borrow the current snapshot.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn questions(&self) -> &Q {
        &self.questions
    }

    #[must_use]
    pub const fn audio(&self) -> &A {
        &self.audio
    }

    /// Apply `intent` and run every effect it causes.
    ///
    /// Returns the effects that ran, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`EngineError`] raised by the intent or by a provider
    /// result feeding back into the reducer. The state keeps every transition
    /// that succeeded before the error.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<Vec<Effect>, EngineError> {
        let mut ran = Vec::new();
        let mut queue = VecDeque::from([intent]);
        while let Some(intent) = queue.pop_front() {
            let transition = match reduce(&self.state, intent) {
                Ok(transition) => transition,
                Err(err) => {
                    if err.is_fatal() {
                        log::error!("expedition halted: {err}");
                    } else {
                        log::debug!("intent refused: {err}");
                    }
                    return Err(err);
                }
            };
            self.state = transition.state;
            for effect in transition.effects {
                ran.push(effect);
                let with = Collaborators {
                    questions: &self.questions,
                    visuals: &self.visuals,
                    audio: &self.audio,
                    fallback: self
                        .fallback
                        .as_ref()
                        .map(|bank| bank as &dyn QuestionProvider),
                };
                if let Some(follow_up) = execute_effect(effect, with).await {
                    queue.push_back(follow_up);
                }
            }
        }
        Ok(ran)
    }

    /// # Errors
    ///
    /// See [`GameSession::dispatch`].
    pub async fn start(
        &mut self,
        entries: Vec<SetupEntry>,
        team_name: impl Into<String>,
    ) -> Result<Vec<Effect>, EngineError> {
        self.dispatch(Intent::Start {
            entries,
            team_name: team_name.into(),
        })
        .await
    }

    /// Roll the die for the active player with the session's own RNG.
    ///
    /// # Errors
    ///
    /// See [`GameSession::dispatch`].
    pub async fn roll(&mut self) -> Result<Vec<Effect>, EngineError> {
        let intent = Intent::random_roll(&mut self.rng);
        self.dispatch(intent).await
    }

    /// Roll a known face and topic.
    ///
    /// # Errors
    ///
    /// See [`GameSession::dispatch`].
    pub async fn roll_with(
        &mut self,
        roll: DiceRoll,
        topic: GrammarTopic,
    ) -> Result<Vec<Effect>, EngineError> {
        self.dispatch(Intent::Roll { roll, topic }).await
    }

    /// # Errors
    ///
    /// See [`GameSession::dispatch`].
    pub async fn retry_question(&mut self) -> Result<Vec<Effect>, EngineError> {
        self.dispatch(Intent::RetryQuestion).await
    }

    /// # Errors
    ///
    /// See [`GameSession::dispatch`].
    pub async fn answer(&mut self, choice: impl Into<String>) -> Result<Vec<Effect>, EngineError> {
        self.dispatch(Intent::answer(choice)).await
    }

    /// Return to setup, keeping the team name.
    ///
    /// # Errors
    ///
    /// See [`GameSession::dispatch`].
    pub async fn reset(&mut self) -> Result<Vec<Effect>, EngineError> {
        self.dispatch(Intent::Reset).await
    }

    /// Consume the session, returning the final snapshot.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
