//! Turn rules as a pure reducer.
//!
//! [`reduce`] takes the current snapshot and one [`Intent`] and returns the
//! next snapshot plus the [`Effect`]s the caller must run. Randomness and
//! provider I/O live outside: a roll arrives with its die face and topic
//! already drawn, and provider answers come back as intents of their own.

use rand::Rng;

use crate::constants::{DEFAULT_TEAM_NAME, DIE_MAX, DIE_MIN, TOTAL_STEPS};
use crate::error::{EngineError, InvariantViolation, TurnRejection};
use crate::provider::{AudioCue, ImageReference, ProviderError};
use crate::question::{GrammarTopic, Question};
use crate::regions::{region_entered, starting_region};
use crate::setup::{SetupEntry, players_from_entries};
use crate::state::{GameState, PendingMove, Phase};

/// A face of the expedition die, always within `DIE_MIN..=DIE_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceRoll(u8);

impl DiceRoll {
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= DIE_MIN && value <= DIE_MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(DIE_MIN..=DIE_MAX))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start {
        entries: Vec<SetupEntry>,
        team_name: String,
    },
    Roll {
        roll: DiceRoll,
        topic: GrammarTopic,
    },
    VisualResolved {
        generation: u64,
        region: &'static str,
        result: Result<ImageReference, ProviderError>,
    },
    QuestionResolved {
        generation: u64,
        result: Result<Question, ProviderError>,
    },
    RetryQuestion,
    Answer {
        choice: String,
    },
    Reset,
}

impl Intent {
    /// Draw a die face and a topic for the next roll.
    pub fn random_roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let roll = DiceRoll::roll(rng);
        let topic = GrammarTopic::random(rng);
        Self::Roll { roll, topic }
    }

    #[must_use]
    pub fn answer(choice: impl Into<String>) -> Self {
        Self::Answer {
            choice: choice.into(),
        }
    }
}

/// Work the orchestrator performs after a transition, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Notify(AudioCue),
    FetchVisual {
        generation: u64,
        region: &'static str,
    },
    FetchQuestion {
        generation: u64,
        topic: GrammarTopic,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn quiet(state: GameState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// New position after rolling `roll` from `position`, clamped to the finish.
#[must_use]
pub fn advance_position(position: u8, roll: u8) -> u8 {
    position.saturating_add(roll).min(TOTAL_STEPS)
}

/// Apply one intent.
///
/// # Errors
///
/// Returns [`EngineError::Setup`] for unusable team entries,
/// [`EngineError::Rejected`] for intents not allowed in the current phase, and
/// [`EngineError::Invariant`] when the snapshot or the intent breaks the
/// engine's own rules. On error the caller keeps its current state.
pub fn reduce(state: &GameState, intent: Intent) -> Result<Transition, EngineError> {
    let transition = match intent {
        Intent::Start { entries, team_name } => start(state, &entries, &team_name)?,
        Intent::Roll { roll, topic } => roll_die(state, roll, topic)?,
        Intent::VisualResolved {
            generation,
            region,
            result,
        } => visual_resolved(state, generation, region, result),
        Intent::QuestionResolved { generation, result } => {
            question_resolved(state, generation, result)?
        }
        Intent::RetryQuestion => retry_question(state)?,
        Intent::Answer { choice } => answer(state, &choice)?,
        Intent::Reset => reset(state),
    };
    transition.state.check_invariants()?;
    transition.state.check_progress_since(state)?;
    Ok(transition)
}

fn start(
    state: &GameState,
    entries: &[SetupEntry],
    team_name: &str,
) -> Result<Transition, EngineError> {
    if state.phase != Phase::Setup {
        return Err(TurnRejection::AlreadyStarted.into());
    }
    let players = players_from_entries(entries)?;
    let team_name = match team_name.trim() {
        "" => DEFAULT_TEAM_NAME.to_string(),
        name => name.to_string(),
    };
    log::info!(
        "expedition '{team_name}' sets off with {} explorer(s)",
        players.len()
    );
    let next = GameState {
        players,
        phase: Phase::Playing,
        team_name,
        visual_region: Some(starting_region().name.to_string()),
        generation: state.generation,
        ..GameState::default()
    };
    let effects = vec![
        Effect::Notify(AudioCue::Success),
        Effect::FetchVisual {
            generation: next.generation,
            region: starting_region().name,
        },
    ];
    Ok(Transition {
        state: next,
        effects,
    })
}

fn ensure_can_roll(state: &GameState) -> Result<(), TurnRejection> {
    match state.phase {
        Phase::Setup => Err(TurnRejection::NotInPlay { phase: state.phase }),
        Phase::Question => Err(TurnRejection::AwaitingAnswer),
        Phase::Finished => Err(TurnRejection::GameFinished),
        Phase::Playing if state.resolution_pending => Err(TurnRejection::ResolutionPending),
        Phase::Playing if state.stalled_topic.is_some() => {
            Err(TurnRejection::QuestionRetryRequired)
        }
        Phase::Playing => Ok(()),
    }
}

fn roll_die(
    state: &GameState,
    roll: DiceRoll,
    topic: GrammarTopic,
) -> Result<Transition, EngineError> {
    ensure_can_roll(state)?;
    let player_index = state.current_player_index;
    let from = state
        .current_player()
        .ok_or(InvariantViolation::NoActivePlayer {
            players: state.players.len(),
        })?
        .position;
    let to = advance_position(from, roll.value());

    let mut next = state.clone();
    next.dice_value = Some(roll.value());
    next.players[player_index].position = to;
    next.pending_move = Some(PendingMove {
        player_index,
        from,
        to,
        roll: roll.value(),
        topic,
    });
    next.resolution_pending = true;

    let mut effects = vec![Effect::Notify(AudioCue::Move)];
    if let Some(region) = region_entered(from, to) {
        log::debug!("player {player_index} enters {}", region.name);
        next.visual_region = Some(region.name.to_string());
        effects.push(Effect::FetchVisual {
            generation: next.generation,
            region: region.name,
        });
    }
    effects.push(Effect::FetchQuestion {
        generation: next.generation,
        topic,
    });
    Ok(Transition {
        state: next,
        effects,
    })
}

fn visual_resolved(
    state: &GameState,
    generation: u64,
    region: &'static str,
    result: Result<ImageReference, ProviderError>,
) -> Transition {
    if generation != state.generation {
        log::debug!("dropping visual for {region} from expedition {generation}");
        return Transition::quiet(state.clone());
    }
    if state.visual_region.as_deref() != Some(region) {
        log::debug!("dropping visual for {region}, no longer the region on request");
        return Transition::quiet(state.clone());
    }
    let mut next = state.clone();
    match result {
        Ok(image) => next.region_visual = Some(image),
        Err(err) => {
            log::warn!("visual for {region} unavailable: {err}");
            if next.region_visual.is_none() {
                next.region_visual = Some(ImageReference::placeholder(region));
            }
        }
    }
    Transition::quiet(next)
}

fn question_resolved(
    state: &GameState,
    generation: u64,
    result: Result<Question, ProviderError>,
) -> Result<Transition, EngineError> {
    if generation != state.generation {
        log::debug!("dropping question from expedition {generation}");
        return Ok(Transition::quiet(state.clone()));
    }
    let pending = match state.pending_move {
        Some(pending) if state.resolution_pending => pending,
        _ => return Err(InvariantViolation::NoPendingResolution.into()),
    };
    let mut next = state.clone();
    next.resolution_pending = false;
    match result {
        Ok(question) => {
            next.current_question = Some(question);
            next.phase = Phase::Question;
        }
        Err(err) => {
            log::warn!("no question for {}: {err}", pending.topic);
            next.stalled_topic = Some(pending.topic);
        }
    }
    Ok(Transition::quiet(next))
}

fn retry_question(state: &GameState) -> Result<Transition, EngineError> {
    if state.phase != Phase::Playing {
        return Err(TurnRejection::NothingToRetry.into());
    }
    if state.resolution_pending {
        return Err(TurnRejection::ResolutionPending.into());
    }
    let topic = state.stalled_topic.ok_or(TurnRejection::NothingToRetry)?;
    let mut next = state.clone();
    next.stalled_topic = None;
    next.resolution_pending = true;
    let effects = vec![Effect::FetchQuestion {
        generation: next.generation,
        topic,
    }];
    Ok(Transition {
        state: next,
        effects,
    })
}

fn answer(state: &GameState, choice: &str) -> Result<Transition, EngineError> {
    match state.phase {
        Phase::Setup => return Err(TurnRejection::NotInPlay { phase: state.phase }.into()),
        Phase::Finished => return Err(TurnRejection::GameFinished.into()),
        Phase::Playing | Phase::Question => {}
    }
    let question = state
        .current_question
        .as_ref()
        .ok_or(InvariantViolation::NoActiveQuestion)?;
    let player_count = state.players.len();
    if state.current_player_index >= player_count {
        return Err(InvariantViolation::NoActivePlayer {
            players: player_count,
        }
        .into());
    }

    let correct = question.is_correct(choice);
    let mut next = state.clone();
    next.current_question = None;
    next.pending_move = None;
    next.turn += 1;
    if correct {
        next.maple_leaves += 1;
        next.players[state.current_player_index].leaves += 1;
    }

    if next.all_finished() {
        log::info!(
            "expedition '{}' finished with {} maple leaves",
            next.team_name,
            next.maple_leaves
        );
        next.phase = Phase::Finished;
    } else {
        next.current_player_index = (state.current_player_index + 1) % player_count;
        next.phase = Phase::Playing;
    }

    let cue = if correct {
        AudioCue::Success
    } else {
        AudioCue::Failure
    };
    Ok(Transition {
        state: next,
        effects: vec![Effect::Notify(cue)],
    })
}

fn reset(state: &GameState) -> Transition {
    Transition::quiet(GameState {
        team_name: state.team_name.clone(),
        generation: state.generation + 1,
        ..GameState::default()
    })
}
