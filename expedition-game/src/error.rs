use thiserror::Error;

use crate::constants::MAX_PLAYERS;
use crate::state::Phase;

/// Setup input that cannot start an expedition.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("at least one explorer needs a name")]
    NoNamedPlayers,
    #[error("an expedition takes at most {max} explorers (got {count})", max = MAX_PLAYERS)]
    TooManyPlayers { count: usize },
}

/// A player intent that is not allowed right now. The state is left untouched.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TurnRejection {
    #[error("the expedition has not started (phase {phase:?})")]
    NotInPlay { phase: Phase },
    #[error("an expedition is already under way")]
    AlreadyStarted,
    #[error("the current question must be answered first")]
    AwaitingAnswer,
    #[error("a move is still being resolved")]
    ResolutionPending,
    #[error("the question for this stop is missing; retry it before rolling")]
    QuestionRetryRequired,
    #[error("there is no question to retry")]
    NothingToRetry,
    #[error("the expedition is over")]
    GameFinished,
}

/// Programming errors: the engine was driven in a way that breaks its own rules.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("no active player (team of {players})")]
    NoActivePlayer { players: usize },
    #[error("answer submitted with no active question")]
    NoActiveQuestion,
    #[error("provider result arrived with no pending resolution")]
    NoPendingResolution,
    #[error("player {player} is at {position}, past the finish")]
    PositionOutOfRange { player: usize, position: u8 },
    #[error("phase {phase:?} disagrees with the active question")]
    QuestionPhaseMismatch { phase: Phase },
    #[error("player {player} moved backwards from {from} to {to}")]
    PositionRegressed { player: usize, from: u8, to: u8 },
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Rejected(#[from] TurnRejection),
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

impl EngineError {
    /// Invariant violations are bugs in the caller and must stop the flow.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Invariant(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invariant_violations_are_fatal() {
        assert!(!EngineError::from(SetupError::NoNamedPlayers).is_fatal());
        assert!(!EngineError::from(TurnRejection::ResolutionPending).is_fatal());
        assert!(EngineError::from(InvariantViolation::NoActiveQuestion).is_fatal());
    }

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            SetupError::TooManyPlayers { count: 5 }.to_string(),
            "an expedition takes at most 4 explorers (got 5)"
        );
        assert_eq!(
            EngineError::from(InvariantViolation::NoActiveQuestion).to_string(),
            "invariant violated: answer submitted with no active question"
        );
    }
}
