use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_TEAM_NAME, TOTAL_STEPS};
use crate::error::InvariantViolation;
use crate::provider::ImageReference;
use crate::question::{GrammarTopic, Question};
use crate::regions::{Region, region_for_position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Setup,
    Playing,
    Question,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub avatar_id: String,
    pub avatar_icon: String,
    pub position: u8,
    /// Questions this player has answered correctly.
    #[serde(default)]
    pub leaves: u32,
}

impl Player {
    #[must_use]
    pub const fn has_arrived(&self) -> bool {
        self.position >= TOTAL_STEPS
    }

    #[must_use]
    pub fn region(&self) -> &'static Region {
        region_for_position(self.position)
    }
}

/// The move whose question is being fetched or answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMove {
    pub player_index: usize,
    pub from: u8,
    pub to: u8,
    pub roll: u8,
    pub topic: GrammarTopic,
}

impl PendingMove {
    /// Region reached by this move, if it differs from the one it left.
    #[must_use]
    pub fn entered_region(&self) -> Option<&'static Region> {
        crate::regions::region_entered(self.from, self.to)
    }
}

/// Canonical state of one expedition. Only the reducer produces new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    pub current_player_index: usize,
    pub maple_leaves: u32,
    pub current_question: Option<Question>,
    pub phase: Phase,
    pub region_visual: Option<ImageReference>,
    /// Region of the most recent visual request; answers for any other region are dropped.
    pub visual_region: Option<String>,
    pub dice_value: Option<u8>,
    pub team_name: String,
    pub pending_move: Option<PendingMove>,
    /// Set between a roll and the arrival of its question.
    pub resolution_pending: bool,
    /// Topic whose question could not be produced; the turn waits for a retry.
    pub stalled_topic: Option<GrammarTopic>,
    pub turn: u32,
    /// Bumped on every new expedition so late provider results can be dropped.
    pub generation: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            current_player_index: 0,
            maple_leaves: 0,
            current_question: None,
            phase: Phase::Setup,
            region_visual: None,
            visual_region: None,
            dice_value: None,
            team_name: DEFAULT_TEAM_NAME.to_string(),
            pending_move: None,
            resolution_pending: false,
            stalled_topic: None,
            turn: 0,
            generation: 0,
        }
    }
}

impl GameState {
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// True once every player stands on the last square. An empty team never finishes.
    #[must_use]
    pub fn all_finished(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(Player::has_arrived)
    }

    /// Region the active player is standing in.
    #[must_use]
    pub fn current_region(&self) -> Option<&'static Region> {
        self.current_player().map(Player::region)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.resolution_pending
    }

    /// Check the structural invariants of a single snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if !self.players.is_empty() && self.current_player_index >= self.players.len() {
            return Err(InvariantViolation::NoActivePlayer {
                players: self.players.len(),
            });
        }
        if self.phase != Phase::Setup && self.players.is_empty() {
            return Err(InvariantViolation::NoActivePlayer { players: 0 });
        }
        if self.current_question.is_some() != (self.phase == Phase::Question) {
            return Err(InvariantViolation::QuestionPhaseMismatch { phase: self.phase });
        }
        if self.resolution_pending && self.phase != Phase::Playing {
            return Err(InvariantViolation::NoPendingResolution);
        }
        for (player, p) in self.players.iter().enumerate() {
            if p.position > TOTAL_STEPS {
                return Err(InvariantViolation::PositionOutOfRange {
                    player,
                    position: p.position,
                });
            }
        }
        Ok(())
    }

    /// Check that no player moved backwards between `previous` and `self`
    /// within the same expedition.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation::PositionRegressed`] for the first player found.
    pub fn check_progress_since(&self, previous: &Self) -> Result<(), InvariantViolation> {
        if previous.generation != self.generation || self.phase == Phase::Setup {
            return Ok(());
        }
        for (player, (before, after)) in previous.players.iter().zip(&self.players).enumerate() {
            if after.position < before.position {
                return Err(InvariantViolation::PositionRegressed {
                    player,
                    from: before.position,
                    to: after.position,
                });
            }
        }
        Ok(())
    }
}
