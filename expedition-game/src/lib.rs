//! Great Canadian Grammar Expedition engine
//!
//! Platform-agnostic rules for the cross-Canada grammar board game: the
//! track and its regions, the avatar catalog, the question model, and the
//! turn reducer with the async session that drives it. Rendering and audio
//! playback live in the front ends; generated content comes in through the
//! provider traits.

pub mod avatars;
pub mod config;
pub mod constants;
pub mod effects;
pub mod error;
pub mod fallback;
#[cfg(feature = "gemini")]
pub mod gemini;
pub mod provider;
pub mod question;
pub mod regions;
pub mod rules;
pub mod session;
pub mod setup;
pub mod state;

pub use avatars::{AVATARS, Avatar, avatar_by_id, icon_for};
pub use config::{ConfigError, ProviderConfig};
pub use constants::{MAX_PLAYERS, TOTAL_STEPS};
pub use effects::{Collaborators, execute_effect};
pub use error::{EngineError, InvariantViolation, SetupError, TurnRejection};
pub use fallback::{OfflineQuestionBank, PlaceholderVisuals};
#[cfg(feature = "gemini")]
pub use gemini::GeminiClient;
pub use provider::{
    AudioCue, AudioNotifier, ImageReference, ProviderError, QuestionProvider, SilentNotifier,
    VisualProvider,
};
pub use question::{GrammarTopic, Question, QuestionPayload};
pub use regions::{REGIONS, Region, region_for_position, try_region_for_position};
pub use rules::{DiceRoll, Effect, Intent, Transition, advance_position, reduce};
pub use session::GameSession;
pub use setup::{Roster, SetupEntry, players_from_entries};
pub use state::{GameState, PendingMove, Phase, Player};
