//! Tuning constants shared by the engine, the web front end and the tester.

/// Last square of the track. Positions run from 0 to `TOTAL_STEPS` inclusive.
pub const TOTAL_STEPS: u8 = 30;

/// Largest team the setup screen accepts.
pub const MAX_PLAYERS: usize = 4;

/// Lowest face of the expedition die.
pub const DIE_MIN: u8 = 1;

/// Highest face of the expedition die.
pub const DIE_MAX: u8 = 4;

/// Icon shown when a player's avatar id is not in the catalog.
pub const DEFAULT_AVATAR_ICON: &str = "🍁";

/// Team name pre-filled on the setup screen.
pub const DEFAULT_TEAM_NAME: &str = "Maple Explorers";

/// Image shown for a region when no generated illustration is available.
pub const PLACEHOLDER_VISUAL_BASE: &str = "https://picsum.photos/seed";

/// Defaults for the Gemini-backed providers.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_QUESTION_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_VISUAL_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 45;
