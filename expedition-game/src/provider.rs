//! Seams to the outside world: question and illustration generators, and
//! the audio cues the presentation layer plays.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::PLACEHOLDER_VISUAL_BASE;
use crate::question::{GrammarTopic, Question};

/// Failure talking to an external content generator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("provider did not answer within {secs}s")]
    Timeout { secs: u64 },
    #[error("provider unavailable")]
    Unavailable,
}

/// Where the presentation layer should load a region illustration from.
/// Either an `http(s)` URL or a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageReference(String);

impl ImageReference {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Deterministic stand-in for a region whose illustration could not be generated.
    #[must_use]
    pub fn placeholder(region_name: &str) -> Self {
        let slug: String = region_name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self(format!("{PLACEHOLDER_VISUAL_BASE}/{slug}/800/450"))
    }

    #[must_use]
    pub fn from_inline_png(base64: &str) -> Self {
        Self(format!("data:image/png;base64,{base64}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inline() {
            write!(f, "<inline image, {} bytes>", self.0.len())
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Generates a grammar question for a topic.
#[async_trait(?Send)]
pub trait QuestionProvider {
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when the generator cannot be reached or its
    /// answer does not validate.
    async fn generate_question(&self, topic: GrammarTopic) -> Result<Question, ProviderError>;
}

/// Generates an illustration for a region of the track.
#[async_trait(?Send)]
pub trait VisualProvider {
    /// # Errors
    ///
    /// Returns a [`ProviderError`] when no illustration could be produced.
    async fn generate_visual(&self, region_name: &str) -> Result<ImageReference, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCue {
    Move,
    Success,
    Failure,
}

/// Fire-and-forget sound effects. Implementations must not block or panic.
pub trait AudioNotifier {
    fn notify(&self, cue: AudioCue);
}

/// Notifier for headless sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl AudioNotifier for SilentNotifier {
    fn notify(&self, cue: AudioCue) {
        log::trace!("audio cue {cue:?}");
    }
}
