//! Content sources the simulator can play against.

use std::cell::Cell;

use async_trait::async_trait;
use expedition_game::{
    AudioCue, AudioNotifier, GeminiClient, GrammarTopic, ImageReference, OfflineQuestionBank,
    PlaceholderVisuals, ProviderConfig, ProviderError, Question, QuestionProvider, VisualProvider,
};
use serde::Serialize;

/// Where questions and region art come from for a run.
#[derive(Debug, Clone)]
pub enum ProviderSource {
    Offline,
    Gemini(ProviderConfig),
}

impl ProviderSource {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Gemini(_) => "gemini",
        }
    }

    #[must_use]
    pub fn questions(&self) -> Questions {
        match self {
            Self::Offline => Questions::Offline(OfflineQuestionBank::new()),
            Self::Gemini(config) => Questions::Live(GeminiClient::new(config.clone())),
        }
    }

    #[must_use]
    pub fn visuals(&self) -> Visuals {
        match self {
            Self::Offline => Visuals::Offline(PlaceholderVisuals),
            Self::Gemini(config) => Visuals::Live(GeminiClient::new(config.clone())),
        }
    }
}

pub enum Questions {
    Offline(OfflineQuestionBank),
    Live(GeminiClient),
}

#[async_trait(?Send)]
impl QuestionProvider for Questions {
    async fn generate_question(&self, topic: GrammarTopic) -> Result<Question, ProviderError> {
        match self {
            Self::Offline(bank) => bank.generate_question(topic).await,
            Self::Live(client) => client.generate_question(topic).await,
        }
    }
}

pub enum Visuals {
    Offline(PlaceholderVisuals),
    Live(GeminiClient),
}

#[async_trait(?Send)]
impl VisualProvider for Visuals {
    async fn generate_visual(&self, region_name: &str) -> Result<ImageReference, ProviderError> {
        match self {
            Self::Offline(placeholder) => placeholder.generate_visual(region_name).await,
            Self::Live(client) => client.generate_visual(region_name).await,
        }
    }
}

/// Fails the first `failures` question requests, then delegates.
pub struct Flaky<Q> {
    inner: Q,
    failures_left: Cell<u32>,
}

impl<Q> Flaky<Q> {
    #[must_use]
    pub const fn new(inner: Q, failures: u32) -> Self {
        Self {
            inner,
            failures_left: Cell::new(failures),
        }
    }
}

#[async_trait(?Send)]
impl<Q: QuestionProvider> QuestionProvider for Flaky<Q> {
    async fn generate_question(&self, topic: GrammarTopic) -> Result<Question, ProviderError> {
        let left = self.failures_left.get();
        if left > 0 {
            self.failures_left.set(left - 1);
            return Err(ProviderError::Unavailable);
        }
        self.inner.generate_question(topic).await
    }
}

/// Counts of each audio cue a run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CueCounts {
    pub moves: u32,
    pub successes: u32,
    pub failures: u32,
}

#[derive(Debug, Default)]
pub struct CueTally(Cell<CueCounts>);

impl CueTally {
    #[must_use]
    pub fn counts(&self) -> CueCounts {
        self.0.get()
    }
}

impl AudioNotifier for CueTally {
    fn notify(&self, cue: AudioCue) {
        let mut counts = self.0.get();
        match cue {
            AudioCue::Move => counts.moves += 1,
            AudioCue::Success => counts.successes += 1,
            AudioCue::Failure => counts.failures += 1,
        }
        self.0.set(counts);
    }
}
