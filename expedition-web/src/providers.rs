//! Which content providers the browser build talks to.

use std::future::Future;

use async_trait::async_trait;
use expedition_game::{
    ConfigError, GeminiClient, GrammarTopic, ImageReference, OfflineQuestionBank,
    PlaceholderVisuals, ProviderConfig, ProviderError, Question, QuestionProvider,
    VisualProvider,
};

/// Bounds every call of the wrapped provider to `secs` seconds.
pub struct Deadline<P> {
    inner: P,
    secs: u64,
}

impl<P> Deadline<P> {
    #[must_use]
    pub const fn new(inner: P, secs: u64) -> Self {
        Self { inner, secs }
    }
}

#[allow(clippy::future_not_send)]
async fn within<T>(
    secs: u64,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    #[cfg(target_arch = "wasm32")]
    {
        use futures::future::{Either, select};

        let millis = i32::try_from(secs.saturating_mul(1000)).unwrap_or(i32::MAX);
        let call = std::pin::pin!(call);
        let timer = std::pin::pin!(crate::dom::sleep_ms(millis));
        match select(call, timer).await {
            Either::Left((result, _)) => result,
            Either::Right((Ok(()), _)) => Err(ProviderError::Timeout { secs }),
            Either::Right((Err(err), call)) => {
                log::warn!(
                    "provider deadline unavailable: {}",
                    crate::dom::js_error_message(&err)
                );
                call.await
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = secs;
        call.await
    }
}

#[async_trait(?Send)]
impl<P: QuestionProvider> QuestionProvider for Deadline<P> {
    async fn generate_question(&self, topic: GrammarTopic) -> Result<Question, ProviderError> {
        within(self.secs, self.inner.generate_question(topic)).await
    }
}

#[async_trait(?Send)]
impl<P: VisualProvider> VisualProvider for Deadline<P> {
    async fn generate_visual(&self, region_name: &str) -> Result<ImageReference, ProviderError> {
        within(self.secs, self.inner.generate_visual(region_name)).await
    }
}

enum Source {
    Live(Deadline<GeminiClient>),
    Offline(PlaceholderVisuals),
}

/// Question and visual sources for one page load.
pub struct Providers {
    source: Source,
    bank: OfflineQuestionBank,
    problem: Option<ConfigError>,
}

impl Providers {
    /// Use the generator configured at build time, or the built-in content
    /// when no key was provided.
    #[must_use]
    pub fn from_build_env() -> Self {
        match ProviderConfig::from_build_env() {
            Ok(config) => Self::live(config),
            Err(err) => {
                log::warn!("content generator disabled: {err}");
                Self {
                    problem: Some(err),
                    ..Self::offline()
                }
            }
        }
    }

    #[must_use]
    pub fn live(config: ProviderConfig) -> Self {
        let secs = config.timeout_secs;
        Self {
            source: Source::Live(Deadline::new(GeminiClient::new(config), secs)),
            bank: OfflineQuestionBank::new(),
            problem: None,
        }
    }

    #[must_use]
    pub fn offline() -> Self {
        Self {
            source: Source::Offline(PlaceholderVisuals),
            bank: OfflineQuestionBank::new(),
            problem: None,
        }
    }

    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self.source, Source::Live(_))
    }

    /// Configuration problem found at startup, if any.
    #[must_use]
    pub const fn problem(&self) -> Option<&ConfigError> {
        self.problem.as_ref()
    }

    #[must_use]
    pub fn questions(&self) -> &dyn QuestionProvider {
        match &self.source {
            Source::Live(client) => client,
            Source::Offline(_) => &self.bank,
        }
    }

    #[must_use]
    pub fn visuals(&self) -> &dyn VisualProvider {
        match &self.source {
            Source::Live(client) => client,
            Source::Offline(placeholder) => placeholder,
        }
    }

    /// Built-in bank to fall back on when the live generator fails.
    #[must_use]
    pub fn fallback(&self) -> Option<&dyn QuestionProvider> {
        match self.source {
            Source::Live(_) => Some(&self.bank),
            Source::Offline(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn offline_providers_serve_builtin_content() {
        let providers = Providers::offline();
        assert!(!providers.is_live());
        assert!(providers.fallback().is_none());
        let q = block_on(providers.questions().generate_question(GrammarTopic::Quantifiers))
            .unwrap();
        assert!(q.id.starts_with("bank-"));
        let image = block_on(providers.visuals().generate_visual("The Arctic")).unwrap();
        assert_eq!(image, ImageReference::placeholder("The Arctic"));
    }

    #[test]
    fn live_providers_keep_the_bank_as_fallback() {
        let providers = Providers::live(ProviderConfig::with_api_key("test-key"));
        assert!(providers.is_live());
        assert!(providers.fallback().is_some());
        assert!(providers.problem().is_none());
    }

    #[test]
    fn deadline_passes_results_through() {
        let wrapped = Deadline::new(OfflineQuestionBank::new(), 1);
        let q = block_on(wrapped.generate_question(GrammarTopic::Comparisons)).unwrap();
        assert_eq!(q.topic, GrammarTopic::Comparisons);
    }
}
