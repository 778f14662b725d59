//! Runs the effects a transition asks for and turns provider answers back
//! into intents. Shared by the native session and the web front end.

use crate::provider::{AudioNotifier, QuestionProvider, VisualProvider};
use crate::rules::{Effect, Intent};

/// The collaborators an effect may need.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub questions: &'a dyn QuestionProvider,
    pub visuals: &'a dyn VisualProvider,
    pub audio: &'a dyn AudioNotifier,
    /// Consulted when `questions` fails.
    pub fallback: Option<&'a dyn QuestionProvider>,
}

/// Run one effect. Provider fetches resolve to the intent carrying their
/// result; audio cues resolve to nothing.
pub async fn execute_effect(effect: Effect, with: Collaborators<'_>) -> Option<Intent> {
    match effect {
        Effect::Notify(cue) => {
            with.audio.notify(cue);
            None
        }
        Effect::FetchVisual { generation, region } => {
            let result = with.visuals.generate_visual(region).await;
            Some(Intent::VisualResolved {
                generation,
                region,
                result,
            })
        }
        Effect::FetchQuestion { generation, topic } => {
            let result = match with.questions.generate_question(topic).await {
                Ok(question) => Ok(question),
                Err(err) => match with.fallback {
                    Some(fallback) => {
                        log::warn!("question provider failed for {topic} ({err}); using fallback");
                        fallback.generate_question(topic).await.or(Err(err))
                    }
                    None => Err(err),
                },
            };
            Some(Intent::QuestionResolved { generation, result })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use futures::executor::block_on;

    use super::*;
    use crate::fallback::{OfflineQuestionBank, PlaceholderVisuals};
    use crate::provider::{AudioCue, ProviderError};
    use crate::question::{GrammarTopic, Question};

    struct Down;

    #[async_trait(?Send)]
    impl QuestionProvider for Down {
        async fn generate_question(&self, _topic: GrammarTopic) -> Result<Question, ProviderError> {
            Err(ProviderError::Status {
                status: 503,
                body: "overloaded".into(),
            })
        }
    }

    #[derive(Default)]
    struct Recorder(RefCell<Vec<AudioCue>>);

    impl AudioNotifier for Recorder {
        fn notify(&self, cue: AudioCue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn fetch_question() -> Effect {
        Effect::FetchQuestion {
            generation: 3,
            topic: GrammarTopic::Comparisons,
        }
    }

    #[test]
    fn audio_cues_reach_the_notifier() {
        let audio = Recorder::default();
        let bank = OfflineQuestionBank::new();
        let with = Collaborators {
            questions: &bank,
            visuals: &PlaceholderVisuals,
            audio: &audio,
            fallback: None,
        };
        assert!(block_on(execute_effect(Effect::Notify(AudioCue::Move), with)).is_none());
        assert_eq!(*audio.0.borrow(), vec![AudioCue::Move]);
    }

    #[test]
    fn visual_fetch_resolves_with_generation() {
        let bank = OfflineQuestionBank::new();
        let with = Collaborators {
            questions: &bank,
            visuals: &PlaceholderVisuals,
            audio: &Recorder::default(),
            fallback: None,
        };
        let intent = block_on(execute_effect(
            Effect::FetchVisual {
                generation: 2,
                region: "The Rockies",
            },
            with,
        ));
        assert!(matches!(
            intent,
            Some(Intent::VisualResolved {
                generation: 2,
                region: "The Rockies",
                result: Ok(_)
            })
        ));
    }

    #[test]
    fn failing_provider_falls_back_to_the_bank() {
        let bank = OfflineQuestionBank::new();
        let with = Collaborators {
            questions: &Down,
            visuals: &PlaceholderVisuals,
            audio: &Recorder::default(),
            fallback: Some(&bank),
        };
        match block_on(execute_effect(fetch_question(), with)) {
            Some(Intent::QuestionResolved {
                generation,
                result: Ok(question),
            }) => {
                assert_eq!(generation, 3);
                assert_eq!(question.topic, GrammarTopic::Comparisons);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn failure_without_fallback_is_reported() {
        let with = Collaborators {
            questions: &Down,
            visuals: &PlaceholderVisuals,
            audio: &Recorder::default(),
            fallback: None,
        };
        let intent = block_on(execute_effect(fetch_question(), with));
        assert!(matches!(
            intent,
            Some(Intent::QuestionResolved {
                result: Err(ProviderError::Status { status: 503, .. }),
                ..
            })
        ));
    }
}
