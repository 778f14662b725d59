//! Built-in content used when no generator is configured or the generator fails.

use std::cell::Cell;

use async_trait::async_trait;

use crate::provider::{ImageReference, ProviderError, QuestionProvider, VisualProvider};
use crate::question::{GrammarTopic, Question, QuestionPayload};

struct BankEntry {
    topic: GrammarTopic,
    text: &'static str,
    options: &'static [&'static str],
    answer: &'static str,
    explanation: &'static str,
    passage: Option<&'static str>,
}

const BANK: &[BankEntry] = &[
    BankEntry {
        topic: GrammarTopic::QuestionTags,
        text: "Maple lives in Halifax, ___?",
        options: &["doesn't she", "does she", "isn't she", "didn't she"],
        answer: "doesn't she",
        explanation: "A positive present simple sentence takes a negative tag with 'doesn't'.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::QuestionTags,
        text: "You aren't cold in Winnipeg, ___?",
        options: &["are you", "aren't you", "do you", "don't you"],
        answer: "are you",
        explanation: "A negative sentence takes a positive tag.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::QuestionTags,
        text: "Jasper can skate very fast, ___?",
        options: &["can't he", "can he", "doesn't he", "isn't he"],
        answer: "can't he",
        explanation: "With a modal verb, the tag repeats the modal: can -> can't.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::SimpleVsContinuous,
        text: "Look! A moose ___ across the road.",
        options: &["is walking", "walks", "walk", "are walking"],
        answer: "is walking",
        explanation: "'Look!' shows the action is happening now, so we use the present continuous.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::SimpleVsContinuous,
        text: "Every winter, my family ___ to Banff to ski.",
        options: &["goes", "is going", "go", "are going"],
        answer: "goes",
        explanation: "'Every winter' is a habit, so we use the present simple.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::SimpleVsContinuous,
        text: "Shh! The baby loons ___ right now.",
        options: &["are sleeping", "sleep", "sleeps", "is sleeping"],
        answer: "are sleeping",
        explanation: "'Right now' tells us to use the present continuous; 'loons' is plural.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::Quantifiers,
        text: "How ___ maple syrup do we need for the pancakes?",
        options: &["much", "many", "few", "a few"],
        answer: "much",
        explanation: "Syrup is uncountable, so we ask 'how much'.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::Quantifiers,
        text: "There are only ___ polar bears near the town today.",
        options: &["a few", "a little", "much", "little"],
        answer: "a few",
        explanation: "'Polar bears' is countable and plural, so we use 'a few'.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::Quantifiers,
        text: "We have very ___ time before the ferry leaves!",
        options: &["little", "few", "many", "a few"],
        answer: "little",
        explanation: "Time is uncountable; 'very little' means almost none.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::Comparisons,
        text: "The CN Tower is ___ than the Calgary Tower.",
        options: &["taller", "tallest", "more tall", "as tall"],
        answer: "taller",
        explanation: "Short adjectives add -er to compare two things.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::Comparisons,
        text: "Lake Superior is the ___ of the Great Lakes.",
        options: &["largest", "larger", "most large", "large"],
        answer: "largest",
        explanation: "We use the superlative (-est) when comparing more than two things.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::Comparisons,
        text: "Hockey is ___ exciting ___ basketball for Toronto fans.",
        options: &["as / as", "more / as", "as / than", "most / than"],
        answer: "as / as",
        explanation: "'As ... as' says two things are equal.",
        passage: None,
    },
    BankEntry {
        topic: GrammarTopic::ReadingComprehension,
        text: "Why do people in Nunavut see the sun at midnight in summer?",
        options: &[
            "Because they live far north",
            "Because they live near the sea",
            "Because the sun is hotter there",
            "Because it never snows there",
        ],
        answer: "Because they live far north",
        explanation: "The passage says the midnight sun happens because Nunavut is so far north.",
        passage: Some(
            "In Nunavut, the sun does not set for weeks in summer. This happens because the territory is very far north. Children can play outside at midnight!",
        ),
    },
    BankEntry {
        topic: GrammarTopic::ReadingComprehension,
        text: "What do beavers use to build their dams?",
        options: &["Sticks and mud", "Stones and sand", "Ice and snow", "Leaves only"],
        answer: "Sticks and mud",
        explanation: "The passage says beavers build dams from sticks and mud.",
        passage: Some(
            "The beaver is a national symbol of Canada. Beavers build dams from sticks and mud. Their dams create ponds where many animals live.",
        ),
    },
];

/// Offline question source that cycles through a built-in bank, per topic.
#[derive(Debug, Default)]
pub struct OfflineQuestionBank {
    served: Cell<[usize; GrammarTopic::ALL.len()]>,
}

impl OfflineQuestionBank {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            served: Cell::new([0; GrammarTopic::ALL.len()]),
        }
    }

    /// Number of questions handed out so far, over all topics.
    #[must_use]
    pub fn served(&self) -> usize {
        self.served.get().iter().sum()
    }

    /// Number of entries in the bank for `topic`.
    #[must_use]
    pub fn entries_for(topic: GrammarTopic) -> usize {
        BANK.iter().filter(|e| e.topic == topic).count()
    }

    /// # Errors
    ///
    /// Returns [`ProviderError::Unavailable`] if the bank has nothing for `topic`.
    pub fn next_question(&self, topic: GrammarTopic) -> Result<Question, ProviderError> {
        let entries: Vec<&BankEntry> = BANK.iter().filter(|e| e.topic == topic).collect();
        if entries.is_empty() {
            return Err(ProviderError::Unavailable);
        }
        let mut counts = self.served.get();
        let served = counts[topic as usize];
        counts[topic as usize] += 1;
        self.served.set(counts);
        let entry = entries[served % entries.len()];
        let payload = QuestionPayload {
            text: Some(entry.text.to_string()),
            options: Some(entry.options.iter().map(ToString::to_string).collect()),
            correct_answer: Some(entry.answer.to_string()),
            explanation: Some(entry.explanation.to_string()),
            reading_passage: entry.passage.map(ToString::to_string),
        };
        Question::from_payload(format!("bank-{}-{served}", topic.slug()), topic, payload)
    }
}

#[async_trait(?Send)]
impl QuestionProvider for OfflineQuestionBank {
    async fn generate_question(&self, topic: GrammarTopic) -> Result<Question, ProviderError> {
        self.next_question(topic)
    }
}

/// Visual source that always answers with the deterministic placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderVisuals;

#[async_trait(?Send)]
impl VisualProvider for PlaceholderVisuals {
    async fn generate_visual(&self, region_name: &str) -> Result<ImageReference, ProviderError> {
        Ok(ImageReference::placeholder(region_name))
    }
}
