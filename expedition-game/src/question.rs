//! Grammar topics and the validated question model.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::provider::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarTopic {
    QuestionTags,
    SimpleVsContinuous,
    Quantifiers,
    Comparisons,
    ReadingComprehension,
}

impl GrammarTopic {
    pub const ALL: [Self; 5] = [
        Self::QuestionTags,
        Self::SimpleVsContinuous,
        Self::Quantifiers,
        Self::Comparisons,
        Self::ReadingComprehension,
    ];

    /// Label shown on the question card and sent to the question generator.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::QuestionTags => "Question Tags",
            Self::SimpleVsContinuous => "Present Simple vs Continuous",
            Self::Quantifiers => "Much, Many, Little, Few",
            Self::Comparisons => "Comparisons",
            Self::ReadingComprehension => "Arctic Archives (Reading)",
        }
    }

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::QuestionTags => "tags",
            Self::SimpleVsContinuous => "tenses",
            Self::Quantifiers => "quantifiers",
            Self::Comparisons => "comparisons",
            Self::ReadingComprehension => "reading",
        }
    }

    #[must_use]
    pub const fn is_reading(self) -> bool {
        matches!(self, Self::ReadingComprehension)
    }

    /// Uniform draw over all topics.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for GrammarTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw question shape produced by a generator, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub reading_passage: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub topic: GrammarTopic,
    pub text: String,
    /// Multiple-choice options in display order; empty for free-text questions.
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default)]
    pub reading_passage: Option<String>,
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ProviderError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ProviderError::InvalidResponse(format!("missing {field}")))
}

impl Question {
    /// Validate a generator payload into a question.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidResponse`] when the prompt, answer or
    /// explanation is missing, or when an option list leaves out the answer.
    pub fn from_payload(
        id: impl Into<String>,
        topic: GrammarTopic,
        payload: QuestionPayload,
    ) -> Result<Self, ProviderError> {
        let text = required("text", payload.text)?;
        let correct_answer = required("correctAnswer", payload.correct_answer)?;
        let explanation = required("explanation", payload.explanation)?;

        let mut options: Vec<String> = Vec::new();
        for option in payload.options.unwrap_or_default() {
            let option = option.trim().to_string();
            if !option.is_empty() && !options.contains(&option) {
                options.push(option);
            }
        }
        if !options.is_empty() && !options.contains(&correct_answer) {
            return Err(ProviderError::InvalidResponse(format!(
                "options do not include the answer '{correct_answer}'"
            )));
        }

        let reading_passage = payload
            .reading_passage
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            id: id.into(),
            topic,
            text,
            options,
            correct_answer,
            explanation,
            reading_passage,
        })
    }

    /// Exact comparison against the expected answer.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }

    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        !self.options.is_empty()
    }
}
