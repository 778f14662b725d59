use expedition_game::Question;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// How an automated explorer answers questions.
pub trait AnswerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    fn choose(&mut self, question: &Question) -> String;
}

/// Built-in answering strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerStrategy {
    /// Always answers correctly.
    Scholar,
    /// Picks uniformly among the options; free-text questions are a coin flip.
    Guesser,
    /// Never answers correctly.
    Contrarian,
}

impl AnswerStrategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scholar => "Scholar",
            Self::Guesser => "Guesser",
            Self::Contrarian => "Contrarian",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn AnswerPolicy> {
        match self {
            Self::Scholar => Box::new(ScholarPolicy),
            Self::Guesser => Box::new(GuesserPolicy {
                rng: ChaCha8Rng::seed_from_u64(seed),
            }),
            Self::Contrarian => Box::new(ContrarianPolicy),
        }
    }
}

struct ScholarPolicy;
struct ContrarianPolicy;

struct GuesserPolicy {
    rng: ChaCha8Rng,
}

/// An answer guaranteed not to match `question`.
fn wrong_answer(question: &Question) -> String {
    question
        .options
        .iter()
        .find(|option| !question.is_correct(option))
        .cloned()
        .unwrap_or_else(|| format!("not {}", question.correct_answer))
}

impl AnswerPolicy for ScholarPolicy {
    fn name(&self) -> &'static str {
        "Scholar"
    }

    fn choose(&mut self, question: &Question) -> String {
        question.correct_answer.clone()
    }
}

impl AnswerPolicy for ContrarianPolicy {
    fn name(&self) -> &'static str {
        "Contrarian"
    }

    fn choose(&mut self, question: &Question) -> String {
        wrong_answer(question)
    }
}

impl AnswerPolicy for GuesserPolicy {
    fn name(&self) -> &'static str {
        "Guesser"
    }

    fn choose(&mut self, question: &Question) -> String {
        if question.is_multiple_choice() {
            let idx = self.rng.gen_range(0..question.options.len());
            question.options[idx].clone()
        } else if self.rng.gen_bool(0.5) {
            question.correct_answer.clone()
        } else {
            wrong_answer(question)
        }
    }
}
