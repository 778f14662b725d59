use expedition_game::{
    AVATARS, EngineError, GameSession, OfflineQuestionBank, Phase, QuestionProvider, SetupEntry,
    TOTAL_STEPS, VisualProvider,
};
use serde::Serialize;

use crate::logic::policy::AnswerStrategy;
use crate::logic::providers::{CueCounts, CueTally, Flaky, ProviderSource};

/// Upper bound on intents per run; a healthy run needs far fewer.
pub const DEFAULT_MAX_ACTIONS: usize = 600;

/// Configuration for one simulated expedition.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub players: usize,
    pub strategy: AnswerStrategy,
    /// Question requests that fail before the provider starts answering.
    pub question_failures: u32,
    /// Consult the built-in bank when the question provider fails.
    pub use_fallback: bool,
    pub max_actions: usize,
}

impl SimulationConfig {
    #[must_use]
    pub const fn new(players: usize, strategy: AnswerStrategy, seed: u64) -> Self {
        Self {
            seed,
            players,
            strategy,
            question_failures: 0,
            use_fallback: false,
            max_actions: DEFAULT_MAX_ACTIONS,
        }
    }

    #[must_use]
    pub const fn with_question_failures(mut self, failures: u32, use_fallback: bool) -> Self {
        self.question_failures = failures;
        self.use_fallback = use_fallback;
        self
    }

    #[must_use]
    pub const fn with_max_actions(mut self, max_actions: usize) -> Self {
        self.max_actions = max_actions;
        self
    }
}

/// What happened over one simulated expedition.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimulationSummary {
    pub seed: u64,
    pub strategy: String,
    pub players: usize,
    pub finished: bool,
    pub turns: u32,
    pub rolls: u32,
    pub maple_leaves: u32,
    pub player_leaves: Vec<u32>,
    pub final_positions: Vec<u8>,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    /// Times a roll or retry ended without a question.
    pub stalls: u32,
    pub retries: u32,
    pub rejections: u32,
    pub cues: CueCounts,
    /// Invariant violation that stopped the run, if any.
    pub halted: Option<String>,
}

impl SimulationSummary {
    #[must_use]
    pub fn everyone_arrived(&self) -> bool {
        !self.final_positions.is_empty() && self.final_positions.iter().all(|&p| p == TOTAL_STEPS)
    }
}

fn roster(players: usize) -> Vec<SetupEntry> {
    (0..players)
        .map(|idx| SetupEntry::new(format!("Explorer {}", idx + 1), AVATARS[idx % AVATARS.len()].id))
        .collect()
}

/// Play one expedition to the finish (or until `max_actions`) against `source`.
pub async fn run_expedition(config: SimulationConfig, source: &ProviderSource) -> SimulationSummary {
    let questions = Flaky::new(source.questions(), config.question_failures);
    let mut session = GameSession::new(questions, source.visuals(), CueTally::default(), config.seed);
    if config.use_fallback {
        session = session.with_fallback(OfflineQuestionBank::new());
    }
    play(&mut session, config).await
}

async fn play<Q, V>(session: &mut GameSession<Q, V, CueTally>, config: SimulationConfig) -> SimulationSummary
where
    Q: QuestionProvider,
    V: VisualProvider,
{
    let mut policy = config.strategy.create_policy(config.seed);
    let mut summary = SimulationSummary {
        seed: config.seed,
        strategy: config.strategy.label().to_string(),
        players: config.players,
        ..SimulationSummary::default()
    };

    if let Err(err) = session.start(roster(config.players), "Simulated Explorers").await {
        summary.halted = Some(err.to_string());
        return summary;
    }

    for _ in 0..config.max_actions {
        let state = session.state();
        let outcome: Result<_, EngineError> = match state.phase {
            Phase::Finished | Phase::Setup => break,
            Phase::Question => {
                let Some(question) = state.current_question.clone() else {
                    break;
                };
                let choice = policy.choose(&question);
                if question.is_correct(&choice) {
                    summary.correct_answers += 1;
                } else {
                    summary.wrong_answers += 1;
                }
                session.answer(choice).await
            }
            Phase::Playing if state.stalled_topic.is_some() => {
                summary.retries += 1;
                session.retry_question().await
            }
            Phase::Playing => {
                summary.rolls += 1;
                session.roll().await
            }
        };

        match outcome {
            Ok(_) => {
                if session.state().stalled_topic.is_some() {
                    summary.stalls += 1;
                }
            }
            Err(err) if err.is_fatal() => {
                summary.halted = Some(err.to_string());
                break;
            }
            Err(err) => {
                log::debug!("{} refused: {err}", policy.name());
                summary.rejections += 1;
            }
        }
    }

    let state = session.state();
    summary.finished = state.phase == Phase::Finished;
    summary.turns = state.turn;
    summary.maple_leaves = state.maple_leaves;
    summary.player_leaves = state.players.iter().map(|p| p.leaves).collect();
    summary.final_positions = state.players.iter().map(|p| p.position).collect();
    summary.cues = session.audio().counts();
    summary
}
