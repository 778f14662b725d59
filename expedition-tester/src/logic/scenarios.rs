use crate::logic::policy::AnswerStrategy;
use crate::logic::simulation::{SimulationConfig, SimulationSummary};

/// A check run against every summary a scenario produces.
pub type Expectation = fn(&SimulationSummary) -> Result<(), String>;

/// Everything a scenario needs except the seed.
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub players: usize,
    pub strategy: AnswerStrategy,
    pub question_failures: u32,
    pub use_fallback: bool,
    pub expectations: Vec<Expectation>,
}

impl SimulationPlan {
    #[must_use]
    pub fn new(players: usize, strategy: AnswerStrategy) -> Self {
        Self {
            players,
            strategy,
            question_failures: 0,
            use_fallback: false,
            expectations: vec![no_halt, finishes, leaves_add_up, cues_match_answers],
        }
    }

    #[must_use]
    pub fn with_question_failures(mut self, failures: u32, use_fallback: bool) -> Self {
        self.question_failures = failures;
        self.use_fallback = use_fallback;
        self
    }

    #[must_use]
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    #[must_use]
    pub const fn config(&self, seed: u64) -> SimulationConfig {
        SimulationConfig::new(self.players, self.strategy, seed)
            .with_question_failures(self.question_failures, self.use_fallback)
    }
}

#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub plan: SimulationPlan,
}

fn no_halt(summary: &SimulationSummary) -> Result<(), String> {
    summary
        .halted
        .as_ref()
        .map_or(Ok(()), |err| Err(format!("engine halted: {err}")))
}

fn finishes(summary: &SimulationSummary) -> Result<(), String> {
    if summary.finished && summary.everyone_arrived() {
        Ok(())
    } else {
        Err(format!(
            "expedition did not finish (positions {:?})",
            summary.final_positions
        ))
    }
}

fn leaves_add_up(summary: &SimulationSummary) -> Result<(), String> {
    let tallied: u32 = summary.player_leaves.iter().sum();
    if summary.maple_leaves != summary.correct_answers || tallied != summary.maple_leaves {
        return Err(format!(
            "{} leaves for {} correct answers (player tallies sum to {tallied})",
            summary.maple_leaves, summary.correct_answers
        ));
    }
    if summary.turns != summary.correct_answers + summary.wrong_answers {
        return Err(format!(
            "{} turns for {} answers",
            summary.turns,
            summary.correct_answers + summary.wrong_answers
        ));
    }
    Ok(())
}

fn cues_match_answers(summary: &SimulationSummary) -> Result<(), String> {
    let cues = summary.cues;
    // The opening success cue comes from starting the expedition.
    if cues.successes != summary.correct_answers + 1
        || cues.failures != summary.wrong_answers
        || cues.moves != summary.rolls
    {
        return Err(format!(
            "cues {cues:?} for {} rolls, {} right, {} wrong",
            summary.rolls, summary.correct_answers, summary.wrong_answers
        ));
    }
    Ok(())
}

fn no_leaves(summary: &SimulationSummary) -> Result<(), String> {
    if summary.maple_leaves == 0 {
        Ok(())
    } else {
        Err(format!("expected no leaves, got {}", summary.maple_leaves))
    }
}

fn perfect_score(summary: &SimulationSummary) -> Result<(), String> {
    if summary.wrong_answers == 0 && summary.maple_leaves == summary.turns {
        Ok(())
    } else {
        Err(format!(
            "{} leaves over {} turns",
            summary.maple_leaves, summary.turns
        ))
    }
}

fn stalls_were_retried(summary: &SimulationSummary) -> Result<(), String> {
    if summary.stalls > 0 && summary.retries == summary.stalls {
        Ok(())
    } else {
        Err(format!(
            "{} stalls but {} retries",
            summary.stalls, summary.retries
        ))
    }
}

fn never_stalls(summary: &SimulationSummary) -> Result<(), String> {
    if summary.stalls == 0 {
        Ok(())
    } else {
        Err(format!("{} stalls despite the fallback bank", summary.stalls))
    }
}

fn catalog() -> Vec<TestScenario> {
    vec![
        TestScenario {
            name: "smoke",
            description: "One explorer who knows every answer crosses Canada",
            plan: SimulationPlan::new(1, AnswerStrategy::Scholar).expect(perfect_score),
        },
        TestScenario {
            name: "full-team",
            description: "Four guessing explorers all reach the Arctic",
            plan: SimulationPlan::new(4, AnswerStrategy::Guesser),
        },
        TestScenario {
            name: "all-wrong",
            description: "A lone explorer misses every question and still finishes",
            plan: SimulationPlan::new(1, AnswerStrategy::Contrarian).expect(no_leaves),
        },
        TestScenario {
            name: "flaky-provider",
            description: "Question generation fails twice; the turn stalls until retried",
            plan: SimulationPlan::new(2, AnswerStrategy::Scholar)
                .with_question_failures(2, false)
                .expect(stalls_were_retried),
        },
        TestScenario {
            name: "fallback-bank",
            description: "Question generation fails; the built-in bank fills in",
            plan: SimulationPlan::new(3, AnswerStrategy::Guesser)
                .with_question_failures(5, true)
                .expect(never_stalls),
        },
    ]
}

#[must_use]
pub fn get_scenario(name: &str) -> Option<TestScenario> {
    catalog().into_iter().find(|scenario| scenario.name == name)
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .iter()
        .map(|scenario| (scenario.name, scenario.description))
        .collect()
}

/// Replace `all` with every catalog entry.
#[must_use]
pub fn expand_scenarios(names: Vec<String>) -> Vec<String> {
    if !names.iter().any(|name| name == "all") {
        return names;
    }
    let mut expanded: Vec<String> = names.into_iter().filter(|name| name != "all").collect();
    for (name, _) in list_scenarios() {
        if !expanded.iter().any(|existing| existing == name) {
            expanded.push(name.to_string());
        }
    }
    expanded
}
