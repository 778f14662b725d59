use colored::Colorize;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::logic::providers::ProviderSource;
use crate::logic::scenarios::{SimulationPlan, TestScenario};
use crate::logic::simulation::{SimulationSummary, run_expedition};

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(serialize_with = "duration_millis")]
    pub average_duration: Duration,
    /// Mean turns taken by the passing iterations.
    pub average_turns: f64,
}

fn duration_millis<S: serde::Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u128(duration.as_millis())
}

pub struct LogicTester {
    source: ProviderSource,
    verbose: bool,
}

impl LogicTester {
    #[must_use]
    pub const fn new(source: ProviderSource, verbose: bool) -> Self {
        Self { source, verbose }
    }

    pub async fn run_scenario(
        &self,
        scenario: &TestScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();
        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (provider: {} seed: {})",
                    scenario.name.bright_white(),
                    self.source.label(),
                    seed
                );
            }
            results.push(self.run_single_scenario(scenario, seed, iterations).await);
        }
        results
    }

    async fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut durations = Vec::new();
        let mut turns = Vec::new();

        for i in 0..iterations {
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let started = Instant::now();
            let summary = run_expedition(scenario.plan.config(iteration_seed), &self.source).await;
            let elapsed = started.elapsed();

            if let Some(err) = evaluate_expectations(&scenario.plan, &summary) {
                failures.push(format!(
                    "Iteration {} (strategy {}, seed {}, turns {}, leaves {}): {}",
                    i + 1,
                    summary.strategy,
                    summary.seed,
                    summary.turns,
                    summary.maple_leaves,
                    err
                ));
                if self.verbose {
                    println!("  ❌ Iteration {}/{} failed: {}", i + 1, iterations, err.red());
                }
            } else {
                successes += 1;
                durations.push(elapsed);
                turns.push(summary.turns);
                if self.verbose {
                    println!(
                        "  ✅ Iteration {}/{} passed ({elapsed:?}) turns:{} leaves:{}",
                        i + 1,
                        iterations,
                        summary.turns,
                        summary.maple_leaves
                    );
                }
            }
        }

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration: average_duration(&durations),
            average_turns: average(&turns),
        }
    }
}

fn evaluate_expectations(plan: &SimulationPlan, summary: &SimulationSummary) -> Option<String> {
    plan.expectations
        .iter()
        .find_map(|expectation| expectation(summary).err())
}

fn average_duration(durations: &[Duration]) -> Duration {
    if durations.is_empty() {
        Duration::ZERO
    } else {
        durations.iter().sum::<Duration>() / u32::try_from(durations.len()).unwrap_or(u32::MAX)
    }
}

fn average(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let total: f64 = values.iter().map(|&v| f64::from(v)).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    total / count
}
