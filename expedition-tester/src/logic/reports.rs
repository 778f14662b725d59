use anyhow::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    provider: &'a str,
    passed: bool,
    results: &'a [ScenarioResult],
}

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (passed as f64 / results.len() as f64) * 100.0
}

pub fn generate_console_report(
    writer: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "📊 Expedition Test Results".bright_cyan().bold())?;
    writeln!(writer, "{}", "==========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(writer, "Total runs: {total}")?;
    writeln!(writer, "Passed: {}", passed.to_string().green())?;
    writeln!(writer, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(writer, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(writer, "Total time: {total_duration:?}")?;
    writeln!(writer)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            writer,
            "{} {} (seed {})",
            status,
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            writer,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(
            writer,
            "   Average: {:?}, {:.1} turns",
            result.average_duration, result.average_turns
        )?;
        if !result.failures.is_empty() {
            writeln!(writer, "   Failures:")?;
            for failure in &result.failures {
                writeln!(writer, "     • {}", failure.red())?;
            }
        }
        writeln!(writer)?;
    }
    Ok(())
}

pub fn generate_json_report(
    writer: &mut dyn Write,
    results: &[ScenarioResult],
    provider: &str,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let report = JsonReport {
        generated_at: generated_at.to_rfc3339(),
        provider,
        passed: results.iter().all(|r| r.passed),
        results,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

pub fn generate_markdown_report(
    writer: &mut dyn Write,
    results: &[ScenarioResult],
    generated_at: DateTime<Utc>,
) -> Result<()> {
    writeln!(writer, "# Expedition Test Results\n")?;
    writeln!(writer, "_Generated {}_\n", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(writer, "## Summary\n")?;
    writeln!(writer, "- **Total runs**: {total}")?;
    writeln!(writer, "- **Passed**: {passed}")?;
    writeln!(writer, "- **Failed**: {}", total - passed)?;
    writeln!(writer, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(writer, "## Detailed Results\n")?;
    writeln!(writer, "| Scenario | Seed | Result | Iterations | Avg turns |")?;
    writeln!(writer, "|---|---|---|---|---|")?;
    for result in results {
        writeln!(
            writer,
            "| {} | {} | {} | {}/{} | {:.1} |",
            result.scenario_name,
            result.seed,
            if result.passed { "✅" } else { "❌" },
            result.successful_iterations,
            result.iterations_run,
            result.average_turns
        )?;
    }

    let failing: Vec<_> = results.iter().filter(|r| !r.passed).collect();
    if !failing.is_empty() {
        writeln!(writer, "\n## Failures\n")?;
        for result in failing {
            writeln!(writer, "### {} (seed {})\n", result.scenario_name, result.seed)?;
            for failure in &result.failures {
                writeln!(writer, "- {failure}")?;
            }
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            seed: 42,
            passed,
            iterations_run: 2,
            successful_iterations: usize::from(passed) * 2,
            failures: if passed {
                vec![]
            } else {
                vec!["expedition did not finish".to_string()]
            },
            average_duration: Duration::from_millis(3),
            average_turns: 11.5,
        }
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn json_report_carries_results_and_verdict() {
        let mut out = Vec::new();
        generate_json_report(&mut out, &[result("smoke", true), result("all-wrong", false)], "offline", stamp())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["provider"], "offline");
        assert_eq!(value["passed"], false);
        assert_eq!(value["results"][0]["scenario_name"], "smoke");
        assert_eq!(value["results"][0]["average_duration"], 3);
        assert!(value["generated_at"].as_str().unwrap().starts_with("2026-01-02T03:04:05"));
    }

    #[test]
    fn markdown_report_lists_failures() {
        let mut out = Vec::new();
        generate_markdown_report(&mut out, &[result("smoke", true), result("all-wrong", false)], stamp())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("| smoke | 42 | ✅ | 2/2 | 11.5 |"));
        assert!(text.contains("### all-wrong (seed 42)"));
        assert!(text.contains("- expedition did not finish"));
    }

    #[test]
    fn console_report_summarises_counts() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        generate_console_report(&mut out, &[result("smoke", true)], Duration::from_millis(10)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total runs: 1"));
        assert!(text.contains("Success rate: 100.0%"));
    }
}
