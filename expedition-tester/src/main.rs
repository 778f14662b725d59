mod logic;
mod util;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use expedition_game::ProviderConfig;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use logic::{LogicTester, ProviderSource, ScenarioResult, expand_scenarios, get_scenario, list_scenarios};
use util::{parse_seeds, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Built-in question bank and placeholder art (fast, deterministic)
    Offline,
    /// Live Gemini generation; needs GEMINI_API_KEY
    Gemini,
}

#[derive(Debug, Parser)]
#[command(name = "expedition-tester", version)]
#[command(about = "Headless playthroughs of the Great Canadian Grammar Expedition")]
struct Args {
    /// Scenarios to run (comma-separated, or `all`)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Where questions and region art come from
    #[arg(long, value_enum, default_value_t = ProviderKind::Offline)]
    provider: ProviderKind,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    let source = resolve_source(args.provider)?;
    announce_banner(&source);

    let start_time = Instant::now();
    let scenarios = expand_scenarios(split_csv(&args.scenarios));
    let seeds = parse_seeds(&args.seeds)?;
    let results = run_scenarios(&args, source.clone(), &scenarios, &seeds).await;

    write_reports(&args, &results, &source, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn resolve_source(kind: ProviderKind) -> Result<ProviderSource> {
    match kind {
        ProviderKind::Offline => Ok(ProviderSource::Offline),
        ProviderKind::Gemini => {
            let config = ProviderConfig::from_env()
                .context("the gemini provider needs an API key in the environment")?;
            log::info!("using Gemini models {} / {}", config.question_model, config.visual_model);
            Ok(ProviderSource::Gemini(config))
        }
    }
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut out = open_output(args.output.as_deref())?;
    writeln!(out, "Available scenarios:")?;
    for (name, description) in list_scenarios() {
        writeln!(out, "  {name:18} - {description}")?;
    }
    out.flush()?;
    Ok(true)
}

fn announce_banner(source: &ProviderSource) {
    println!("{}", "🍁 Grammar Expedition Tester".bright_cyan().bold());
    println!("{}", "============================".cyan());
    println!("Provider: {}", source.label());
}

async fn run_scenarios(
    args: &Args,
    source: ProviderSource,
    scenarios: &[String],
    seeds: &[u64],
) -> Vec<ScenarioResult> {
    let tester = LogicTester::new(source, args.verbose);
    let mut results = Vec::new();
    for name in scenarios {
        if let Some(scenario) = get_scenario(name) {
            results.extend(tester.run_scenario(&scenario, seeds, args.iterations).await);
        } else {
            eprintln!("⚠️  Unknown scenario: {}", name.yellow());
        }
    }
    results
}

fn write_reports(
    args: &Args,
    results: &[ScenarioResult],
    source: &ProviderSource,
    start_time: Instant,
) -> Result<()> {
    let mut out = open_output(args.output.as_deref())?;
    let generated_at = Utc::now();

    match args.report.as_str() {
        "json" => {
            logic::reports::generate_json_report(&mut *out, results, source.label(), generated_at)?;
        }
        "markdown" if results.is_empty() => {
            writeln!(out, "# Expedition Test Results\n\n_No scenarios executed._")?;
        }
        "markdown" => logic::reports::generate_markdown_report(&mut *out, results, generated_at)?,
        _ => {
            if results.is_empty() {
                writeln!(out, "No scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(&mut *out, results, start_time.elapsed())?;
            }
            writeln!(out, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Stdout, or the `--output` file when one was given.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(stdout())));
    };
    let file = File::create(path)
        .with_context(|| format!("cannot write report to {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: "json".to_string(),
            provider: ProviderKind::Offline,
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::parse_from(["expedition-tester"]);
        assert_eq!(args.scenarios, "smoke");
        assert_eq!(args.iterations, 10);
        assert_eq!(args.provider, ProviderKind::Offline);
        assert_eq!(args.report, "console");
    }

    #[test]
    fn unknown_report_format_is_rejected() {
        assert!(Args::try_parse_from(["expedition-tester", "--report", "csv"]).is_err());
    }

    #[test]
    fn unknown_scenarios_are_skipped() {
        let args = Args {
            scenarios: "nope".to_string(),
            ..base_args()
        };
        let results = tokio_test::block_on(run_scenarios(
            &args,
            ProviderSource::Offline,
            &split_csv(&args.scenarios),
            &[1],
        ));
        assert!(results.is_empty());
    }

    #[test]
    fn reports_are_written_to_the_output_file() {
        let path = std::env::temp_dir().join(format!(
            "expedition-report-{}.json",
            std::process::id()
        ));
        let args = Args {
            output: Some(path.clone()),
            ..base_args()
        };
        let results =
            tokio_test::block_on(run_scenarios(&args, ProviderSource::Offline, &["smoke".into()], &[1]));
        write_reports(&args, &results, &ProviderSource::Offline, Instant::now()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"scenario_name\": \"smoke\""));
        let _ = std::fs::remove_file(path);
    }
}
