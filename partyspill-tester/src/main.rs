mod reports;
mod scenarios;
mod tester;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use scenarios::{expand_scenarios, get_scenario, list_scenarios};
use tester::{LogicTester, ScenarioResult};
use util::{load_config, resolve_seeds, split_csv};

#[derive(Debug, Parser)]
#[command(name = "partyspill-tester", version = "0.1.0")]
#[command(about = "Automated logic QA for Partyspill - seeded sweeps over every party game")]
struct Args {
    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated numbers or words)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Board game tuning as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let scenarios = expand_scenarios(&split_csv(&args.scenarios));
    let seeds = resolve_seeds(&split_csv(&args.seeds));
    log::info!(
        "running {} scenarios over {} seeds, loop length {}",
        scenarios.len(),
        seeds.len(),
        config.loop_length
    );

    let tester = LogicTester::new(&config, args.verbose);
    let mut results = Vec::new();
    for key in &scenarios {
        match get_scenario(key) {
            Some(scenario) => {
                results.extend(tester.run_scenario(&scenario, &seeds, args.iterations));
            }
            None => eprintln!("⚠️  Unknown scenario: {}", key.yellow()),
        }
    }

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut out = open_output(args.output.as_deref())?;
    writeln!(out, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(out, "  {key:25} - {description}")?;
    }
    out.flush()?;
    Ok(true)
}

/// Goes to stderr so stdout carries nothing but the report.
fn announce_banner() {
    eprintln!("{}", "🎮 Partyspill Automated Tester".bright_cyan().bold());
    eprintln!("{}", "==============================".cyan());
}

/// The report sink: `path` when given, stdout otherwise.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(stdout().lock())));
    };
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut out = open_output(args.output.as_deref())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut out, results)?,
        "markdown" if results.is_empty() => writeln!(
            out,
            "# Partyspill Logic Test Results\n\n_No scenarios executed._"
        )?,
        "markdown" => reports::generate_markdown_report(&mut out, results)?,
        _ if results.is_empty() => writeln!(out, "No logic scenarios executed.")?,
        _ => reports::generate_console_report(&mut out, results, start_time.elapsed())?,
    }

    if args.report != "json" {
        writeln!(out)?;
        writeln!(out, "🏁 Total time: {:?}", start_time.elapsed())?;
    }
    out.flush()?;
    Ok(())
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
            config: None,
            report: "json".to_string(),
            verbose: false,
            output: None,
        }
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::parse_from(["partyspill-tester"]);
        assert_eq!(args.scenarios, "smoke");
        assert_eq!(args.iterations, 10);
        assert_eq!(args.report, "console");
    }

    #[test]
    fn unknown_report_format_is_rejected() {
        assert!(Args::try_parse_from(["partyspill-tester", "--report", "csv"]).is_err());
    }

    #[test]
    fn listing_is_skipped_without_flag() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "partyspill-{name}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn empty_markdown_report_says_so() {
        let path = scratch_path("empty.md");
        let mut args = base_args();
        args.report = "markdown".to_string();
        args.output = Some(path.clone());
        write_reports(&args, &[], Instant::now()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("_No scenarios executed._"));
    }

    #[test]
    fn json_report_file_holds_only_json() {
        let path = scratch_path("report.json");
        let mut args = base_args();
        args.output = Some(path.clone());
        write_reports(&args, &[], Instant::now()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }
}
