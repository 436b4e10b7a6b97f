//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_report_adapter::{self, CsvReportAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_journal_adapter::JsonJournalAdapter;
use crate::adapters::json_report_adapter::{self, JsonReportAdapter};
use crate::adapters::text_report::{self, TextReportAdapter};
use crate::domain::compliance::{ComplianceEvaluationResult, ComplianceEvaluator};
use crate::domain::compliance_report::StrategySummary;
use crate::domain::engine_config::{EngineConfig, OutputFormat};
use crate::domain::error::JournalError;
use crate::domain::rule_type::{RuleCatalog, RuleTypeDefinition};
use crate::domain::rule_validation::rule_issues;
use crate::domain::trade::{Trade, TradeInputs};
use crate::ports::journal_port::JournalPort;
use crate::ports::report_port::ReportPort;

/// Exit code for a non-compliant trade under `--fail-on-violation`.
pub const VIOLATION_EXIT_CODE: u8 = 6;

#[derive(Parser, Debug)]
#[command(
    name = "journalcheck",
    about = "Check journaled trades against their strategy rules"
)]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one trade against its strategy
    Evaluate {
        #[arg(short, long)]
        journal: PathBuf,
        #[arg(short, long)]
        trade: String,
        /// JSON file with trade inputs, layered over stored inputs
        #[arg(long)]
        inputs: Option<PathBuf>,
        #[arg(long)]
        session: Option<String>,
        /// Trade time as HH:MM
        #[arg(long)]
        trade_time: Option<String>,
        #[arg(long)]
        trades_today: Option<u32>,
        #[arg(long)]
        risk_percent: Option<f64>,
        #[arg(short, long)]
        format: Option<OutputFormat>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        fail_on_violation: bool,
    },
    /// Compliance summary over all trades of a strategy
    Summary {
        #[arg(short, long)]
        journal: PathBuf,
        #[arg(short, long)]
        strategy: String,
        #[arg(short, long)]
        format: Option<OutputFormat>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a strategy's rule configuration
    Validate {
        #[arg(short, long)]
        journal: PathBuf,
        #[arg(short, long)]
        strategy: String,
    },
    /// List the available rule types
    Catalog {
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let config = match load_engine_config(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    init_logging(config.log_level);

    let outcome = match cli.command {
        Command::Evaluate {
            journal,
            trade,
            inputs,
            session,
            trade_time,
            trades_today,
            risk_percent,
            format,
            output,
            fail_on_violation,
        } => {
            let overrides = TradeInputs {
                current_session: session,
                trade_time,
                trades_taken_today: trades_today,
                risk_percent,
                ..Default::default()
            };
            run_evaluate(
                &config,
                &journal,
                &trade,
                inputs.as_deref(),
                overrides,
                format,
                output.as_deref(),
                fail_on_violation,
            )
        }
        Command::Summary {
            journal,
            strategy,
            format,
            output,
        } => run_summary(&config, &journal, &strategy, format, output.as_deref()),
        Command::Validate { journal, strategy } => run_validate(&journal, &strategy),
        Command::Catalog { format } => run_catalog(&config, format),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Engine settings from `path`, or defaults when no file is given.
pub fn load_engine_config(path: Option<&PathBuf>) -> Result<EngineConfig, JournalError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| JournalError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    EngineConfig::from_config(&adapter)
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init_logging(level: tracing::Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

pub fn read_inputs_file(path: &Path) -> Result<TradeInputs, JournalError> {
    let content = fs::read_to_string(path).map_err(|e| JournalError::Journal {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    serde_json::from_str(&content).map_err(|e| JournalError::Journal {
        reason: format!("invalid trade inputs in {}: {}", path.display(), e),
    })
}

/// Stored inputs for `trade` with `overrides` layered on top. Without a
/// recorded trade time, the entry time of the trade is used.
pub fn resolve_inputs(
    journal: &dyn JournalPort,
    trade: &Trade,
    overrides: TradeInputs,
) -> Result<TradeInputs, JournalError> {
    let stored = journal.fetch_inputs(&trade.id)?.unwrap_or_default();
    let mut inputs = stored.merge(overrides);
    if inputs.trade_time.as_deref().is_none_or(|t| t.trim().is_empty()) {
        inputs.trade_time = trade.entry_time_of_day();
    }
    Ok(inputs)
}

/// Load a trade and its strategy, then evaluate the trade.
pub fn evaluate_trade(
    journal: &dyn JournalPort,
    catalog: &RuleCatalog,
    trade_id: &str,
    overrides: TradeInputs,
) -> Result<(Trade, ComplianceEvaluationResult), JournalError> {
    let trade = journal.fetch_trade(trade_id)?;
    let strategy_id = trade
        .strategy_id
        .clone()
        .ok_or_else(|| JournalError::Journal {
            reason: format!("trade {trade_id} is not linked to a strategy"),
        })?;
    let strategy = journal.fetch_strategy(&strategy_id)?;
    let inputs = resolve_inputs(journal, &trade, overrides)?;

    let rules = strategy.decoded_rules();
    let result = ComplianceEvaluator::new(catalog).evaluate(&trade, &rules, &inputs);
    info!(
        trade_id = %trade.id,
        strategy = %strategy.name,
        compliant = result.overall_compliant,
        violations = result.violations.len(),
        "evaluated trade"
    );
    Ok((trade, result))
}

/// Evaluate every trade of a strategy and summarise the results.
pub fn summarize_strategy(
    journal: &dyn JournalPort,
    catalog: &RuleCatalog,
    strategy_id: &str,
) -> Result<StrategySummary, JournalError> {
    let strategy = journal.fetch_strategy(strategy_id)?;
    let rules = strategy.decoded_rules();
    let evaluator = ComplianceEvaluator::new(catalog);

    let mut evaluations = Vec::new();
    for trade in journal.list_trades(strategy_id)? {
        let inputs = resolve_inputs(journal, &trade, TradeInputs::default())?;
        let result = evaluator.evaluate(&trade, &rules, &inputs);
        evaluations.push((trade, result));
    }
    if evaluations.is_empty() {
        warn!(strategy_id, "strategy has no trades");
    }
    Ok(StrategySummary::build(&strategy, &evaluations))
}

fn report_adapter(format: OutputFormat) -> Box<dyn ReportPort> {
    match format {
        OutputFormat::Text => Box::new(TextReportAdapter::new()),
        OutputFormat::Json => Box::new(JsonReportAdapter::new()),
        OutputFormat::Csv => Box::new(CsvReportAdapter::new()),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_evaluate(
    config: &EngineConfig,
    journal_path: &Path,
    trade_id: &str,
    inputs_path: Option<&Path>,
    flag_overrides: TradeInputs,
    format: Option<OutputFormat>,
    output_path: Option<&Path>,
    fail_on_violation: bool,
) -> Result<ExitCode, JournalError> {
    let journal = JsonJournalAdapter::from_file(journal_path)?;
    let overrides = match inputs_path {
        Some(path) => read_inputs_file(path)?.merge(flag_overrides),
        None => flag_overrides,
    };

    let catalog = config.catalog();
    let (trade, result) = evaluate_trade(&journal, &catalog, trade_id, overrides)?;
    let format = format.unwrap_or(config.output_format);

    match output_path {
        Some(path) => {
            report_adapter(format).write(&result, &trade, &path.to_string_lossy())?;
            info!(path = %path.display(), "report written");
        }
        None => print_evaluation(&result, &trade, format)?,
    }

    if !result.overall_compliant && (fail_on_violation || config.fail_on_violation) {
        return Ok(ExitCode::from(VIOLATION_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_evaluation(
    result: &ComplianceEvaluationResult,
    trade: &Trade,
    format: OutputFormat,
) -> Result<(), JournalError> {
    match format {
        OutputFormat::Text => print!("{}", text_report::render_evaluation(result, trade)),
        OutputFormat::Json => println!("{}", json_report_adapter::to_json_string(result, trade)?),
        OutputFormat::Csv => csv_report_adapter::write_csv(io::stdout().lock(), result, trade)?,
    }
    Ok(())
}

fn run_summary(
    config: &EngineConfig,
    journal_path: &Path,
    strategy_id: &str,
    format: Option<OutputFormat>,
    output_path: Option<&Path>,
) -> Result<ExitCode, JournalError> {
    let journal = JsonJournalAdapter::from_file(journal_path)?;
    let summary = summarize_strategy(&journal, &config.catalog(), strategy_id)?;

    let rendered = match format.unwrap_or(config.output_format) {
        OutputFormat::Text => text_report::render_summary(&summary).into_bytes(),
        OutputFormat::Json => {
            let mut json = json_report_adapter::summary_to_json_string(&summary)?;
            json.push('\n');
            json.into_bytes()
        }
        OutputFormat::Csv => {
            let mut buffer = Vec::new();
            csv_report_adapter::write_tally_csv(&mut buffer, &summary.tally)?;
            buffer
        }
    };

    match output_path {
        Some(path) => json_report_adapter::write_file(&path.to_string_lossy(), &rendered)?,
        None => {
            use std::io::Write;
            io::stdout().lock().write_all(&rendered)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_validate(journal_path: &Path, strategy_id: &str) -> Result<ExitCode, JournalError> {
    let journal = JsonJournalAdapter::from_file(journal_path)?;
    let strategy = journal.fetch_strategy(strategy_id)?;
    let rules = strategy.decoded_rules();
    let mut issues = rule_issues(&RuleCatalog::standard(), &rules);

    if issues.is_empty() {
        println!(
            "Strategy {} is valid ({} rules)",
            strategy.name,
            rules.len()
        );
        return Ok(ExitCode::SUCCESS);
    }

    for issue in &issues {
        eprintln!("error: {issue}");
    }
    eprintln!(
        "{} of {} rules in strategy {} are invalid",
        issues.len(),
        rules.len(),
        strategy.name
    );
    Ok(ExitCode::from(&issues.remove(0)))
}

fn run_catalog(
    config: &EngineConfig,
    format: Option<OutputFormat>,
) -> Result<ExitCode, JournalError> {
    let catalog = config.catalog();
    match format.unwrap_or(config.output_format) {
        OutputFormat::Json => {
            let definitions: Vec<&RuleTypeDefinition> = catalog.definitions().collect();
            let json = serde_json::to_string_pretty(&definitions).map_err(|e| {
                JournalError::Report {
                    reason: e.to_string(),
                }
            })?;
            println!("{json}");
        }
        _ => print!("{}", text_report::render_catalog(&catalog)),
    }
    Ok(ExitCode::SUCCESS)
}
