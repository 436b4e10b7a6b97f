//! Plain-text rendering for terminal output.

use std::fmt::Write;

use crate::domain::compliance::ComplianceEvaluationResult;
use crate::domain::compliance_report::{ComplianceScore, StrategySummary};
use crate::domain::error::JournalError;
use crate::domain::rule_type::{RuleCatalog, RuleCategory};
use crate::domain::trade::Trade;
use crate::ports::report_port::ReportPort;

pub fn render_evaluation(result: &ComplianceEvaluationResult, trade: &Trade) -> String {
    let score = ComplianceScore::from_result(result);
    let mut out = String::new();

    let symbol = if trade.symbol.is_empty() {
        String::new()
    } else {
        format!(" ({})", trade.symbol)
    };
    let verdict = if result.overall_compliant {
        "COMPLIANT"
    } else {
        "NOT COMPLIANT"
    };
    let _ = writeln!(out, "Trade {}{}: {}", trade.id, symbol, verdict);
    let _ = writeln!(
        out,
        "Score: {}/{} rules passed ({:.1}%)",
        score.passed, score.total, score.percentage
    );

    if !result.rule_evaluations.is_empty() {
        out.push('\n');
    }
    for evaluation in &result.rule_evaluations {
        let mark = if evaluation.passed { "PASS" } else { "FAIL" };
        let _ = writeln!(
            out,
            "  [{mark}] {} (expected: {}, actual: {})",
            evaluation.rule_label, evaluation.expected_value, evaluation.actual_value
        );
        if let Some(reason) = &evaluation.violation_reason {
            let _ = writeln!(out, "         {reason}");
        }
    }
    out
}

pub fn render_summary(summary: &StrategySummary) -> String {
    let mut out = String::new();
    let tally = &summary.tally;
    let deviation = &summary.deviation;

    let _ = writeln!(out, "Strategy {} ({})", summary.strategy_name, summary.strategy_id);
    let _ = writeln!(
        out,
        "Trades: {}  Compliant: {} ({:.1}%)  Average score: {:.1}%",
        tally.trades,
        tally.compliant_trades,
        tally.compliance_rate() * 100.0,
        summary.average_score
    );

    let most_violated = tally.most_violated();
    if most_violated.is_empty() {
        let _ = writeln!(out, "\nNo violations recorded.");
    } else {
        let _ = writeln!(out, "\nMost violated rules:");
        for rule in most_violated {
            let _ = writeln!(
                out,
                "  {:<28} {:>3}/{:<3} ({:.1}%)",
                rule.label,
                rule.violations,
                rule.evaluations,
                rule.violation_rate() * 100.0
            );
        }
    }

    let _ = writeln!(out, "\nP&L by compliance:");
    let _ = writeln!(
        out,
        "  Compliant: {} trades, average {:.2}",
        deviation.compliant.trades, deviation.compliant.average_pnl
    );
    let _ = writeln!(
        out,
        "  Deviating: {} trades, average {:.2}",
        deviation.deviating.trades, deviation.deviating.average_pnl
    );
    let _ = writeln!(
        out,
        "  Difference: {:+.2}",
        deviation.average_pnl_difference()
    );
    out
}

fn category_label(category: RuleCategory) -> &'static str {
    match category {
        RuleCategory::Subjective => "subjective",
        RuleCategory::RiskExecution => "risk/execution",
        RuleCategory::Context => "context",
    }
}

pub fn render_catalog(catalog: &RuleCatalog) -> String {
    let mut out = String::new();
    for def in catalog.definitions() {
        let mut default = match def.number_comparator {
            Some(comparator) => format!("{} {}", comparator.symbol(), def.default_value),
            None => def.default_value.to_string(),
        };
        if let Some(unit) = def.unit {
            default.push_str(unit);
        }
        let _ = writeln!(
            out,
            "{:<28} {:<15} {} (default: {})",
            def.key.as_str(),
            category_label(def.category),
            def.name,
            default
        );
        if !def.options.is_empty() {
            let _ = writeln!(out, "{:<44} options: {}", "", def.options.join(", "));
        }
    }
    out
}

#[derive(Debug, Default)]
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        result: &ComplianceEvaluationResult,
        trade: &Trade,
        output_path: &str,
    ) -> Result<(), JournalError> {
        crate::adapters::json_report_adapter::write_file(
            output_path,
            render_evaluation(result, trade).as_bytes(),
        )
    }
}
