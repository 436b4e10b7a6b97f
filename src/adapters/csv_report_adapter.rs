//! CSV report adapter implementing ReportPort.
//!
//! One row per evaluated rule. Summary tallies get one row per rule type.

use std::io::Write;

use crate::domain::compliance::ComplianceEvaluationResult;
use crate::domain::compliance_report::ViolationTally;
use crate::domain::error::JournalError;
use crate::domain::trade::Trade;
use crate::ports::report_port::ReportPort;

const EVALUATION_HEADER: [&str; 8] = [
    "trade_id",
    "rule_id",
    "rule_type",
    "rule_label",
    "expected",
    "actual",
    "passed",
    "violation_reason",
];

const TALLY_HEADER: [&str; 5] = [
    "rule_type",
    "label",
    "evaluations",
    "violations",
    "violation_rate",
];

fn csv_error(e: csv::Error) -> JournalError {
    JournalError::Report {
        reason: e.to_string(),
    }
}

/// Write the rule evaluations of one trade as CSV.
pub fn write_csv<W: Write>(
    writer: W,
    result: &ComplianceEvaluationResult,
    trade: &Trade,
) -> Result<(), JournalError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(EVALUATION_HEADER).map_err(csv_error)?;
    for evaluation in &result.rule_evaluations {
        let expected = evaluation.expected_value.to_string();
        let actual = evaluation.actual_value.to_string();
        csv.write_record([
            trade.id.as_str(),
            evaluation.rule_id.as_str(),
            evaluation.rule_type.as_str(),
            evaluation.rule_label.as_str(),
            expected.as_str(),
            actual.as_str(),
            if evaluation.passed { "true" } else { "false" },
            evaluation.violation_reason.as_deref().unwrap_or(""),
        ])
        .map_err(csv_error)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_tally_csv<W: Write>(writer: W, tally: &ViolationTally) -> Result<(), JournalError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(TALLY_HEADER).map_err(csv_error)?;
    for rule in &tally.rules {
        csv.write_record([
            rule.rule_type.clone(),
            rule.label.clone(),
            rule.evaluations.to_string(),
            rule.violations.to_string(),
            format!("{:.4}", rule.violation_rate()),
        ])
        .map_err(csv_error)?;
    }
    csv.flush()?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &ComplianceEvaluationResult,
        trade: &Trade,
        output_path: &str,
    ) -> Result<(), JournalError> {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, result, trade)?;
        crate::adapters::json_report_adapter::write_file(output_path, &buffer)
    }
}
