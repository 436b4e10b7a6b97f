//! JSON report adapter implementing ReportPort.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::domain::compliance::ComplianceEvaluationResult;
use crate::domain::compliance_report::{ComplianceScore, StrategySummary};
use crate::domain::error::JournalError;
use crate::domain::trade::Trade;
use crate::ports::report_port::ReportPort;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TradeReport<'a> {
    trade_id: &'a str,
    symbol: &'a str,
    score: ComplianceScore,
    #[serde(flatten)]
    evaluation: &'a ComplianceEvaluationResult,
}

/// Pretty-printed JSON for one evaluated trade.
pub fn to_json_string(
    result: &ComplianceEvaluationResult,
    trade: &Trade,
) -> Result<String, JournalError> {
    let report = TradeReport {
        trade_id: &trade.id,
        symbol: &trade.symbol,
        score: ComplianceScore::from_result(result),
        evaluation: result,
    };
    serde_json::to_string_pretty(&report).map_err(|e| JournalError::Report {
        reason: e.to_string(),
    })
}

pub fn summary_to_json_string(summary: &StrategySummary) -> Result<String, JournalError> {
    serde_json::to_string_pretty(summary).map_err(|e| JournalError::Report {
        reason: e.to_string(),
    })
}

pub(crate) fn write_file(output_path: &str, content: &[u8]) -> Result<(), JournalError> {
    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(
        &self,
        result: &ComplianceEvaluationResult,
        trade: &Trade,
        output_path: &str,
    ) -> Result<(), JournalError> {
        let json = to_json_string(result, trade)?;
        write_file(output_path, json.as_bytes())
    }
}
