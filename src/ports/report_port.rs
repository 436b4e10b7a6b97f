//! Report generation port trait.

use crate::domain::compliance::ComplianceEvaluationResult;
use crate::domain::error::JournalError;
use crate::domain::trade::Trade;

/// Port for writing compliance evaluation reports.
pub trait ReportPort {
    fn write(
        &self,
        result: &ComplianceEvaluationResult,
        trade: &Trade,
        output_path: &str,
    ) -> Result<(), JournalError>;
}
