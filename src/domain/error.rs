//! Domain error types.
//!
//! Evaluation itself never fails; these errors come from loading journals,
//! reading configuration, validating strategy rules and writing reports.

/// Top-level error type for journalcheck.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid rule {rule_id}: {reason}")]
    RuleInvalid { rule_id: String, reason: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("journal error: {reason}")]
    Journal { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) | JournalError::Report { .. } => 1,
            JournalError::ConfigParse { .. } | JournalError::ConfigInvalid { .. } => 2,
            JournalError::Journal { .. } | JournalError::NotFound { .. } => 3,
            JournalError::RuleInvalid { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
