//! Configuration validation.
//!
//! Validates engine config fields before anything is evaluated.

use crate::domain::engine_config::{parse_rule_type_list, OutputFormat};
use crate::domain::error::JournalError;
use crate::ports::config_port::ConfigPort;
use std::str::FromStr;

pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_disabled_rule_types(config)?;
    validate_log_level(config)?;
    validate_output_format(config)?;
    Ok(())
}

fn validate_disabled_rule_types(config: &dyn ConfigPort) -> Result<(), JournalError> {
    parse_rule_type_list(&config.get_list("engine", "disabled_rule_types")).map(|_| ())
}

fn validate_log_level(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("logging", "level") {
        Some(level) if tracing::Level::from_str(level.trim()).is_err() => {
            Err(JournalError::ConfigInvalid {
                section: "logging".to_string(),
                key: "level".to_string(),
                reason: format!(
                    "unknown level {}, expected one of error, warn, info, debug, trace",
                    level.trim()
                ),
            })
        }
        _ => Ok(()),
    }
}

fn validate_output_format(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("output", "format") {
        Some(format) if OutputFormat::from_str(&format).is_err() => {
            Err(JournalError::ConfigInvalid {
                section: "output".to_string(),
                key: "format".to_string(),
                reason: format!(
                    "unknown format {}, expected one of text, json, csv",
                    format.trim()
                ),
            })
        }
        _ => Ok(()),
    }
}
