//! Engine settings read from the configuration port.

use crate::domain::config_validation::validate_engine_config;
use crate::domain::error::JournalError;
use crate::domain::rule_type::{RuleCatalog, RuleTypeKey};
use crate::ports::config_port::ConfigPort;
use std::str::FromStr;
use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub disabled_rule_types: Vec<RuleTypeKey>,
    pub log_level: Level,
    pub output_format: OutputFormat,
    pub fail_on_violation: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            disabled_rule_types: Vec::new(),
            log_level: Level::WARN,
            output_format: OutputFormat::Text,
            fail_on_violation: false,
        }
    }
}

impl EngineConfig {
    /// Validate and build settings; missing keys take their defaults.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, JournalError> {
        validate_engine_config(config)?;
        let defaults = EngineConfig::default();

        let disabled_rule_types =
            parse_rule_type_list(&config.get_list("engine", "disabled_rule_types"))?;
        let log_level = config
            .get_string("logging", "level")
            .and_then(|l| Level::from_str(l.trim()).ok())
            .unwrap_or(defaults.log_level);
        let output_format = config
            .get_string("output", "format")
            .and_then(|f| OutputFormat::from_str(&f).ok())
            .unwrap_or(defaults.output_format);

        let fail_on_violation =
            config.get_bool("output", "fail_on_violation", defaults.fail_on_violation);

        Ok(Self {
            disabled_rule_types,
            log_level,
            output_format,
            fail_on_violation,
        })
    }

    /// The standard catalog minus any disabled rule types.
    pub fn catalog(&self) -> RuleCatalog {
        RuleCatalog::standard().without(&self.disabled_rule_types)
    }
}

/// Parse rule type keys, accepting any letter case.
pub fn parse_rule_type_list(tokens: &[String]) -> Result<Vec<RuleTypeKey>, JournalError> {
    tokens
        .iter()
        .map(|token| {
            token
                .to_uppercase()
                .parse::<RuleTypeKey>()
                .map_err(|e| JournalError::ConfigInvalid {
                    section: "engine".to_string(),
                    key: "disabled_rule_types".to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}
