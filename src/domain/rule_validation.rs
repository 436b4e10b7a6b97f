//! Strategy rule validation.
//!
//! Checks configured expected values against catalog metadata when a
//! strategy is created or edited. Evaluation never depends on this.

use crate::domain::error::JournalError;
use crate::domain::rule_type::{InputType, NumberBounds, RuleCatalog, RuleTypeDefinition};
use crate::domain::strategy::{ExpectedValue, StrategyRule};
use crate::domain::time_window::parse_minutes;

const STEP_TOLERANCE: f64 = 1e-9;

/// Every problem found in `rules`, in rule order.
pub fn rule_issues(catalog: &RuleCatalog, rules: &[StrategyRule]) -> Vec<JournalError> {
    rules
        .iter()
        .filter_map(|rule| validate_rule(catalog, rule).err())
        .collect()
}

pub fn validate_rule(catalog: &RuleCatalog, rule: &StrategyRule) -> Result<(), JournalError> {
    let definition = catalog
        .lookup(&rule.rule_type)
        .ok_or_else(|| invalid(rule, format!("unknown rule type {}", rule.rule_type)))?;

    match definition.input_type {
        InputType::Boolean => validate_flag(rule),
        InputType::Number => validate_number(rule, definition),
        InputType::Select => validate_select(rule, definition),
        InputType::Multiselect => validate_multiselect(rule, definition),
        InputType::TimeRange => validate_time_range(rule),
    }
}

fn invalid(rule: &StrategyRule, reason: String) -> JournalError {
    JournalError::RuleInvalid {
        rule_id: rule.id.clone(),
        reason,
    }
}

fn validate_flag(rule: &StrategyRule) -> Result<(), JournalError> {
    match rule.expected.as_flag() {
        Some(_) => Ok(()),
        None => Err(invalid(
            rule,
            format!("expected true or false, got {}", rule.expected),
        )),
    }
}

fn validate_number(
    rule: &StrategyRule,
    definition: &RuleTypeDefinition,
) -> Result<(), JournalError> {
    let value = rule
        .expected
        .as_number()
        .ok_or_else(|| invalid(rule, format!("expected a number, got {}", rule.expected)))?;

    if let Some(NumberBounds { min, max, step }) = definition.validation {
        if value < min {
            return Err(invalid(
                rule,
                format!("value {value} is below the minimum of {min}"),
            ));
        }
        if value > max {
            return Err(invalid(
                rule,
                format!("value {value} is above the maximum of {max}"),
            ));
        }
        if let Some(step) = step {
            let steps = (value - min) / step;
            if (steps - steps.round()).abs() > STEP_TOLERANCE {
                return Err(invalid(
                    rule,
                    format!("value {value} must be a multiple of {step}"),
                ));
            }
        }
    }
    Ok(())
}

fn validate_select(
    rule: &StrategyRule,
    definition: &RuleTypeDefinition,
) -> Result<(), JournalError> {
    let ExpectedValue::Text(choice) = &rule.expected else {
        return Err(invalid(
            rule,
            format!("expected a single option, got {}", rule.expected),
        ));
    };
    if !definition.options.is_empty() && !definition.options.contains(&choice.as_str()) {
        return Err(invalid(
            rule,
            format!(
                "{choice} is not one of: {}",
                definition.options.join(", ")
            ),
        ));
    }
    Ok(())
}

fn validate_multiselect(
    rule: &StrategyRule,
    definition: &RuleTypeDefinition,
) -> Result<(), JournalError> {
    let chosen = rule.expected.allowed_options().ok_or_else(|| {
        invalid(rule, format!("expected a list of options, got {}", rule.expected))
    })?;

    if let Some(unknown) = chosen
        .into_iter()
        .find(|c| !definition.options.is_empty() && !definition.options.contains(c))
    {
        return Err(invalid(
            rule,
            format!(
                "{unknown} is not one of: {}",
                definition.options.join(", ")
            ),
        ));
    }
    Ok(())
}

fn validate_time_range(rule: &StrategyRule) -> Result<(), JournalError> {
    if matches!(rule.expected, ExpectedValue::Unset) {
        return Ok(());
    }
    let window = rule.expected.as_window().ok_or_else(|| {
        invalid(
            rule,
            format!("expected a HH:MM-HH:MM window, got {}", rule.expected),
        )
    })?;
    if window.is_empty() {
        return Ok(());
    }
    for side in [&window.start, &window.end] {
        if parse_minutes(side).is_none() {
            return Err(invalid(rule, format!("{side} is not a valid HH:MM time")));
        }
    }
    Ok(())
}
