//! Strategy compliance evaluation.
//!
//! Checks one trade against a strategy's rules and reports, per rule, what was
//! expected, what was observed and whether it passed.
//!
//! # Evaluation Semantics
//!
//! - Rules are evaluated in order and every rule is evaluated; nothing
//!   short-circuits on the first violation
//! - Rules whose type is not in the catalog are skipped and produce no result
//! - Actual values come from `TradeInputs` first, then from the trade record
//! - A missing actual value fails the rule, except for `TIME_WINDOW_ALLOWED`,
//!   which passes when no trade time or no window is known
//! - Comparators: `<=` for `MAX_RISK_PERCENT` and `MAX_TRADES_PER_DAY`, `>=`
//!   for `MIN_RISK_REWARD`, equality for boolean rules, membership for
//!   `SESSION_ALLOWED`, closed interval for `TIME_WINDOW_ALLOWED`

use crate::domain::rule_type::{NumberComparator, RuleCatalog, RuleTypeKey};
use crate::domain::strategy::{ExpectedValue, StrategyRule};
use crate::domain::trade::{Trade, TradeInputs};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// The value observed for a rule at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActualValue {
    Missing,
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for ActualValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualValue::Missing => f.write_str("(not recorded)"),
            ActualValue::Flag(b) => write!(f, "{b}"),
            ActualValue::Number(n) => write!(f, "{n}"),
            ActualValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvaluationResult {
    pub rule_id: String,
    pub rule_type: String,
    pub rule_label: String,
    pub expected_value: ExpectedValue,
    pub actual_value: ActualValue,
    pub passed: bool,
    pub violation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceEvaluationResult {
    pub overall_compliant: bool,
    pub rule_evaluations: Vec<RuleEvaluationResult>,
    pub violations: Vec<RuleEvaluationResult>,
}

impl ComplianceEvaluationResult {
    pub fn from_evaluations(rule_evaluations: Vec<RuleEvaluationResult>) -> Self {
        let violations: Vec<RuleEvaluationResult> = rule_evaluations
            .iter()
            .filter(|r| !r.passed)
            .cloned()
            .collect();
        Self {
            overall_compliant: violations.is_empty(),
            rule_evaluations,
            violations,
        }
    }

    pub fn violation_reasons(&self) -> Vec<&str> {
        self.violations
            .iter()
            .filter_map(|v| v.violation_reason.as_deref())
            .collect()
    }
}

struct Outcome {
    actual: ActualValue,
    violation: Option<String>,
}

impl Outcome {
    fn pass(actual: ActualValue) -> Self {
        Self {
            actual,
            violation: None,
        }
    }

    fn fail(actual: ActualValue, reason: String) -> Self {
        Self {
            actual,
            violation: Some(reason),
        }
    }
}

/// Evaluates trades against strategy rules using a fixed catalog.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceEvaluator<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> ComplianceEvaluator<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn evaluate(
        &self,
        trade: &Trade,
        rules: &[StrategyRule],
        inputs: &TradeInputs,
    ) -> ComplianceEvaluationResult {
        let evaluations: Vec<RuleEvaluationResult> = rules
            .iter()
            .filter_map(|rule| self.evaluate_rule(rule, trade, inputs))
            .collect();
        let result = ComplianceEvaluationResult::from_evaluations(evaluations);
        debug!(
            trade_id = %trade.id,
            rules = rules.len(),
            evaluated = result.rule_evaluations.len(),
            violations = result.violations.len(),
            "evaluated trade compliance"
        );
        result
    }

    /// Evaluate a single rule. Returns `None` when its type is not in the catalog.
    pub fn evaluate_rule(
        &self,
        rule: &StrategyRule,
        trade: &Trade,
        inputs: &TradeInputs,
    ) -> Option<RuleEvaluationResult> {
        let Some(definition) = self.catalog.lookup(&rule.rule_type) else {
            debug!(
                rule_id = %rule.id,
                rule_type = %rule.rule_type,
                "skipping rule with unknown type"
            );
            return None;
        };

        let outcome = match definition.key {
            RuleTypeKey::EntryConfirmationRequired => check_flag(
                rule,
                "Entry confirmation",
                inputs.entry_confirmed.or(trade.entry_confirmed),
            ),
            RuleTypeKey::SetupPresent => check_flag(rule, "A valid setup", inputs.setup_present),
            RuleTypeKey::PersonalModelConfirmed => check_flag(
                rule,
                "Personal model confirmation",
                inputs.personal_model_confirmed,
            ),
            RuleTypeKey::DirectionalBiasRequired => check_flag(
                rule,
                "A clear directional bias",
                inputs
                    .directional_bias_clear
                    .or(trade.directional_bias_clear),
            ),
            RuleTypeKey::SlRequired => check_flag(
                rule,
                "A stop loss",
                inputs.stop_loss_set.or(Some(trade.has_stop_loss())),
            ),
            RuleTypeKey::TpRequired => check_flag(
                rule,
                "A take profit",
                inputs.take_profit_set.or(Some(trade.has_take_profit())),
            ),
            RuleTypeKey::MaxRiskPercent => check_threshold(
                rule,
                NumberComparator::Lte,
                inputs.risk_percent,
                |actual, limit| format!("Risk of {actual}% exceeds the maximum of {limit}%"),
                |limit| format!("Risk per trade was not recorded (maximum {limit}%)"),
            ),
            RuleTypeKey::MinRiskReward => check_threshold(
                rule,
                NumberComparator::Gte,
                inputs.risk_reward.or_else(|| trade.parsed_risk_reward()),
                |actual, limit| format!("Risk-reward of {actual} is below the minimum of {limit}"),
                |limit| format!("Risk-reward was not recorded (minimum {limit})"),
            ),
            RuleTypeKey::MaxTradesPerDay => check_threshold(
                rule,
                NumberComparator::Lte,
                inputs.trades_taken_today.map(f64::from),
                |actual, limit| {
                    format!("{actual} trades taken today exceeds the maximum of {limit}")
                },
                |limit| format!("Trades taken today was not recorded (maximum {limit})"),
            ),
            RuleTypeKey::SessionAllowed => check_session(rule, inputs.current_session.as_deref()),
            RuleTypeKey::TimeWindowAllowed => check_time_window(rule, inputs.trade_time.as_deref()),
        };

        Some(RuleEvaluationResult {
            rule_id: rule.id.clone(),
            rule_type: rule.rule_type.clone(),
            rule_label: rule.label.clone(),
            expected_value: rule.expected.clone(),
            actual_value: outcome.actual,
            passed: outcome.violation.is_none(),
            violation_reason: outcome.violation,
        })
    }
}

/// Evaluate `trade` against `rules` with the given catalog.
pub fn evaluate(
    catalog: &RuleCatalog,
    trade: &Trade,
    rules: &[StrategyRule],
    inputs: &TradeInputs,
) -> ComplianceEvaluationResult {
    ComplianceEvaluator::new(catalog).evaluate(trade, rules, inputs)
}

fn misconfigured(rule: &StrategyRule) -> String {
    format!("{} has no valid target configured", rule.label)
}

fn check_flag(rule: &StrategyRule, subject: &str, actual: Option<bool>) -> Outcome {
    let actual_value = actual.map_or(ActualValue::Missing, ActualValue::Flag);
    let Some(expected) = rule.expected.as_flag() else {
        return Outcome::fail(actual_value, misconfigured(rule));
    };

    match actual {
        Some(observed) if observed == expected => Outcome::pass(actual_value),
        Some(false) => Outcome::fail(
            actual_value,
            format!("{subject} is required but was missing"),
        ),
        Some(true) => Outcome::fail(
            actual_value,
            format!("{subject} was present but this strategy expects none"),
        ),
        None => Outcome::fail(
            actual_value,
            format!("{subject} was not recorded for this trade"),
        ),
    }
}

fn check_threshold(
    rule: &StrategyRule,
    comparator: NumberComparator,
    actual: Option<f64>,
    describe_breach: impl Fn(f64, f64) -> String,
    describe_missing: impl Fn(f64) -> String,
) -> Outcome {
    let actual_value = actual.map_or(ActualValue::Missing, ActualValue::Number);
    let Some(threshold) = rule.expected.as_number() else {
        return Outcome::fail(actual_value, misconfigured(rule));
    };

    match actual {
        Some(observed) if comparator.holds(observed, threshold) => Outcome::pass(actual_value),
        Some(observed) => Outcome::fail(actual_value, describe_breach(observed, threshold)),
        None => Outcome::fail(actual_value, describe_missing(threshold)),
    }
}

fn check_session(rule: &StrategyRule, session: Option<&str>) -> Outcome {
    let session = session.map(str::trim).filter(|s| !s.is_empty());
    let actual_value = session.map_or(ActualValue::Missing, |s| ActualValue::Text(s.to_string()));
    let Some(allowed) = rule.expected.allowed_options() else {
        return Outcome::fail(actual_value, misconfigured(rule));
    };

    if allowed.is_empty() {
        return Outcome::pass(actual_value);
    }

    match session {
        Some(s) if allowed.contains(&s) => Outcome::pass(actual_value),
        Some(s) => Outcome::fail(
            actual_value,
            format!(
                "Session {s} is not one of the allowed sessions: {}",
                allowed.join(", ")
            ),
        ),
        None => Outcome::fail(
            actual_value,
            format!("Session was not recorded (allowed: {})", allowed.join(", ")),
        ),
    }
}

// Fails open: no trade time, no window, or an unparseable time all pass.
fn check_time_window(rule: &StrategyRule, trade_time: Option<&str>) -> Outcome {
    let trade_time = trade_time.map(str::trim).filter(|t| !t.is_empty());
    let Some(time) = trade_time else {
        return Outcome::pass(ActualValue::Missing);
    };
    let actual_value = ActualValue::Text(time.to_string());

    let Some(window) = rule.expected.as_window().filter(|w| !w.is_empty()) else {
        return Outcome::pass(actual_value);
    };

    match window.contains(time) {
        Some(false) => Outcome::fail(
            actual_value,
            format!("Trade time {time} is outside the allowed window {window}"),
        ),
        Some(true) | None => Outcome::pass(actual_value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time_window::TimeWindow;

    fn catalog() -> RuleCatalog {
        RuleCatalog::standard()
    }

    fn rule(id: &str, rule_type: RuleTypeKey, expected: ExpectedValue) -> StrategyRule {
        StrategyRule::new(id, rule_type.as_str(), format!("{rule_type} rule"), expected)
    }

    fn eval_one(rule: &StrategyRule, trade: &Trade, inputs: &TradeInputs) -> RuleEvaluationResult {
        let catalog = catalog();
        ComplianceEvaluator::new(&catalog)
            .evaluate_rule(rule, trade, inputs)
            .unwrap()
    }

    fn trade() -> Trade {
        Trade {
            id: "t-1".into(),
            symbol: "EURUSD".into(),
            ..Default::default()
        }
    }

    #[test]
    fn stop_loss_falls_back_to_trade_field() {
        let r = rule("r", RuleTypeKey::SlRequired, ExpectedValue::Flag(true));
        let mut t = trade();
        t.stop_loss = Some("1.2050".into());
        let result = eval_one(&r, &t, &TradeInputs::default());
        assert!(result.passed);
        assert_eq!(result.actual_value, ActualValue::Flag(true));
        assert_eq!(result.violation_reason, None);

        t.stop_loss = Some(String::new());
        let result = eval_one(&r, &t, &TradeInputs::default());
        assert!(!result.passed);
        let reason = result.violation_reason.unwrap().to_lowercase();
        assert!(reason.contains("stop loss"), "{reason}");
    }

    #[test]
    fn inputs_override_trade_fields() {
        let r = rule("r", RuleTypeKey::SlRequired, ExpectedValue::Flag(true));
        let mut t = trade();
        t.stop_loss = Some("1.2050".into());
        let inputs = TradeInputs {
            stop_loss_set: Some(false),
            ..Default::default()
        };
        assert!(!eval_one(&r, &t, &inputs).passed);

        let r = rule(
            "r",
            RuleTypeKey::DirectionalBiasRequired,
            ExpectedValue::Flag(true),
        );
        t.directional_bias_clear = Some(false);
        let inputs = TradeInputs {
            directional_bias_clear: Some(true),
            ..Default::default()
        };
        assert!(eval_one(&r, &t, &inputs).passed);
    }

    #[test]
    fn boolean_rule_without_evidence_fails() {
        let r = rule("r", RuleTypeKey::SetupPresent, ExpectedValue::Flag(true));
        let result = eval_one(&r, &trade(), &TradeInputs::default());
        assert!(!result.passed);
        assert_eq!(result.actual_value, ActualValue::Missing);
        assert_eq!(
            result.violation_reason.as_deref(),
            Some("A valid setup was not recorded for this trade")
        );
    }

    #[test]
    fn entry_confirmation_uses_trade_flag() {
        let r = rule(
            "r",
            RuleTypeKey::EntryConfirmationRequired,
            ExpectedValue::Flag(true),
        );
        let mut t = trade();
        t.entry_confirmed = Some(true);
        assert!(eval_one(&r, &t, &TradeInputs::default()).passed);
        t.entry_confirmed = Some(false);
        let result = eval_one(&r, &t, &TradeInputs::default());
        assert_eq!(
            result.violation_reason.as_deref(),
            Some("Entry confirmation is required but was missing")
        );
    }

    #[test]
    fn boolean_rule_expecting_false_uses_equality() {
        let r = rule("r", RuleTypeKey::TpRequired, ExpectedValue::Flag(false));
        let mut t = trade();
        assert!(eval_one(&r, &t, &TradeInputs::default()).passed);
        t.take_profit = Some("1.3".into());
        assert!(!eval_one(&r, &t, &TradeInputs::default()).passed);
    }

    #[test]
    fn boolean_rule_with_numeric_target_is_misconfigured() {
        let r = rule("r", RuleTypeKey::SlRequired, ExpectedValue::Number(1.0));
        let result = eval_one(&r, &trade(), &TradeInputs::default());
        assert!(!result.passed);
        assert_eq!(
            result.violation_reason.as_deref(),
            Some("SL_REQUIRED rule has no valid target configured")
        );
    }

    #[test]
    fn max_risk_percent_is_inclusive() {
        let r = rule("r", RuleTypeKey::MaxRiskPercent, ExpectedValue::Number(1.0));
        let over = TradeInputs {
            risk_percent: Some(1.5),
            ..Default::default()
        };
        let result = eval_one(&r, &trade(), &over);
        assert!(!result.passed);
        assert_eq!(
            result.violation_reason.as_deref(),
            Some("Risk of 1.5% exceeds the maximum of 1%")
        );

        let at_limit = TradeInputs {
            risk_percent: Some(1.0),
            ..Default::default()
        };
        assert!(eval_one(&r, &trade(), &at_limit).passed);
    }

    #[test]
    fn max_risk_percent_without_input_fails() {
        let r = rule("r", RuleTypeKey::MaxRiskPercent, ExpectedValue::Number(1.0));
        let result = eval_one(&r, &trade(), &TradeInputs::default());
        assert!(!result.passed);
        assert_eq!(result.actual_value, ActualValue::Missing);
    }

    #[test]
    fn min_risk_reward_direction() {
        let r = rule("r", RuleTypeKey::MinRiskReward, ExpectedValue::Number(2.0));
        let low = TradeInputs {
            risk_reward: Some(1.9),
            ..Default::default()
        };
        assert!(!eval_one(&r, &trade(), &low).passed);
        let ok = TradeInputs {
            risk_reward: Some(2.0),
            ..Default::default()
        };
        assert!(eval_one(&r, &trade(), &ok).passed);
    }

    #[test]
    fn min_risk_reward_falls_back_to_trade_string() {
        let r = rule("r", RuleTypeKey::MinRiskReward, ExpectedValue::Number(2.0));
        let mut t = trade();
        t.risk_reward = Some("2.5".into());
        let result = eval_one(&r, &t, &TradeInputs::default());
        assert!(result.passed);
        assert_eq!(result.actual_value, ActualValue::Number(2.5));

        t.risk_reward = Some("n/a".into());
        assert!(!eval_one(&r, &t, &TradeInputs::default()).passed);
    }

    #[test]
    fn threshold_stored_as_text_is_accepted() {
        let r = rule(
            "r",
            RuleTypeKey::MaxTradesPerDay,
            ExpectedValue::Text("3".into()),
        );
        let inputs = TradeInputs {
            trades_taken_today: Some(3),
            ..Default::default()
        };
        assert!(eval_one(&r, &trade(), &inputs).passed);
        let inputs = TradeInputs {
            trades_taken_today: Some(4),
            ..Default::default()
        };
        let result = eval_one(&r, &trade(), &inputs);
        assert_eq!(
            result.violation_reason.as_deref(),
            Some("4 trades taken today exceeds the maximum of 3")
        );
    }

    #[test]
    fn numeric_rule_without_threshold_fails() {
        let r = rule("r", RuleTypeKey::MaxRiskPercent, ExpectedValue::Unset);
        let inputs = TradeInputs {
            risk_percent: Some(0.5),
            ..Default::default()
        };
        assert!(!eval_one(&r, &trade(), &inputs).passed);
    }

    #[test]
    fn empty_session_set_is_unrestricted() {
        let r = rule(
            "r",
            RuleTypeKey::SessionAllowed,
            ExpectedValue::Options(Vec::new()),
        );
        assert!(eval_one(&r, &trade(), &TradeInputs::default()).passed);
        let inputs = TradeInputs {
            current_session: Some("asia".into()),
            ..Default::default()
        };
        assert!(eval_one(&r, &trade(), &inputs).passed);
    }

    #[test]
    fn session_membership() {
        let r = rule(
            "r",
            RuleTypeKey::SessionAllowed,
            ExpectedValue::Options(vec!["london".into(), "new_york".into()]),
        );
        let london = TradeInputs {
            current_session: Some("london".into()),
            ..Default::default()
        };
        assert!(eval_one(&r, &trade(), &london).passed);

        let asia = TradeInputs {
            current_session: Some("asia".into()),
            ..Default::default()
        };
        let result = eval_one(&r, &trade(), &asia);
        assert!(!result.passed);
        assert_eq!(
            result.violation_reason.as_deref(),
            Some("Session asia is not one of the allowed sessions: london, new_york")
        );

        let result = eval_one(&r, &trade(), &TradeInputs::default());
        assert!(!result.passed);
        assert_eq!(result.actual_value, ActualValue::Missing);
    }

    #[test]
    fn session_matching_trims_both_sides() {
        let r = rule(
            "r",
            RuleTypeKey::SessionAllowed,
            ExpectedValue::Options(vec![" london".into(), "new_york ".into()]),
        );
        for session in ["london", " london ", "new_york"] {
            let inputs = TradeInputs {
                current_session: Some(session.into()),
                ..Default::default()
            };
            assert!(eval_one(&r, &trade(), &inputs).passed, "{session:?}");
        }
    }

    #[test]
    fn single_session_string_acts_as_set() {
        let r = rule(
            "r",
            RuleTypeKey::SessionAllowed,
            ExpectedValue::Text("london".into()),
        );
        let inputs = TradeInputs {
            current_session: Some("london".into()),
            ..Default::default()
        };
        assert!(eval_one(&r, &trade(), &inputs).passed);
    }

    #[test]
    fn time_window_boundaries() {
        let r = rule(
            "r",
            RuleTypeKey::TimeWindowAllowed,
            ExpectedValue::Window(TimeWindow::new("09:00", "12:00")),
        );
        let at = |time: &str| TradeInputs {
            trade_time: Some(time.into()),
            ..Default::default()
        };
        assert!(eval_one(&r, &trade(), &at("09:00")).passed);
        assert!(eval_one(&r, &trade(), &at("12:00")).passed);
        let result = eval_one(&r, &trade(), &at("08:59"));
        assert!(!result.passed);
        assert_eq!(
            result.violation_reason.as_deref(),
            Some("Trade time 08:59 is outside the allowed window 09:00-12:00")
        );
    }

    #[test]
    fn reversed_time_window_fails_every_parseable_time() {
        let r = rule(
            "r",
            RuleTypeKey::TimeWindowAllowed,
            ExpectedValue::Window(TimeWindow::new("22:00", "02:00")),
        );
        for time in ["23:00", "01:00", "22:00", "12:00"] {
            let inputs = TradeInputs {
                trade_time: Some(time.into()),
                ..Default::default()
            };
            let result = eval_one(&r, &trade(), &inputs);
            assert!(!result.passed, "{time}");
            assert_eq!(
                result.violation_reason,
                Some(format!("Trade time {time} is outside the allowed window 22:00-02:00"))
            );
        }
    }

    #[test]
    fn time_window_passes_without_trade_time() {
        let r = rule(
            "r",
            RuleTypeKey::TimeWindowAllowed,
            ExpectedValue::Window(TimeWindow::new("09:00", "12:00")),
        );
        let result = eval_one(&r, &trade(), &TradeInputs::default());
        assert!(result.passed);
        assert_eq!(result.actual_value, ActualValue::Missing);
    }

    #[test]
    fn time_window_string_form() {
        let r = rule(
            "r",
            RuleTypeKey::TimeWindowAllowed,
            ExpectedValue::Text("09:00-12:00".into()),
        );
        let inputs = TradeInputs {
            trade_time: Some("13:00".into()),
            ..Default::default()
        };
        assert!(!eval_one(&r, &trade(), &inputs).passed);
    }

    #[test]
    fn time_window_unset_or_malformed_passes() {
        let inputs = TradeInputs {
            trade_time: Some("23:00".into()),
            ..Default::default()
        };
        for expected in [
            ExpectedValue::Unset,
            ExpectedValue::Text(String::new()),
            ExpectedValue::Window(TimeWindow::new("", "")),
            ExpectedValue::Window(TimeWindow::new("9am", "12:00")),
        ] {
            let r = rule("r", RuleTypeKey::TimeWindowAllowed, expected);
            assert!(eval_one(&r, &trade(), &inputs).passed);
        }

        let r = rule(
            "r",
            RuleTypeKey::TimeWindowAllowed,
            ExpectedValue::Window(TimeWindow::new("09:00", "12:00")),
        );
        let garbled = TradeInputs {
            trade_time: Some("noonish".into()),
            ..Default::default()
        };
        assert!(eval_one(&r, &trade(), &garbled).passed);
    }

    #[test]
    fn unknown_rule_type_is_skipped() {
        let catalog = catalog();
        let rules = vec![
            StrategyRule::new("x", "NOT_A_REAL_KEY", "Mystery", ExpectedValue::Flag(true)),
            rule("r", RuleTypeKey::SetupPresent, ExpectedValue::Flag(true)),
        ];
        let inputs = TradeInputs {
            setup_present: Some(true),
            ..Default::default()
        };
        let result = evaluate(&catalog, &trade(), &rules, &inputs);
        assert_eq!(result.rule_evaluations.len(), 1);
        assert_eq!(result.rule_evaluations[0].rule_id, "r");
        assert!(result.overall_compliant);
    }

    #[test]
    fn reduced_catalog_skips_removed_types() {
        let catalog = RuleCatalog::standard().without(&[RuleTypeKey::SetupPresent]);
        let rules = vec![rule("r", RuleTypeKey::SetupPresent, ExpectedValue::Flag(true))];
        let result = evaluate(&catalog, &trade(), &rules, &TradeInputs::default());
        assert!(result.rule_evaluations.is_empty());
        assert!(result.overall_compliant);
    }

    #[test]
    fn every_rule_is_evaluated_after_a_violation() {
        let catalog = catalog();
        let rules = vec![
            rule("a", RuleTypeKey::SetupPresent, ExpectedValue::Flag(true)),
            rule("b", RuleTypeKey::SlRequired, ExpectedValue::Flag(true)),
            rule("c", RuleTypeKey::TpRequired, ExpectedValue::Flag(true)),
        ];
        let result = evaluate(&catalog, &trade(), &rules, &TradeInputs::default());
        assert_eq!(result.rule_evaluations.len(), 3);
        assert_eq!(result.violations.len(), 3);
        assert!(!result.overall_compliant);
        assert_eq!(result.violation_reasons().len(), 3);
    }

    #[test]
    fn empty_rule_list_is_compliant() {
        let catalog = catalog();
        let result = evaluate(&catalog, &trade(), &[], &TradeInputs::default());
        assert!(result.overall_compliant);
        assert!(result.rule_evaluations.is_empty());
        assert!(result.violations.is_empty());
    }

    #[test]
    fn result_serializes_with_camel_case_fields() {
        let catalog = catalog();
        let rules = vec![rule("r", RuleTypeKey::MaxRiskPercent, ExpectedValue::Number(1.0))];
        let inputs = TradeInputs {
            risk_percent: Some(2.0),
            ..Default::default()
        };
        let result = evaluate(&catalog, &trade(), &rules, &inputs);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["overallCompliant"], false);
        assert_eq!(json["ruleEvaluations"][0]["ruleId"], "r");
        assert_eq!(json["ruleEvaluations"][0]["ruleType"], "MAX_RISK_PERCENT");
        assert_eq!(json["ruleEvaluations"][0]["expectedValue"], 1.0);
        assert_eq!(json["ruleEvaluations"][0]["actualValue"], 2.0);
        assert_eq!(json["violations"][0]["passed"], false);
        assert!(json["violations"][0]["violationReason"].is_string());
    }
}
