//! Strategies and their configured rules.
//!
//! A rule is stored with a loosely shaped `options` container. It is decoded
//! once, when loaded, into an [`ExpectedValue`] so the evaluator only ever
//! sees typed thresholds.

use crate::domain::time_window::TimeWindow;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The configured target of one strategy rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExpectedValue {
    Unset,
    Flag(bool),
    Number(f64),
    Text(String),
    Options(Vec<String>),
    Window(TimeWindow),
}

impl ExpectedValue {
    /// Decode a stored options container.
    ///
    /// An object carrying a `value` field is unwrapped to that field;
    /// anything else is taken as the value itself.
    pub fn from_options(options: &Value) -> Self {
        match options {
            Value::Object(map) if map.contains_key("value") => Self::from_json(&map["value"]),
            other => Self::from_json(other),
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => ExpectedValue::Unset,
            Value::Bool(b) => ExpectedValue::Flag(*b),
            Value::Number(n) => n
                .as_f64()
                .map(ExpectedValue::Number)
                .unwrap_or(ExpectedValue::Unset),
            Value::String(s) => ExpectedValue::Text(s.clone()),
            Value::Array(items) => ExpectedValue::Options(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            Value::Object(map) => {
                let start = map.get("start").and_then(Value::as_str);
                let end = map.get("end").and_then(Value::as_str);
                if start.is_none() && end.is_none() {
                    return ExpectedValue::Unset;
                }
                ExpectedValue::Window(TimeWindow::new(
                    start.unwrap_or_default(),
                    end.unwrap_or_default(),
                ))
            }
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ExpectedValue::Flag(b) => Some(*b),
            ExpectedValue::Text(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ExpectedValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            ExpectedValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// The allowed set for a membership rule, entries trimmed. Unset and blank
    /// text mean no restriction (an empty set); a single string is a
    /// one-element set.
    pub fn allowed_options(&self) -> Option<Vec<&str>> {
        match self {
            ExpectedValue::Unset => Some(Vec::new()),
            ExpectedValue::Options(items) => Some(items.iter().map(|s| s.trim()).collect()),
            ExpectedValue::Text(s) if s.trim().is_empty() => Some(Vec::new()),
            ExpectedValue::Text(s) => Some(vec![s.trim()]),
            _ => None,
        }
    }

    /// The configured window, from either a `{start, end}` pair or the
    /// `"HH:MM-HH:MM"` string form.
    pub fn as_window(&self) -> Option<TimeWindow> {
        match self {
            ExpectedValue::Window(w) => Some(w.clone()),
            ExpectedValue::Text(s) => TimeWindow::parse(s),
            _ => None,
        }
    }
}

impl fmt::Display for ExpectedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedValue::Unset => f.write_str("(not set)"),
            ExpectedValue::Flag(b) => write!(f, "{b}"),
            ExpectedValue::Number(n) => write!(f, "{n}"),
            ExpectedValue::Text(s) => f.write_str(s),
            ExpectedValue::Options(items) if items.is_empty() => f.write_str("(any)"),
            ExpectedValue::Options(items) => f.write_str(&items.join(", ")),
            ExpectedValue::Window(w) => write!(f, "{w}"),
        }
    }
}

/// A rule as persisted alongside its strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRule {
    pub id: String,
    pub rule_type: String,
    pub label: String,
    #[serde(default)]
    pub options: Value,
}

/// A strategy rule with its expected value decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRule {
    pub id: String,
    pub rule_type: String,
    pub label: String,
    pub expected: ExpectedValue,
}

impl StrategyRule {
    pub fn new(
        id: impl Into<String>,
        rule_type: impl Into<String>,
        label: impl Into<String>,
        expected: ExpectedValue,
    ) -> Self {
        Self {
            id: id.into(),
            rule_type: rule_type.into(),
            label: label.into(),
            expected,
        }
    }
}

impl From<&StoredRule> for StrategyRule {
    fn from(stored: &StoredRule) -> Self {
        Self {
            id: stored.id.clone(),
            rule_type: stored.rule_type.clone(),
            label: stored.label.clone(),
            expected: ExpectedValue::from_options(&stored.options),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Vec<StoredRule>,
}

impl Strategy {
    /// The strategy's rules decoded, in their stored order.
    pub fn decoded_rules(&self) -> Vec<StrategyRule> {
        self.rules.iter().map(StrategyRule::from).collect()
    }
}
