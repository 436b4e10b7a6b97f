//! Rule type catalog.
//!
//! Declares every supported rule type and its value domain:
//! - `RuleTypeKey`: the closed set of rule type identifiers
//! - `InputType`: the value domain a rule's expected value lives in
//! - `NumberComparator`: how numeric thresholds compare against actual values
//! - `RuleTypeDefinition`: metadata for one rule type
//! - `RuleCatalog`: the immutable registry handed to the evaluator
//!
//! The catalog carries no behaviour. A rule type only becomes functional once
//! the evaluator has a dispatch arm for it.

use crate::domain::strategy::ExpectedValue;
use crate::domain::time_window::TimeWindow;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleTypeKey {
    EntryConfirmationRequired,
    SetupPresent,
    PersonalModelConfirmed,
    DirectionalBiasRequired,
    SlRequired,
    TpRequired,
    MaxRiskPercent,
    MinRiskReward,
    MaxTradesPerDay,
    SessionAllowed,
    TimeWindowAllowed,
}

impl RuleTypeKey {
    pub const ALL: [RuleTypeKey; 11] = [
        RuleTypeKey::EntryConfirmationRequired,
        RuleTypeKey::SetupPresent,
        RuleTypeKey::PersonalModelConfirmed,
        RuleTypeKey::DirectionalBiasRequired,
        RuleTypeKey::SlRequired,
        RuleTypeKey::TpRequired,
        RuleTypeKey::MaxRiskPercent,
        RuleTypeKey::MinRiskReward,
        RuleTypeKey::MaxTradesPerDay,
        RuleTypeKey::SessionAllowed,
        RuleTypeKey::TimeWindowAllowed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTypeKey::EntryConfirmationRequired => "ENTRY_CONFIRMATION_REQUIRED",
            RuleTypeKey::SetupPresent => "SETUP_PRESENT",
            RuleTypeKey::PersonalModelConfirmed => "PERSONAL_MODEL_CONFIRMED",
            RuleTypeKey::DirectionalBiasRequired => "DIRECTIONAL_BIAS_REQUIRED",
            RuleTypeKey::SlRequired => "SL_REQUIRED",
            RuleTypeKey::TpRequired => "TP_REQUIRED",
            RuleTypeKey::MaxRiskPercent => "MAX_RISK_PERCENT",
            RuleTypeKey::MinRiskReward => "MIN_RISK_REWARD",
            RuleTypeKey::MaxTradesPerDay => "MAX_TRADES_PER_DAY",
            RuleTypeKey::SessionAllowed => "SESSION_ALLOWED",
            RuleTypeKey::TimeWindowAllowed => "TIME_WINDOW_ALLOWED",
        }
    }
}

impl fmt::Display for RuleTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule type: {0}")]
pub struct UnknownRuleType(pub String);

impl FromStr for RuleTypeKey {
    type Err = UnknownRuleType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleTypeKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownRuleType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Subjective,
    RiskExecution,
    Context,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Boolean,
    Number,
    Select,
    Multiselect,
    TimeRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberComparator {
    Gte,
    Lte,
    Eq,
}

const EPSILON: f64 = 1e-9;

impl NumberComparator {
    /// Whether `actual` satisfies `threshold` under this comparator.
    /// Boundaries are inclusive.
    pub fn holds(&self, actual: f64, threshold: f64) -> bool {
        match self {
            NumberComparator::Gte => actual >= threshold,
            NumberComparator::Lte => actual <= threshold,
            NumberComparator::Eq => (actual - threshold).abs() < EPSILON,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            NumberComparator::Gte => ">=",
            NumberComparator::Lte => "<=",
            NumberComparator::Eq => "=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberBounds {
    pub min: f64,
    pub max: f64,
    pub step: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTypeDefinition {
    pub key: RuleTypeKey,
    pub name: &'static str,
    pub description: &'static str,
    pub category: RuleCategory,
    pub input_type: InputType,
    pub default_value: ExpectedValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_comparator: Option<NumberComparator>,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<NumberBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
}

fn no_options(options: &&'static [&'static str]) -> bool {
    options.is_empty()
}

pub const SESSIONS: &[&str] = &["asia", "london", "new_york", "london_new_york_overlap"];

fn boolean_rule(
    key: RuleTypeKey,
    category: RuleCategory,
    name: &'static str,
    description: &'static str,
) -> RuleTypeDefinition {
    RuleTypeDefinition {
        key,
        name,
        description,
        category,
        input_type: InputType::Boolean,
        default_value: ExpectedValue::Flag(true),
        number_comparator: None,
        options: &[],
        validation: None,
        unit: None,
    }
}

fn number_rule(
    key: RuleTypeKey,
    name: &'static str,
    description: &'static str,
    comparator: NumberComparator,
    default: f64,
    bounds: NumberBounds,
    unit: Option<&'static str>,
) -> RuleTypeDefinition {
    RuleTypeDefinition {
        key,
        name,
        description,
        category: RuleCategory::RiskExecution,
        input_type: InputType::Number,
        default_value: ExpectedValue::Number(default),
        number_comparator: Some(comparator),
        options: &[],
        validation: Some(bounds),
        unit,
    }
}

/// The built-in rule type definitions, in catalog order.
pub fn standard_definitions() -> Vec<RuleTypeDefinition> {
    vec![
        boolean_rule(
            RuleTypeKey::EntryConfirmationRequired,
            RuleCategory::Subjective,
            "Entry confirmation required",
            "Only enter after the entry trigger has confirmed",
        ),
        boolean_rule(
            RuleTypeKey::SetupPresent,
            RuleCategory::Subjective,
            "Valid setup present",
            "A recognised setup must be present before entering",
        ),
        boolean_rule(
            RuleTypeKey::PersonalModelConfirmed,
            RuleCategory::Subjective,
            "Personal model confirmed",
            "The trade must match your personal trading model",
        ),
        boolean_rule(
            RuleTypeKey::DirectionalBiasRequired,
            RuleCategory::Subjective,
            "Clear directional bias",
            "Only trade in the direction of a clear higher-timeframe bias",
        ),
        boolean_rule(
            RuleTypeKey::SlRequired,
            RuleCategory::RiskExecution,
            "Stop loss required",
            "Every trade must have a stop loss",
        ),
        boolean_rule(
            RuleTypeKey::TpRequired,
            RuleCategory::RiskExecution,
            "Take profit required",
            "Every trade must have a take profit target",
        ),
        number_rule(
            RuleTypeKey::MaxRiskPercent,
            "Maximum risk per trade",
            "Risk no more than this percentage of the account on a single trade",
            NumberComparator::Lte,
            1.0,
            NumberBounds {
                min: 0.01,
                max: 100.0,
                step: None,
            },
            Some("%"),
        ),
        number_rule(
            RuleTypeKey::MinRiskReward,
            "Minimum risk-reward",
            "Only take trades whose reward is at least this multiple of the risk",
            NumberComparator::Gte,
            2.0,
            NumberBounds {
                min: 0.1,
                max: 20.0,
                step: None,
            },
            Some("R"),
        ),
        number_rule(
            RuleTypeKey::MaxTradesPerDay,
            "Maximum trades per day",
            "Stop trading once this many trades have been taken in a day",
            NumberComparator::Lte,
            3.0,
            NumberBounds {
                min: 1.0,
                max: 50.0,
                step: Some(1.0),
            },
            None,
        ),
        RuleTypeDefinition {
            key: RuleTypeKey::SessionAllowed,
            name: "Allowed sessions",
            description: "Only trade during the selected market sessions",
            category: RuleCategory::Context,
            input_type: InputType::Multiselect,
            default_value: ExpectedValue::Options(Vec::new()),
            number_comparator: None,
            options: SESSIONS,
            validation: None,
            unit: None,
        },
        RuleTypeDefinition {
            key: RuleTypeKey::TimeWindowAllowed,
            name: "Allowed time window",
            description: "Only enter trades inside this time-of-day window",
            category: RuleCategory::Context,
            input_type: InputType::TimeRange,
            default_value: ExpectedValue::Window(TimeWindow::new("08:00", "17:00")),
            number_comparator: None,
            options: &[],
            validation: None,
            unit: None,
        },
    ]
}

/// Immutable registry of rule type definitions.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    definitions: BTreeMap<RuleTypeKey, RuleTypeDefinition>,
}

impl RuleCatalog {
    pub fn standard() -> Self {
        Self::from_definitions(standard_definitions())
    }

    pub fn from_definitions(definitions: impl IntoIterator<Item = RuleTypeDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|d| (d.key, d)).collect(),
        }
    }

    /// A copy of this catalog with the given rule types removed.
    pub fn without(&self, keys: &[RuleTypeKey]) -> Self {
        let mut definitions = self.definitions.clone();
        for key in keys {
            definitions.remove(key);
        }
        Self { definitions }
    }

    /// Look up a rule type by its stored string key.
    pub fn lookup(&self, key: &str) -> Option<&RuleTypeDefinition> {
        let key = key.parse::<RuleTypeKey>().ok()?;
        self.get(key)
    }

    pub fn get(&self, key: RuleTypeKey) -> Option<&RuleTypeDefinition> {
        self.definitions.get(&key)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &RuleTypeDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
