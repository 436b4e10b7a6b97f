#![allow(dead_code)]

use journalcheck::domain::error::JournalError;
use journalcheck::domain::rule_type::RuleTypeKey;
use journalcheck::domain::strategy::{ExpectedValue, StoredRule, Strategy, StrategyRule};
use journalcheck::domain::time_window::TimeWindow;
use journalcheck::domain::trade::{Trade, TradeInputs};
use journalcheck::ports::journal_port::JournalPort;
use serde_json::Value;
use std::collections::HashMap;

pub struct MockJournalPort {
    pub trades: Vec<Trade>,
    pub strategies: Vec<Strategy>,
    pub inputs: HashMap<String, TradeInputs>,
    pub fail_inputs: bool,
}

impl MockJournalPort {
    pub fn new() -> Self {
        Self {
            trades: Vec::new(),
            strategies: Vec::new(),
            inputs: HashMap::new(),
            fail_inputs: false,
        }
    }

    pub fn with_trade(mut self, trade: Trade) -> Self {
        self.trades.push(trade);
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn with_inputs(mut self, trade_id: &str, inputs: TradeInputs) -> Self {
        self.inputs.insert(trade_id.to_string(), inputs);
        self
    }

    pub fn failing_inputs(mut self) -> Self {
        self.fail_inputs = true;
        self
    }
}

impl JournalPort for MockJournalPort {
    fn fetch_trade(&self, trade_id: &str) -> Result<Trade, JournalError> {
        self.trades
            .iter()
            .find(|t| t.id == trade_id)
            .cloned()
            .ok_or_else(|| JournalError::NotFound {
                kind: "trade",
                id: trade_id.to_string(),
            })
    }

    fn fetch_strategy(&self, strategy_id: &str) -> Result<Strategy, JournalError> {
        self.strategies
            .iter()
            .find(|s| s.id == strategy_id)
            .cloned()
            .ok_or_else(|| JournalError::NotFound {
                kind: "strategy",
                id: strategy_id.to_string(),
            })
    }

    fn list_trades(&self, strategy_id: &str) -> Result<Vec<Trade>, JournalError> {
        Ok(self
            .trades
            .iter()
            .filter(|t| t.strategy_id.as_deref() == Some(strategy_id))
            .cloned()
            .collect())
    }

    fn fetch_inputs(&self, trade_id: &str) -> Result<Option<TradeInputs>, JournalError> {
        if self.fail_inputs {
            return Err(JournalError::Journal {
                reason: "inputs table unavailable".into(),
            });
        }
        Ok(self.inputs.get(trade_id).cloned())
    }
}

pub fn make_trade(id: &str) -> Trade {
    Trade {
        id: id.to_string(),
        strategy_id: Some("s-1".to_string()),
        symbol: "EURUSD".to_string(),
        ..Default::default()
    }
}

pub fn flag_rule(id: &str, key: RuleTypeKey, expected: bool) -> StrategyRule {
    StrategyRule::new(id, key.as_str(), key.as_str().to_lowercase(), ExpectedValue::Flag(expected))
}

pub fn number_rule(id: &str, key: RuleTypeKey, threshold: f64) -> StrategyRule {
    StrategyRule::new(
        id,
        key.as_str(),
        key.as_str().to_lowercase(),
        ExpectedValue::Number(threshold),
    )
}

pub fn session_rule(id: &str, sessions: &[&str]) -> StrategyRule {
    StrategyRule::new(
        id,
        RuleTypeKey::SessionAllowed.as_str(),
        "Allowed sessions",
        ExpectedValue::Options(sessions.iter().map(|s| s.to_string()).collect()),
    )
}

pub fn window_rule(id: &str, start: &str, end: &str) -> StrategyRule {
    StrategyRule::new(
        id,
        RuleTypeKey::TimeWindowAllowed.as_str(),
        "Trading hours",
        ExpectedValue::Window(TimeWindow::new(start, end)),
    )
}

pub fn stored_rule(id: &str, rule_type: &str, options: Value) -> StoredRule {
    StoredRule {
        id: id.to_string(),
        rule_type: rule_type.to_string(),
        label: rule_type.to_lowercase(),
        options,
    }
}

pub fn make_strategy(id: &str, rules: Vec<StoredRule>) -> Strategy {
    Strategy {
        id: id.to_string(),
        name: format!("Strategy {id}"),
        description: None,
        rules,
    }
}
