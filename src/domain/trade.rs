//! Trades and the situational inputs supplied alongside them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A journaled trade, as returned by storage.
///
/// Only the fields the compliance engine can fall back on are modelled here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    #[serde(default)]
    pub strategy_id: Option<String>,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub opened_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub stop_loss: Option<String>,
    #[serde(default)]
    pub take_profit: Option<String>,
    #[serde(default)]
    pub risk_reward: Option<String>,
    #[serde(default)]
    pub directional_bias_clear: Option<bool>,
    #[serde(default)]
    pub entry_confirmed: Option<bool>,
    #[serde(default)]
    pub pnl: Option<f64>,
}

fn is_filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.trim().is_empty())
}

impl Trade {
    pub fn has_stop_loss(&self) -> bool {
        is_filled(&self.stop_loss)
    }

    pub fn has_take_profit(&self) -> bool {
        is_filled(&self.take_profit)
    }

    /// The recorded risk-reward ratio as a number, if it parses.
    pub fn parsed_risk_reward(&self) -> Option<f64> {
        self.risk_reward
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|rr| rr.is_finite())
    }

    /// Entry time of day as `HH:MM`, from the opening timestamp.
    pub fn entry_time_of_day(&self) -> Option<String> {
        self.opened_at.map(|ts| ts.format("%H:%M").to_string())
    }
}

/// Situational facts about a trade that are not stored on the trade itself.
///
/// Every field is optional. A present field takes precedence over the
/// trade's own value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeInputs {
    pub entry_confirmed: Option<bool>,
    pub setup_present: Option<bool>,
    pub personal_model_confirmed: Option<bool>,
    pub stop_loss_set: Option<bool>,
    pub take_profit_set: Option<bool>,
    pub risk_percent: Option<f64>,
    pub risk_reward: Option<f64>,
    pub trades_taken_today: Option<u32>,
    pub current_session: Option<String>,
    pub trade_time: Option<String>,
    pub directional_bias_clear: Option<bool>,
}

impl TradeInputs {
    /// Layer `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merge(self, overrides: TradeInputs) -> TradeInputs {
        TradeInputs {
            entry_confirmed: overrides.entry_confirmed.or(self.entry_confirmed),
            setup_present: overrides.setup_present.or(self.setup_present),
            personal_model_confirmed: overrides
                .personal_model_confirmed
                .or(self.personal_model_confirmed),
            stop_loss_set: overrides.stop_loss_set.or(self.stop_loss_set),
            take_profit_set: overrides.take_profit_set.or(self.take_profit_set),
            risk_percent: overrides.risk_percent.or(self.risk_percent),
            risk_reward: overrides.risk_reward.or(self.risk_reward),
            trades_taken_today: overrides.trades_taken_today.or(self.trades_taken_today),
            current_session: overrides.current_session.or(self.current_session),
            trade_time: overrides.trade_time.or(self.trade_time),
            directional_bias_clear: overrides
                .directional_bias_clear
                .or(self.directional_bias_clear),
        }
    }
}
