//! Journal storage port trait.
//!
//! Storage owns trades, strategies and any situational inputs captured when a
//! trade was logged. The engine only ever reads through this port.

use crate::domain::error::JournalError;
use crate::domain::strategy::Strategy;
use crate::domain::trade::{Trade, TradeInputs};

pub trait JournalPort {
    fn fetch_trade(&self, trade_id: &str) -> Result<Trade, JournalError>;

    fn fetch_strategy(&self, strategy_id: &str) -> Result<Strategy, JournalError>;

    /// Trades linked to a strategy, in journal order.
    fn list_trades(&self, strategy_id: &str) -> Result<Vec<Trade>, JournalError>;

    /// Inputs recorded alongside a trade, if any were captured.
    fn fetch_inputs(&self, trade_id: &str) -> Result<Option<TradeInputs>, JournalError>;
}
