//! JSON journal adapter implementing JournalPort.
//!
//! Reads a whole journal export from one JSON document:
//!
//! ```json
//! {
//!   "strategies": [{ "id": "s-1", "name": "...", "rules": [...] }],
//!   "trades": [{ "id": "t-1", "strategyId": "s-1", ... }],
//!   "inputs": { "t-1": { "currentSession": "london" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::error::JournalError;
use crate::domain::strategy::Strategy;
use crate::domain::trade::{Trade, TradeInputs};
use crate::ports::journal_port::JournalPort;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JournalDocument {
    strategies: Vec<Strategy>,
    trades: Vec<Trade>,
    inputs: BTreeMap<String, TradeInputs>,
}

#[derive(Debug)]
pub struct JsonJournalAdapter {
    document: JournalDocument,
}

impl JsonJournalAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, JournalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| JournalError::Journal {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        let adapter = Self::from_json(&content).map_err(|e| JournalError::Journal {
            reason: format!("{}: {}", path.display(), journal_reason(e)),
        })?;
        info!(
            path = %path.display(),
            strategies = adapter.document.strategies.len(),
            trades = adapter.document.trades.len(),
            "loaded journal"
        );
        Ok(adapter)
    }

    pub fn from_json(content: &str) -> Result<Self, JournalError> {
        let document: JournalDocument =
            serde_json::from_str(content).map_err(|e| JournalError::Journal {
                reason: format!("invalid journal JSON: {e}"),
            })?;
        Ok(Self { document })
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.document.strategies
    }
}

fn journal_reason(err: JournalError) -> String {
    match err {
        JournalError::Journal { reason } => reason,
        other => other.to_string(),
    }
}

impl JournalPort for JsonJournalAdapter {
    fn fetch_trade(&self, trade_id: &str) -> Result<Trade, JournalError> {
        self.document
            .trades
            .iter()
            .find(|t| t.id == trade_id)
            .cloned()
            .ok_or_else(|| JournalError::NotFound {
                kind: "trade",
                id: trade_id.to_string(),
            })
    }

    fn fetch_strategy(&self, strategy_id: &str) -> Result<Strategy, JournalError> {
        self.document
            .strategies
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
            .document
            .trades
            .iter()
            .filter(|t| t.strategy_id.as_deref() == Some(strategy_id))
            .cloned()
            .collect())
    }

    fn fetch_inputs(&self, trade_id: &str) -> Result<Option<TradeInputs>, JournalError> {
        Ok(self.document.inputs.get(trade_id).cloned())
    }
}
