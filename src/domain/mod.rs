//! Core domain types and logic.

pub mod compliance;
pub mod compliance_report;
pub mod config_validation;
pub mod engine_config;
pub mod error;
pub mod rule_type;
pub mod rule_validation;
pub mod strategy;
pub mod time_window;
pub mod trade;
