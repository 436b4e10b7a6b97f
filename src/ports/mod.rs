//! Port traits the domain depends on.

pub mod config_port;
pub mod journal_port;
pub mod report_port;
