//! Time-of-day windows.
//!
//! Times are `H:MM` or `HH:MM` strings compared as minutes since midnight.
//! Anything that does not match that shape, or names an hour above 23 or a
//! minute above 59, is treated as unparseable rather than as an error.

use serde::{Deserialize, Serialize};
use std::fmt;

const MINUTES_PER_HOUR: u32 = 60;

/// Parse a strict `H:MM` / `HH:MM` time into minutes since midnight.
pub fn parse_minutes(input: &str) -> Option<u32> {
    let (hours, minutes) = input.trim().split_once(':')?;

    let hours_ok = (1..=2).contains(&hours.len()) && hours.bytes().all(|b| b.is_ascii_digit());
    let minutes_ok = minutes.len() == 2 && minutes.bytes().all(|b| b.is_ascii_digit());
    if !hours_ok || !minutes_ok {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes >= MINUTES_PER_HOUR {
        return None;
    }
    Some(hours * MINUTES_PER_HOUR + minutes)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse the compact `"HH:MM-HH:MM"` form. Only the split is checked here;
    /// the two sides are kept verbatim.
    pub fn parse(input: &str) -> Option<Self> {
        let (start, end) = input.split_once('-')?;
        Some(Self::new(start.trim(), end.trim()))
    }

    /// A window with either side blank places no constraint.
    pub fn is_empty(&self) -> bool {
        self.start.trim().is_empty() || self.end.trim().is_empty()
    }

    /// Both bounds as minutes since midnight, if both parse.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        Some((parse_minutes(&self.start)?, parse_minutes(&self.end)?))
    }

    /// Whether `time` falls inside the closed interval `[start, end]`.
    ///
    /// There is no wrap past midnight: a start after the end admits nothing.
    /// Returns `None` when the window or the time cannot be parsed.
    pub fn contains(&self, time: &str) -> Option<bool> {
        let (start, end) = self.bounds()?;
        let t = parse_minutes(time)?;
        Some(start <= t && t <= end)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
