//! Bar — the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol over one sampling interval.
///
/// Timestamps are timezone-aware UTC instants; intraday intervals (15m and
/// friends) make calendar dates useless on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// OHLC sanity check: finite, non-negative, high is the ceiling and low
    /// the floor of the bar.
    pub fn is_sane(&self) -> bool {
        let fields = [self.open, self.high, self.low, self.close];
        if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
    }

    /// Why the bar fails `is_sane`, for warning messages. None if sane.
    pub fn sanity_violation(&self) -> Option<&'static str> {
        let fields = [self.open, self.high, self.low, self.close];
        if fields.iter().any(|v| !v.is_finite()) {
            return Some("non-finite OHLC field");
        }
        if fields.iter().any(|v| *v < 0.0) {
            return Some("negative OHLC field");
        }
        if self.high < self.low {
            return Some("high < low");
        }
        if self.high < self.open || self.high < self.close {
            return Some("high below open/close");
        }
        if self.low > self.open || self.low > self.close {
            return Some("low above open/close");
        }
        None
    }
}
