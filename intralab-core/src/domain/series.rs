//! PriceSeries — an ordered, sanitized bar sequence for one instrument.

use super::bar::Bar;
use serde::{Deserialize, Serialize};

/// Ordered sequence of bars for one symbol.
///
/// Invariant: timestamps strictly increase; no duplicates. The series may
/// be empty — an empty series is the "no data available" terminal case,
/// not an error at this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<Bar>,
}

/// What sanitization dropped, for reporting. One bad tick must not discard
/// a whole session, so offending bars are excluded instead of aborting.
#[derive(Debug, Clone, Default)]
pub struct SanitizeReport {
    pub dropped: Vec<String>,
}

impl SanitizeReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

impl PriceSeries {
    /// Build a series from raw bars, dropping malformed bars and bars that
    /// break the strictly-increasing timestamp invariant.
    pub fn sanitize(symbol: impl Into<String>, raw: Vec<Bar>) -> (Self, SanitizeReport) {
        let symbol = symbol.into();
        let mut bars: Vec<Bar> = Vec::with_capacity(raw.len());
        let mut report = SanitizeReport::default();

        for bar in raw {
            if let Some(reason) = bar.sanity_violation() {
                report
                    .dropped
                    .push(format!("{}: dropped bar at {} ({reason})", symbol, bar.timestamp));
                continue;
            }
            if let Some(last) = bars.last() {
                if bar.timestamp <= last.timestamp {
                    report.dropped.push(format!(
                        "{}: dropped bar at {} (timestamp not strictly increasing)",
                        symbol, bar.timestamp
                    ));
                    continue;
                }
            }
            bars.push(bar);
        }

        (Self { symbol, bars }, report)
    }

    /// Build a series from bars already known to satisfy the invariants.
    ///
    /// Panics in debug builds if the ordering invariant is violated; used by
    /// tests and the synthetic provider.
    pub fn from_ordered(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        debug_assert!(
            bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp),
            "bars must be strictly increasing"
        );
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bar_at(minutes: i64, close: f64) -> Bar {
        let base = Utc.with_ymd_and_hms(2024, 6, 3, 13, 30, 0).unwrap();
        Bar {
            timestamp: base + Duration::minutes(minutes),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn sanitize_keeps_clean_series() {
        let raw = vec![bar_at(0, 100.0), bar_at(15, 101.0), bar_at(30, 102.0)];
        let (series, report) = PriceSeries::sanitize("SHOP.TO", raw);
        assert_eq!(series.len(), 3);
        assert!(report.is_clean());
    }

    #[test]
    fn sanitize_drops_malformed_bar_only() {
        let mut bad = bar_at(15, 101.0);
        bad.high = 90.0; // below low
        let raw = vec![bar_at(0, 100.0), bad, bar_at(30, 102.0)];
        let (series, report) = PriceSeries::sanitize("SHOP.TO", raw);
        assert_eq!(series.len(), 2);
        assert_eq!(report.dropped.len(), 1);
        assert!(report.dropped[0].contains("high < low"));
    }

    #[test]
    fn sanitize_drops_duplicate_timestamp() {
        let raw = vec![bar_at(0, 100.0), bar_at(0, 100.5), bar_at(15, 101.0)];
        let (series, report) = PriceSeries::sanitize("HUT.TO", raw);
        assert_eq!(series.len(), 2);
        assert_eq!(report.dropped.len(), 1);
        assert!(report.dropped[0].contains("strictly increasing"));
    }

    #[test]
    fn sanitize_drops_out_of_order_bar() {
        let raw = vec![bar_at(15, 100.0), bar_at(0, 99.0), bar_at(30, 101.0)];
        let (series, _) = PriceSeries::sanitize("HUT.TO", raw);
        assert_eq!(series.len(), 2);
        assert!(series.bars()[0].timestamp < series.bars()[1].timestamp);
    }

    #[test]
    fn empty_series_is_valid() {
        let (series, report) = PriceSeries::sanitize("DEFI.NE", vec![]);
        assert!(series.is_empty());
        assert!(report.is_clean());
        assert!(series.last().is_none());
    }
}
