//! SessionSummary — the end-of-series accounting snapshot.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// Session accounting at series end.
///
/// An open position is marked at the last available close, whether or not
/// that equals any exit price. `trade_count` counts emitted events, entries
/// and exits alike, matching the trade-log length the reports show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub starting_capital: f64,
    pub realized_profit: f64,
    pub open_value: f64,
    pub roi: f64,
    pub trade_count: usize,
}

impl SessionSummary {
    pub fn compute(
        starting_capital: f64,
        realized_profit: f64,
        position: Option<&Position>,
        last_close: f64,
        trade_count: usize,
    ) -> Self {
        let open_value = position.map_or(0.0, |p| p.market_value(last_close));
        let roi = (realized_profit + open_value) / starting_capital;
        Self {
            starting_capital,
            realized_profit,
            open_value,
            roi,
            trade_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn flat_session_roi_is_realized_over_capital() {
        let s = SessionSummary::compute(1000.0, 50.0, None, 123.0, 4);
        assert_eq!(s.open_value, 0.0);
        assert!((s.roi - 0.05).abs() < 1e-12);
        assert_eq!(s.trade_count, 4);
    }

    #[test]
    fn open_position_marked_at_last_close() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap();
        let pos = Position::open(100.0, 2, ts, 96.0, 106.0).unwrap();
        let s = SessionSummary::compute(1000.0, 0.0, Some(&pos), 104.0, 1);
        assert_eq!(s.open_value, 208.0);
        assert!((s.roi - 0.208).abs() < 1e-12);
    }

    #[test]
    fn losses_produce_negative_roi() {
        let s = SessionSummary::compute(1000.0, -30.0, None, 90.0, 2);
        assert!(s.roi < 0.0);
    }
}
