//! Position — the single open lot, with construction-enforced invariants.

use crate::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open long position. At most one exists at a time; the simulator owns
/// it exclusively and clears it on any exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    entry_price: f64,
    quantity: u32,
    entry_time: DateTime<Utc>,
    stop_loss: f64,
    take_profit: f64,
}

impl Position {
    /// Open a long position. Rejects stop_loss >= entry, take_profit <=
    /// entry, non-positive entry, or zero quantity.
    pub fn open(
        entry_price: f64,
        quantity: u32,
        entry_time: DateTime<Utc>,
        stop_loss: f64,
        take_profit: f64,
    ) -> Result<Self, EngineError> {
        if !entry_price.is_finite() || entry_price <= 0.0 {
            return Err(EngineError::InvalidPosition {
                reason: format!("entry price {entry_price} must be positive"),
            });
        }
        if quantity == 0 {
            return Err(EngineError::InvalidPosition {
                reason: "quantity must be at least 1".into(),
            });
        }
        if !(stop_loss < entry_price) {
            return Err(EngineError::InvalidPosition {
                reason: format!("stop-loss {stop_loss} must be below entry {entry_price}"),
            });
        }
        if !(take_profit > entry_price) {
            return Err(EngineError::InvalidPosition {
                reason: format!("take-profit {take_profit} must be above entry {entry_price}"),
            });
        }
        Ok(Self {
            entry_price,
            quantity,
            entry_time,
            stop_loss,
            take_profit,
        })
    }

    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn entry_time(&self) -> DateTime<Utc> {
        self.entry_time
    }

    pub fn stop_loss(&self) -> f64 {
        self.stop_loss
    }

    pub fn take_profit(&self) -> f64 {
        self.take_profit
    }

    /// Mark-to-market value at the given price.
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity as f64 * price
    }

    /// Realized profit if exited at the given price.
    pub fn realized_profit(&self, exit_price: f64) -> f64 {
        (exit_price - self.entry_price) * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap()
    }

    #[test]
    fn open_valid_position() {
        let pos = Position::open(100.0, 2, ts(), 96.0, 106.0).unwrap();
        assert_eq!(pos.quantity(), 2);
        assert_eq!(pos.market_value(103.0), 206.0);
        assert_eq!(pos.realized_profit(103.0), 6.0);
    }

    #[test]
    fn rejects_stop_at_or_above_entry() {
        assert!(Position::open(100.0, 1, ts(), 100.0, 106.0).is_err());
        assert!(Position::open(100.0, 1, ts(), 101.0, 106.0).is_err());
    }

    #[test]
    fn rejects_take_at_or_below_entry() {
        assert!(Position::open(100.0, 1, ts(), 96.0, 100.0).is_err());
        assert!(Position::open(100.0, 1, ts(), 96.0, 99.0).is_err());
    }

    #[test]
    fn rejects_zero_quantity() {
        assert!(Position::open(100.0, 0, ts(), 96.0, 106.0).is_err());
    }

    #[test]
    fn rejects_nonpositive_entry() {
        assert!(Position::open(0.0, 1, ts(), -1.0, 1.0).is_err());
        assert!(Position::open(f64::NAN, 1, ts(), 96.0, 106.0).is_err());
    }

    #[test]
    fn loss_is_negative() {
        let pos = Position::open(100.0, 3, ts(), 96.0, 106.0).unwrap();
        assert_eq!(pos.realized_profit(96.0), -12.0);
    }
}
