//! TradeEvent — one entry or exit in the append-only trade log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of transition produced the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    Buy,
    SellSignal,
    StopLoss,
    TakeProfit,
}

impl TradeKind {
    pub fn is_exit(&self) -> bool {
        !matches!(self, TradeKind::Buy)
    }

    /// Label used in reports and chart markers.
    pub fn label(&self) -> &'static str {
        match self {
            TradeKind::Buy => "BUY",
            TradeKind::SellSignal => "SELL",
            TradeKind::StopLoss => "STOP-LOSS",
            TradeKind::TakeProfit => "TAKE-PROFIT",
        }
    }
}

/// One simulated fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub kind: TradeKind,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub quantity: u32,
    /// Realized profit; present only for exits.
    pub profit: Option<f64>,
}

impl TradeEvent {
    pub fn entry(timestamp: DateTime<Utc>, price: f64, quantity: u32) -> Self {
        Self {
            kind: TradeKind::Buy,
            timestamp,
            price,
            quantity,
            profit: None,
        }
    }

    pub fn exit(
        kind: TradeKind,
        timestamp: DateTime<Utc>,
        price: f64,
        quantity: u32,
        profit: f64,
    ) -> Self {
        debug_assert!(kind.is_exit(), "entry kind used for an exit event");
        Self {
            kind,
            timestamp,
            price,
            quantity,
            profit: Some(profit),
        }
    }
}
