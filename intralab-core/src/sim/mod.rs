//! Trade simulator — the position/P&L state machine.
//!
//! States: Flat and Long, nothing else. One transition per bar at most.
//! Exit checks run in a fixed priority order — stop-loss, then take-profit,
//! then classifier SELL. The ordering is a documented tie-break: a bar
//! whose range breaches both levels exits at the stop, and reordering this
//! changes realized P&L.

use crate::config::RiskParams;
use crate::domain::{Position, SessionSummary, TradeEvent, TradeKind};
use crate::engine::IndicatorRow;
use crate::error::EngineError;
use crate::signal::{Signal, SignalClassifier};
use serde::{Deserialize, Serialize};

/// Everything one simulated session produces. The simulator exclusively
/// owns the event log and the position while it runs; the result hands
/// them over by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResult {
    pub events: Vec<TradeEvent>,
    pub summary: SessionSummary,
    /// Still-open position at series end, if any. No forced liquidation.
    pub open_position: Option<Position>,
}

/// Bar-by-bar simulator over an indicator row sequence.
#[derive(Debug, Clone, Default)]
pub struct TradeSimulator {
    risk: RiskParams,
}

impl TradeSimulator {
    pub fn new(risk: RiskParams) -> Self {
        Self { risk }
    }

    /// Full-fidelity run: entry sizing, stop-loss, take-profit, signal exits.
    pub fn run(
        &self,
        rows: &[IndicatorRow],
        classifier: &dyn SignalClassifier,
    ) -> Result<SessionResult, EngineError> {
        let mut position: Option<Position> = None;
        let mut events: Vec<TradeEvent> = Vec::new();
        let mut realized = 0.0;

        for row in rows {
            match position.take() {
                None => {
                    if classifier.decide(row, false) == Signal::Buy {
                        if let Some((pos, event)) = self.try_open(row)? {
                            position = Some(pos);
                            events.push(event);
                        }
                    }
                }
                Some(pos) => {
                    // Risk exits precede signal exits; stop-loss precedes
                    // take-profit. First match wins, one exit per bar.
                    if row.bar.low <= pos.stop_loss() {
                        let price = pos.stop_loss();
                        realized += self.close(&mut events, pos, row, TradeKind::StopLoss, price);
                    } else if row.bar.high >= pos.take_profit() {
                        let price = pos.take_profit();
                        realized += self.close(&mut events, pos, row, TradeKind::TakeProfit, price);
                    } else if classifier.decide(row, true) == Signal::Sell {
                        let price = row.bar.close;
                        realized += self.close(&mut events, pos, row, TradeKind::SellSignal, price);
                    } else {
                        position = Some(pos);
                    }
                }
            }
        }

        Ok(self.finish(rows, events, realized, position))
    }

    /// Latest-bar mode: evaluate only the final row, entry rule plus the
    /// close-price SELL rule, no stop/take tracking. Reduced fidelity for
    /// alert-style runs, not a separate engine.
    pub fn run_latest(
        &self,
        rows: &[IndicatorRow],
        classifier: &dyn SignalClassifier,
    ) -> Result<SessionResult, EngineError> {
        let mut position: Option<Position> = None;
        let mut events: Vec<TradeEvent> = Vec::new();
        let mut realized = 0.0;

        if let Some(row) = rows.last() {
            if classifier.decide(row, false) == Signal::Buy {
                if let Some((pos, event)) = self.try_open(row)? {
                    position = Some(pos);
                    events.push(event);
                }
            }
            if let Some(pos) = position.take() {
                if classifier.decide(row, true) == Signal::Sell {
                    let price = row.bar.close;
                    realized += self.close(&mut events, pos, row, TradeKind::SellSignal, price);
                } else {
                    position = Some(pos);
                }
            }
        }

        Ok(self.finish(rows, events, realized, position))
    }

    /// Rule 1: size by budget, open at the close, bracket with ATR multiples.
    /// A budget too small for one share stays flat with no event.
    fn try_open(&self, row: &IndicatorRow) -> Result<Option<(Position, TradeEvent)>, EngineError> {
        let close = row.bar.close;
        let quantity = (self.risk.position_budget / close).floor();
        if quantity < 1.0 {
            return Ok(None);
        }
        let quantity = quantity as u32;

        let stop_loss = close - self.risk.atr_stop_mult * row.atr;
        let take_profit = close + self.risk.atr_take_mult * row.atr;
        let position = Position::open(close, quantity, row.bar.timestamp, stop_loss, take_profit)?;
        let event = TradeEvent::entry(row.bar.timestamp, close, quantity);
        Ok(Some((position, event)))
    }

    fn close(
        &self,
        events: &mut Vec<TradeEvent>,
        position: Position,
        row: &IndicatorRow,
        kind: TradeKind,
        price: f64,
    ) -> f64 {
        let profit = position.realized_profit(price);
        events.push(TradeEvent::exit(
            kind,
            row.bar.timestamp,
            price,
            position.quantity(),
            profit,
        ));
        profit
    }

    fn finish(
        &self,
        rows: &[IndicatorRow],
        events: Vec<TradeEvent>,
        realized: f64,
        position: Option<Position>,
    ) -> SessionResult {
        let last_close = rows.last().map_or(0.0, |r| r.bar.close);
        let summary = SessionSummary::compute(
            self.risk.starting_capital,
            realized,
            position.as_ref(),
            last_close,
            events.len(),
        );
        SessionResult {
            events,
            summary,
            open_position: position,
        }
    }
}
