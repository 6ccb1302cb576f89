//! Report formatting — trade alerts and session summaries as markdown text.

use intralab_core::domain::{SessionSummary, TradeEvent, TradeKind};
use intralab_core::engine::IndicatorRow;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One trade alert, in the shape the notification channel expects.
pub fn trade_message(symbol: &str, event: &TradeEvent) -> String {
    let mut msg = format!(
        "*{}* {}\nTime: {}\nPrice: ${:.2}\nQty: {}",
        event.kind.label(),
        symbol,
        event.timestamp.format(TIME_FORMAT),
        event.price,
        event.quantity,
    );
    if let Some(profit) = event.profit {
        msg.push_str(&format!("\nProfit: ${profit:.2}"));
    }
    msg
}

/// End-of-session summary for one instrument.
pub fn summary_message(symbol: &str, summary: &SessionSummary, last_row: &IndicatorRow) -> String {
    format!(
        "*{} Session Summary*\nTime: {}\nPrice: ${:.2} | MA: ${:.2}\nOpen Position: ${:.2}\nRealized: ${:.2}\nROI: {:.2}%\nTrades: {}",
        symbol,
        last_row.bar.timestamp.format(TIME_FORMAT),
        last_row.bar.close,
        last_row.ma_short,
        summary.open_value,
        summary.realized_profit,
        summary.roi * 100.0,
        summary.trade_count,
    )
}

pub fn no_data_message(symbol: &str) -> String {
    format!("Warning: no data for {symbol}")
}

/// Human-readable report for any per-instrument failure.
pub fn error_message(symbol: &str, error: &dyn std::fmt::Display) -> String {
    format!("Error processing {symbol}: {error}")
}

/// Marker kind column value in chart exports.
pub fn marker_label(kind: TradeKind) -> &'static str {
    match kind {
        TradeKind::Buy => "buy",
        TradeKind::SellSignal => "sell",
        TradeKind::StopLoss => "stop_loss",
        TradeKind::TakeProfit => "take_profit",
    }
}
