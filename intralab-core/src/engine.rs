//! Indicator engine — turns a PriceSeries into complete IndicatorRows.
//!
//! All columns are computed over the full series in timestamp order, then
//! zipped per bar. A row survives only if every column is finite, so the
//! warm-up prefix (and anything poisoned by a degenerate window) is dropped
//! here and never reaches the classifier or the simulator.

use crate::config::IndicatorParams;
use crate::domain::{Bar, PriceSeries};
use crate::error::EngineError;
use crate::indicators;
use serde::{Deserialize, Serialize};

/// A bar together with every indicator column the pipeline derives from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub bar: Bar,
    pub ma_short: f64,
    pub ma_long: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub boll_upper: f64,
    pub boll_middle: f64,
    pub boll_lower: f64,
    pub atr: f64,
    pub bar_return: f64,
    pub volatility: f64,
    pub volume_ratio: f64,
}

impl IndicatorRow {
    fn is_complete(&self) -> bool {
        [
            self.ma_short,
            self.ma_long,
            self.rsi,
            self.macd,
            self.macd_signal,
            self.boll_upper,
            self.boll_middle,
            self.boll_lower,
            self.atr,
            self.bar_return,
            self.volatility,
            self.volume_ratio,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Computes indicator rows for one series. Stateless apart from its params;
/// safe to reuse across instruments.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    params: IndicatorParams,
}

impl IndicatorEngine {
    pub fn new(params: IndicatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Compute every column and return only the complete rows.
    ///
    /// Fails with `InsufficientData` when warm-up removal leaves nothing —
    /// the caller aborts that instrument's cycle, not the process.
    pub fn compute(&self, series: &PriceSeries) -> Result<Vec<IndicatorRow>, EngineError> {
        let bars = series.bars();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<u64> = bars.iter().map(|b| b.volume).collect();
        let p = &self.params;

        let ma_short = indicators::sma(&closes, p.ma_short);
        let ma_long = indicators::sma(&closes, p.ma_long);
        let rsi = indicators::rsi(&closes, p.rsi_period);
        let macd = indicators::macd(&closes, p.macd_fast, p.macd_slow, p.macd_signal);
        let boll = indicators::bollinger(&closes, p.bollinger_period, p.bollinger_k);
        let atr = indicators::atr(bars, p.atr_period);
        let bar_return = indicators::pct_change(&closes);
        let volatility = crate::indicators::rolling_std(&closes, p.feature_window);
        let volume_ratio = indicators::volume_ratio(&volumes, p.feature_window);

        let rows: Vec<IndicatorRow> = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorRow {
                bar: bar.clone(),
                ma_short: ma_short[i],
                ma_long: ma_long[i],
                rsi: rsi[i],
                macd: macd.line[i],
                macd_signal: macd.signal[i],
                boll_upper: boll.upper[i],
                boll_middle: boll.middle[i],
                boll_lower: boll.lower[i],
                atr: atr[i],
                bar_return: bar_return[i],
                volatility: volatility[i],
                volume_ratio: volume_ratio[i],
            })
            .filter(IndicatorRow::is_complete)
            .collect();

        if rows.is_empty() {
            return Err(EngineError::InsufficientData {
                symbol: series.symbol().to_string(),
                required: p.min_bars(),
                available: bars.len(),
            });
        }

        Ok(rows)
    }
}
