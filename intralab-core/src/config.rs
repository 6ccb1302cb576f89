//! Engine parameter sets.
//!
//! Every window size and threshold the pipeline uses lives here as an
//! explicit value with a default, so a single process can run different
//! instruments with different parameters and tests can build configurations
//! in isolation.

use serde::{Deserialize, Serialize};

/// Window sizes for the indicator engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    /// Short moving average window (the original's MA20).
    pub ma_short: usize,
    /// Long moving average window used by the trend vote.
    pub ma_long: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    /// Bollinger band half-width in standard deviations.
    pub bollinger_k: f64,
    pub atr_period: usize,
    /// Window for rolling volatility and the volume-ratio baseline.
    pub feature_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_short: 20,
            ma_long: 50,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_k: 2.0,
            atr_period: 14,
            feature_window: 20,
        }
    }
}

impl IndicatorParams {
    /// Bars needed before a single complete row can be produced.
    ///
    /// RSI and ATR consume one extra bar for the first delta / true range.
    pub fn min_bars(&self) -> usize {
        self.ma_short
            .max(self.ma_long)
            .max(self.rsi_period + 1)
            .max(self.atr_period + 1)
            .max(self.bollinger_period)
            .max(self.feature_window)
            .max(2) // one-bar return needs a previous close
    }
}

/// Risk parameters for position entry and exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParams {
    /// Capital available to one session, used as the ROI denominator.
    pub starting_capital: f64,
    /// Per-trade budget; quantity = floor(budget / close).
    pub position_budget: f64,
    /// Stop-loss distance in ATR multiples below entry.
    pub atr_stop_mult: f64,
    /// Take-profit distance in ATR multiples above entry.
    pub atr_take_mult: f64,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            starting_capital: 1000.0,
            position_budget: 200.0,
            atr_stop_mult: 2.0,
            atr_take_mult: 3.0,
        }
    }
}

/// Which classifier drives the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierVariant {
    /// Close vs short MA only.
    MaOnly,
    /// Four-vote multi-indicator rule.
    Rules,
    /// Probability from a fitted predictor.
    Model,
}

/// Classifier selection and thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    pub variant: ClassifierVariant,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Model variant: BUY when probability exceeds this (and close > short MA).
    pub buy_probability: f64,
    /// Model variant: SELL when probability falls below this.
    pub sell_probability: f64,
    /// Path of the persisted predictor artifact.
    pub model_path: String,
    /// Train synchronously when the artifact is missing; otherwise skip the
    /// instrument with a ModelUnavailable report.
    pub train_if_missing: bool,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            variant: ClassifierVariant::Rules,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            buy_probability: 0.7,
            sell_probability: 0.3,
            model_path: "model.json".into(),
            train_if_missing: true,
        }
    }
}
