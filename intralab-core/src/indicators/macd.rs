//! Moving Average Convergence Divergence (MACD).
//!
//! MACD line = EMA(close, fast) - EMA(close, slow).
//! Signal line = EMA(MACD, signal_span).
//! With first-value-seeded EMAs both lines are defined from index 0.

use super::ema;

#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_span: usize) -> MacdSeries {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();

    let signal = ema(&line, signal_span);

    MacdSeries { line, signal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn macd_defined_from_first_bar() {
        let m = macd(&[100.0, 101.0, 99.0, 102.0], 2, 3, 2);
        assert!(!m.line[0].is_nan());
        assert!(!m.signal[0].is_nan());
        // Both EMAs seed at close[0], so the first MACD value is zero.
        assert_approx(m.line[0], 0.0, DEFAULT_EPSILON);
        assert_approx(m.signal[0], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_positive_in_uptrend() {
        // Steady rise: the faster EMA tracks price more closely, so MACD > 0.
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let m = macd(&closes, 12, 26, 9);
        assert!(m.line[29] > 0.0);
        // And the MACD line leads its own signal EMA upward.
        assert!(m.line[29] > m.signal[29]);
    }

    #[test]
    fn macd_negative_in_downtrend() {
        let closes: Vec<f64> = (0..30).map(|i| 130.0 - i as f64).collect();
        let m = macd(&closes, 12, 26, 9);
        assert!(m.line[29] < 0.0);
        assert!(m.line[29] < m.signal[29]);
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let m = macd(&[50.0; 40], 12, 26, 9);
        assert_approx(m.line[39], 0.0, DEFAULT_EPSILON);
        assert_approx(m.signal[39], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_crosses_signal_on_reversal() {
        // Rise then fall: the histogram (line - signal) must change sign.
        let mut closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        closes.extend((0..20).map(|i| 119.0 - 2.0 * i as f64));
        let m = macd(&closes, 5, 10, 4);
        let histogram: Vec<f64> = m
            .line
            .iter()
            .zip(m.signal.iter())
            .map(|(l, s)| l - s)
            .collect();
        let saw_positive = histogram.iter().any(|h| *h > 0.0);
        let saw_negative = histogram.iter().any(|h| *h < 0.0);
        assert!(saw_positive && saw_negative);
    }
}
