//! Relative Strength Index (RSI).
//!
//! Simple-moving-average flavor: average gain and average loss are plain
//! rolling means of the one-bar deltas (gains = positive deltas, losses =
//! negated negative deltas). RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! avg_loss == 0 clamps to 100 instead of dividing by zero.
//! Lookback: period (deltas start at index 1).

use super::rolling_mean;

pub fn rsi(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    if period == 0 || n < period + 1 {
        return result;
    }

    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let delta = closes[i] - closes[i - 1];
        if delta.is_nan() {
            continue;
        }
        gains[i] = if delta > 0.0 { delta } else { 0.0 };
        losses[i] = if delta < 0.0 { -delta } else { 0.0 };
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    for i in period..n {
        let (g, l) = (avg_gain[i], avg_loss[i]);
        if g.is_nan() || l.is_nan() {
            continue;
        }
        result[i] = if l == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + g / l)
        };
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains_is_100() {
        let result = rsi(&[100.0, 101.0, 102.0, 103.0, 104.0], 3);
        assert_approx(result[3], 100.0, DEFAULT_EPSILON);
        assert_approx(result[4], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let result = rsi(&[104.0, 103.0, 102.0, 101.0, 100.0], 3);
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_known_mixed_value() {
        // Closes: 44.0, 44.34, 44.09, 43.61, 44.33
        // Deltas: +0.34, -0.25, -0.48, +0.72
        // At index 3 (period 3): gains mean = 0.34/3, losses mean = 0.73/3
        // RSI = 100 - 100/(1 + 0.34/0.73) ≈ 31.7757
        let result = rsi(&[44.0, 44.34, 44.09, 43.61, 44.33], 3);
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_warmup_is_nan() {
        let result = rsi(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!(result[2].is_nan());
        assert!(!result[3].is_nan());
    }

    #[test]
    fn rsi_always_in_bounds() {
        let closes = [100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0, 90.5];
        for v in rsi(&closes, 3) {
            if !v.is_nan() {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds: {v}");
            }
        }
    }

    #[test]
    fn rsi_flat_series_clamps_to_100() {
        // No movement at all: avg_loss == 0 → clamp, per the division-by-zero rule.
        let result = rsi(&[50.0; 6], 3);
        assert_approx(result[3], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_too_short_is_all_nan() {
        assert!(rsi(&[1.0, 2.0, 3.0], 3).iter().all(|v| v.is_nan()));
    }
}
