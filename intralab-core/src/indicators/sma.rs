//! Simple Moving Average (SMA).
//!
//! Arithmetic mean of the last `window` values. Lookback: window - 1.

use super::rolling_mean;

pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    rolling_mean(values, window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_known_values() {
        let result = sma(&[10.0, 11.0, 12.0, 13.0, 14.0], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_window_one_is_identity() {
        let input = [3.0, 1.0, 4.0];
        let result = sma(&input, 1);
        for (a, b) in result.iter().zip(input.iter()) {
            assert_approx(*a, *b, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn sma_short_input_all_nan() {
        assert!(sma(&[1.0, 2.0], 20).iter().all(|v| v.is_nan()));
    }
}
