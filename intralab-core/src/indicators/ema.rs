//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * value[t] + (1 - alpha) * EMA[t-1] with
//! alpha = 2 / (span + 1). Seed: the first available (non-NaN) value, no
//! bias adjustment — so the series is defined from its first element on.

pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if span == 0 || n == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    // Seed at the first non-NaN input (MACD feeds this a NaN-prefixed series).
    let Some(start) = values.iter().position(|v| !v.is_nan()) else {
        return result;
    };

    let mut prev = values[start];
    result[start] = prev;
    for i in (start + 1)..n {
        if values[i].is_nan() {
            // Once tainted, everything after is tainted too.
            return result;
        }
        let smoothed = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = smoothed;
        prev = smoothed;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn ema_seeded_by_first_value() {
        // span 3 → alpha = 0.5
        // EMA[0] = 10, EMA[1] = 0.5*12 + 0.5*10 = 11, EMA[2] = 0.5*14 + 0.5*11 = 12.5
        let result = ema(&[10.0, 12.0, 14.0], 3);
        assert_approx(result[0], 10.0, DEFAULT_EPSILON);
        assert_approx(result[1], 11.0, DEFAULT_EPSILON);
        assert_approx(result[2], 12.5, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_span_one_is_identity() {
        let result = ema(&[5.0, 7.0, 9.0], 1);
        assert_approx(result[0], 5.0, DEFAULT_EPSILON);
        assert_approx(result[1], 7.0, DEFAULT_EPSILON);
        assert_approx(result[2], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_seed_skips_nan_prefix() {
        let result = ema(&[f64::NAN, f64::NAN, 10.0, 12.0], 3);
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 10.0, DEFAULT_EPSILON);
        assert_approx(result[3], 11.0, DEFAULT_EPSILON);
    }

    #[test]
    fn ema_constant_input_is_constant() {
        let result = ema(&[8.0; 10], 4);
        for v in result {
            assert_approx(v, 8.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn ema_all_nan_stays_nan() {
        assert!(ema(&[f64::NAN; 3], 3).iter().all(|v| v.is_nan()));
    }
}
