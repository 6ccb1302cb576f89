//! Derived features for the model classifier.
//!
//! One-bar percent return, rolling volatility (handled by `rolling_std`
//! at the engine), and the volume ratio against its own rolling mean.

use super::rolling_mean;

/// One-bar percent change. NaN at index 0 and where the previous value is 0.
pub fn pct_change(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in 1..n {
        let prev = values[i - 1];
        if prev == 0.0 {
            continue;
        }
        result[i] = (values[i] - prev) / prev;
    }
    result
}

/// Current volume divided by its rolling mean over `window` bars.
/// NaN during warm-up and wherever the baseline mean is zero.
pub fn volume_ratio(volumes: &[u64], window: usize) -> Vec<f64> {
    let as_f64: Vec<f64> = volumes.iter().map(|v| *v as f64).collect();
    let baseline = rolling_mean(&as_f64, window);
    as_f64
        .iter()
        .zip(baseline.iter())
        .map(|(v, b)| if *b > 0.0 { v / b } else { f64::NAN })
        .collect()
}
