//! Bollinger Bands.
//!
//! Middle: SMA(close, period). Upper/lower: middle ± k * rolling sample
//! standard deviation (ddof = 1) of the same window.
//! Lookback: period - 1.

use super::{rolling_mean, rolling_std};

#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn bollinger(closes: &[f64], period: usize, k: f64) -> BollingerSeries {
    let middle = rolling_mean(closes, period);
    let std = rolling_std(closes, period);

    let upper: Vec<f64> = middle
        .iter()
        .zip(std.iter())
        .map(|(m, s)| m + k * s)
        .collect();
    let lower: Vec<f64> = middle
        .iter()
        .zip(std.iter())
        .map(|(m, s)| m - k * s)
        .collect();

    BollingerSeries {
        upper,
        middle,
        lower,
    }
}
