//! Model-based classifier — probability gate over a fitted predictor.

use super::{Signal, SignalClassifier};
use crate::engine::IndicatorRow;
use crate::model::{feature_vector, Predictor};

/// Wraps a fitted predictor. BUY when the upward-move probability clears
/// the buy gate and price confirms above the short MA; SELL when it drops
/// below the sell gate; HOLD in the dead zone between.
pub struct ModelClassifier {
    predictor: Box<dyn Predictor>,
    buy_probability: f64,
    sell_probability: f64,
}

impl ModelClassifier {
    pub fn new(predictor: Box<dyn Predictor>, buy_probability: f64, sell_probability: f64) -> Self {
        assert!(
            sell_probability < buy_probability,
            "sell gate must be below buy gate"
        );
        Self {
            predictor,
            buy_probability,
            sell_probability,
        }
    }
}

impl SignalClassifier for ModelClassifier {
    fn name(&self) -> &str {
        "model"
    }

    fn decide(&self, row: &IndicatorRow, _position_open: bool) -> Signal {
        let p = self.predictor.predict_probability(&feature_vector(row));
        if p > self.buy_probability && row.bar.close > row.ma_short {
            Signal::Buy
        } else if p < self.sell_probability {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}
