//! Persisted predictor — a fittable, loadable probability model.
//!
//! The classifier only needs `predict_probability(features) -> [0, 1]`;
//! everything else here (training, standardization, the JSON artifact) is
//! the offline step that produces such a predictor. Training is
//! deterministic: zero-initialized weights, full-batch gradient descent,
//! no shuffling.

use crate::engine::IndicatorRow;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Feature order fed to the predictor. Must match between training and
/// prediction; kept in one place for that reason.
pub const FEATURE_NAMES: [&str; 5] = ["ma_short", "rsi", "bar_return", "volatility", "volume_ratio"];

/// Extract the feature vector from one row, in `FEATURE_NAMES` order.
pub fn feature_vector(row: &IndicatorRow) -> [f64; 5] {
    [
        row.ma_short,
        row.rsi,
        row.bar_return,
        row.volatility,
        row.volume_ratio,
    ]
}

/// A fitted probability model over one feature vector.
pub trait Predictor: Send + Sync {
    /// Probability of an upward move on the next bar, in [0, 1].
    fn predict_probability(&self, features: &[f64]) -> f64;
}

/// Labeled training data: one sample per indicator row that has a successor.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub samples: Vec<[f64; 5]>,
    /// 1.0 when the next close is above the current close, else 0.0.
    pub labels: Vec<f64>,
}

/// Build the training set from indicator rows. The last row has no next
/// close and is dropped.
pub fn build_training_set(rows: &[IndicatorRow]) -> TrainingSet {
    let mut samples = Vec::new();
    let mut labels = Vec::new();
    for pair in rows.windows(2) {
        samples.push(feature_vector(&pair[0]));
        labels.push(if pair[1].bar.close > pair[0].bar.close {
            1.0
        } else {
            0.0
        });
    }
    TrainingSet { samples, labels }
}

/// Logistic regression over standardized features, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    weights: Vec<f64>,
    bias: f64,
    feature_means: Vec<f64>,
    feature_stds: Vec<f64>,
}

/// Fixed training schedule. Plenty for a five-feature model on one session
/// of bars.
const EPOCHS: usize = 300;
const LEARNING_RATE: f64 = 0.1;

impl LogisticModel {
    /// Fit on a training set. Fails on an empty set.
    pub fn fit(data: &TrainingSet) -> Result<Self, EngineError> {
        let n = data.samples.len();
        if n == 0 {
            return Err(EngineError::Model(
                "cannot fit on an empty training set".into(),
            ));
        }
        if data.labels.len() != n {
            return Err(EngineError::Model(format!(
                "label count {} does not match sample count {n}",
                data.labels.len()
            )));
        }

        let dim = data.samples[0].len();
        let (means, stds) = standardization_params(&data.samples, dim);
        let standardized: Vec<Vec<f64>> = data
            .samples
            .iter()
            .map(|s| standardize(s, &means, &stds))
            .collect();

        let mut weights = vec![0.0; dim];
        let mut bias = 0.0;

        for _ in 0..EPOCHS {
            let mut grad_w = vec![0.0; dim];
            let mut grad_b = 0.0;
            for (x, &y) in standardized.iter().zip(data.labels.iter()) {
                let z = dot(&weights, x) + bias;
                let err = sigmoid(z) - y;
                for (gw, xi) in grad_w.iter_mut().zip(x.iter()) {
                    *gw += err * xi;
                }
                grad_b += err;
            }
            let scale = LEARNING_RATE / n as f64;
            for (w, gw) in weights.iter_mut().zip(grad_w.iter()) {
                *w -= scale * gw;
            }
            bias -= scale * grad_b;
        }

        Ok(Self {
            weights,
            bias,
            feature_means: means,
            feature_stds: stds,
        })
    }

    /// Write the fitted artifact as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| EngineError::Model(format!("serialize model: {e}")))?;
        std::fs::write(path, json)
            .map_err(|e| EngineError::Model(format!("write {}: {e}", path.display())))?;
        Ok(())
    }

    /// Load a previously fitted artifact. Any failure (missing file, stale
    /// schema) maps to `ModelUnavailable` so the caller can decide between
    /// retraining and skipping the instrument.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let unavailable = || EngineError::ModelUnavailable {
            path: path.display().to_string(),
        };
        let json = std::fs::read_to_string(path).map_err(|_| unavailable())?;
        serde_json::from_str(&json).map_err(|_| unavailable())
    }
}

impl Predictor for LogisticModel {
    fn predict_probability(&self, features: &[f64]) -> f64 {
        let x = standardize(features, &self.feature_means, &self.feature_stds);
        sigmoid(dot(&self.weights, &x) + self.bias)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn standardization_params(samples: &[[f64; 5]], dim: usize) -> (Vec<f64>, Vec<f64>) {
    let n = samples.len() as f64;
    let mut means = vec![0.0; dim];
    for s in samples {
        for (m, v) in means.iter_mut().zip(s.iter()) {
            *m += v;
        }
    }
    for m in &mut means {
        *m /= n;
    }

    let mut stds = vec![0.0; dim];
    for s in samples {
        for ((sd, v), m) in stds.iter_mut().zip(s.iter()).zip(means.iter()) {
            *sd += (v - m) * (v - m);
        }
    }
    for sd in &mut stds {
        *sd = (*sd / n).sqrt();
        // Constant features carry no information; avoid dividing by zero.
        if *sd == 0.0 {
            *sd = 1.0;
        }
    }

    (means, stds)
}

fn standardize(features: &[f64], means: &[f64], stds: &[f64]) -> Vec<f64> {
    features
        .iter()
        .zip(means.iter())
        .zip(stds.iter())
        .map(|((v, m), s)| (v - m) / s)
        .collect()
}
