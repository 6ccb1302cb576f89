//! Structured error types for the engine.
//!
//! Every variant maps to a per-instrument outcome: the session loop catches
//! these at its boundary, reports them through the notification sink, and
//! moves on to the next instrument.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no data returned for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient data for {symbol}: {available} bars, indicator warm-up needs {required}")]
    InsufficientData {
        symbol: String,
        required: usize,
        available: usize,
    },

    #[error("no fitted model at '{path}' and training is disabled")]
    ModelUnavailable { path: String },

    #[error("malformed bar at {timestamp}: {reason}")]
    MalformedBar {
        timestamp: DateTime<Utc>,
        reason: String,
    },

    #[error("invalid position: {reason}")]
    InvalidPosition { reason: String },

    #[error("model error: {0}")]
    Model(String),
}
