//! Signal classification — one indicator row in, one decision out.
//!
//! Three interchangeable variants behind one trait, selected by
//! configuration instead of duplicated pipeline control flow.

pub mod model;
pub mod rules;

use crate::engine::IndicatorRow;
use serde::{Deserialize, Serialize};

pub use model::ModelClassifier;
pub use rules::{MaOnlyClassifier, RuleClassifier};

/// A per-bar trading decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Maps one indicator row to a decision.
///
/// `position_open` lets a variant gate entries and exits on the current
/// simulator state without seeing any other portfolio detail.
pub trait SignalClassifier: Send + Sync {
    /// Human-readable name, used in reports.
    fn name(&self) -> &str;

    fn decide(&self, row: &IndicatorRow, position_open: bool) -> Signal;
}
