//! Session configuration — one TOML file describes a whole run.
//!
//! Every module-level constant the original scripts hard-coded is an
//! explicit field here with the same default, so one process can run
//! different instruments with different parameters and the configuration
//! is testable in isolation.

use intralab_core::config::{ClassifierParams, IndicatorParams, RiskParams};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Instrument list, bar geometry, and capital for one session run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub symbols: Vec<String>,
    /// Bar interval, passed through to the data provider (e.g. "15m").
    pub interval: String,
    /// Lookback period, passed through to the data provider (e.g. "1d").
    pub lookback: String,
    /// Evaluate only the most recent bar instead of the full series.
    pub latest_only: bool,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            symbols: vec![],
            interval: "15m".into(),
            lookback: "1d".into(),
            latest_only: false,
        }
    }
}

/// Where reports and chart artifacts go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Notification channel identifier (Telegram chat id).
    pub channel: String,
    pub chart_dir: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            channel: String::new(),
            chart_dir: "charts".into(),
        }
    }
}

/// Full session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    pub session: SessionSection,
    pub indicators: IndicatorParams,
    pub risk: RiskParams,
    pub classifier: ClassifierParams,
    pub output: OutputSection,
}

impl SessionConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&input)
    }

    /// Misconfiguration detected here aborts the run before the instrument
    /// loop starts — the only fatal error class in the pipeline.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.symbols.is_empty() {
            return Err(ConfigError::Invalid("instrument list is empty".into()));
        }
        if self.risk.position_budget <= 0.0 {
            return Err(ConfigError::Invalid(
                "position budget must be positive".into(),
            ));
        }
        if self.risk.starting_capital <= 0.0 {
            return Err(ConfigError::Invalid(
                "starting capital must be positive".into(),
            ));
        }
        if self.indicators.ma_short >= self.indicators.ma_long {
            return Err(ConfigError::Invalid(format!(
                "short MA window {} must be below long MA window {}",
                self.indicators.ma_short, self.indicators.ma_long
            )));
        }
        if self.classifier.rsi_oversold >= self.classifier.rsi_overbought {
            return Err(ConfigError::Invalid(
                "RSI oversold threshold must be below overbought".into(),
            ));
        }
        Ok(())
    }
}
