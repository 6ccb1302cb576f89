//! IntraLab Runner — pipeline orchestration around `intralab-core`.
//!
//! This crate wires the engine to its collaborators:
//! - Market data retrieval (Yahoo intraday chart API, synthetic fallback)
//! - Notification delivery (Telegram, stdout)
//! - Chart artifact export (CSV series + trade markers)
//! - Report formatting (markdown alerts and summaries)
//! - TOML session configuration and the per-instrument session loop

pub mod chart;
pub mod config;
pub mod data;
pub mod notify;
pub mod report;
pub mod session;

pub use chart::{ChartSink, CsvChartExporter, NullChartSink};
pub use config::{ConfigError, SessionConfig};
pub use data::{DataError, MarketDataProvider, SyntheticProvider, YahooIntraday};
pub use notify::{Notifier, NotifyError, StdoutNotifier, TelegramNotifier};
pub use session::{run_session, InstrumentOutcome, SessionDeps};
