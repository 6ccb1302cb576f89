//! Market data providers.
//!
//! The `MarketDataProvider` trait abstracts over sources so the session
//! loop can run against Yahoo's intraday chart API, a seeded synthetic
//! walk, or a test double. An empty series is a valid outcome meaning
//! "no data available" — providers only fail on transport or format
//! problems.

use chrono::{TimeZone, Utc};
use intralab_core::domain::{Bar, PriceSeries, SanitizeReport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Structured error types for data retrieval.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },
}

/// Trait for market data sources.
///
/// `lookback` and `interval` are provider-level strings ("1d", "15m"),
/// passed through untouched; an unknown value surfaces as a provider error.
pub trait MarketDataProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch bars for one symbol. The returned series is already sanitized;
    /// the report carries any bars that were dropped on the way in.
    fn fetch(
        &self,
        symbol: &str,
        lookback: &str,
        interval: &str,
    ) -> Result<(PriceSeries, SanitizeReport), DataError>;
}

// ── Yahoo Finance intraday ─────────────────────────────────────────────

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Intraday bars from Yahoo's v8 chart API.
///
/// Yahoo has no official API and changes formats without notice; parse
/// failures map to `ResponseFormatChanged` rather than panicking.
pub struct YahooIntraday {
    client: reqwest::blocking::Client,
    max_retries: u32,
    base_delay: Duration,
}

impl Default for YahooIntraday {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooIntraday {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    fn chart_url(symbol: &str, lookback: &str, interval: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?range={lookback}&interval={interval}&includePrePost=false"
        )
    }

    fn fetch_once(&self, url: &str) -> Result<ChartResponse, DataError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        if response.status().as_u16() == 429 {
            return Err(DataError::RateLimited);
        }

        response
            .json::<ChartResponse>()
            .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))
    }

    /// Parse the chart payload into raw bars. Missing quote entries (Yahoo
    /// emits nulls for halted intervals) are skipped.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<Bar>, DataError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    DataError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                DataError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        // No timestamps at all: Yahoo's way of saying "no data".
        let Some(timestamps) = data.timestamp else {
            return Ok(vec![]);
        };

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            ) else {
                continue;
            };
            let Some(timestamp) = Utc.timestamp_opt(*ts, 0).single() else {
                continue;
            };
            bars.push(Bar {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        Ok(bars)
    }
}

impl MarketDataProvider for YahooIntraday {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn fetch(
        &self,
        symbol: &str,
        lookback: &str,
        interval: &str,
    ) -> Result<(PriceSeries, SanitizeReport), DataError> {
        let url = Self::chart_url(symbol, lookback, interval);

        let mut last_err = None;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(self.base_delay * 2u32.pow(attempt - 1));
            }
            match self.fetch_once(&url) {
                Ok(resp) => {
                    let raw = Self::parse_response(symbol, resp)?;
                    return Ok(PriceSeries::sanitize(symbol, raw));
                }
                Err(DataError::SymbolNotFound { symbol }) => {
                    return Err(DataError::SymbolNotFound { symbol });
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(last_err.unwrap_or_else(|| DataError::NetworkUnreachable("no attempts made".into())))
    }
}

// ── Synthetic data ─────────────────────────────────────────────────────

/// Seeded random-walk provider for offline runs and tests.
///
/// Deterministic for a given (seed, symbol) pair: the symbol perturbs the
/// seed so multi-instrument sessions do not see identical tapes.
pub struct SyntheticProvider {
    seed: u64,
    bar_count: usize,
}

impl SyntheticProvider {
    pub fn new(seed: u64, bar_count: usize) -> Self {
        Self { seed, bar_count }
    }

    fn symbol_seed(&self, symbol: &str) -> u64 {
        symbol
            .bytes()
            .fold(self.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64))
    }
}

impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        _lookback: &str,
        _interval: &str,
    ) -> Result<(PriceSeries, SanitizeReport), DataError> {
        let mut rng = StdRng::seed_from_u64(self.symbol_seed(symbol));
        let base = Utc.with_ymd_and_hms(2024, 6, 3, 13, 30, 0).unwrap();

        let mut close: f64 = 100.0 + rng.gen_range(0.0..20.0);
        let mut bars = Vec::with_capacity(self.bar_count);
        for i in 0..self.bar_count {
            let open = close;
            close = (close + rng.gen_range(-1.0..1.05)).max(1.0);
            let high = open.max(close) + rng.gen_range(0.0..0.5);
            let low = (open.min(close) - rng.gen_range(0.0..0.5)).max(0.5);
            bars.push(Bar {
                timestamp: base + chrono::Duration::minutes(15 * i as i64),
                open,
                high,
                low,
                close,
                volume: rng.gen_range(500..5000),
            });
        }

        Ok((
            PriceSeries::from_ordered(symbol, bars),
            SanitizeReport::default(),
        ))
    }
}
