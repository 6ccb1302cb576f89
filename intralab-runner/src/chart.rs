//! Chart export — price/indicator series plus trade markers.
//!
//! The sink writes one CSV artifact per instrument; whatever renders it
//! (a notebook, a spreadsheet, a plotting tool) is outside the pipeline.
//! Export failures are reported to the caller but treated as side-effect
//! failures there — they never abort a session.

use anyhow::{Context, Result};
use intralab_core::domain::TradeEvent;
use intralab_core::engine::IndicatorRow;
use serde::Serialize;
use std::path::PathBuf;

use crate::report::marker_label;

/// Receives the computed series and the trade log for one instrument.
pub trait ChartSink {
    fn export(&self, output_id: &str, rows: &[IndicatorRow], events: &[TradeEvent]) -> Result<()>;
}

/// Chart output identifier for a symbol ("HUT.TO" → "HUT-TO").
pub fn output_id(symbol: &str) -> String {
    symbol.replace('.', "-")
}

#[derive(Debug, Serialize)]
struct ChartRecord {
    timestamp: String,
    close: f64,
    ma_short: f64,
    ma_long: f64,
    boll_upper: f64,
    boll_lower: f64,
    rsi: f64,
    marker: String,
    marker_price: String,
}

/// Writes `{dir}/{output_id}_chart.csv` with one record per indicator row.
pub struct CsvChartExporter {
    dir: PathBuf,
}

impl CsvChartExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, output_id: &str) -> PathBuf {
        self.dir.join(format!("{output_id}_chart.csv"))
    }
}

impl ChartSink for CsvChartExporter {
    fn export(&self, output_id: &str, rows: &[IndicatorRow], events: &[TradeEvent]) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create chart dir {}", self.dir.display()))?;
        let path = self.path_for(output_id);
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("create chart CSV {}", path.display()))?;

        for row in rows {
            // At most one event per bar, keyed by timestamp.
            let event = events.iter().find(|e| e.timestamp == row.bar.timestamp);
            writer
                .serialize(ChartRecord {
                    timestamp: row.bar.timestamp.to_rfc3339(),
                    close: row.bar.close,
                    ma_short: row.ma_short,
                    ma_long: row.ma_long,
                    boll_upper: row.boll_upper,
                    boll_lower: row.boll_lower,
                    rsi: row.rsi,
                    marker: event.map_or(String::new(), |e| marker_label(e.kind).into()),
                    marker_price: event.map_or(String::new(), |e| format!("{:.4}", e.price)),
                })
                .with_context(|| format!("write chart record to {}", path.display()))?;
        }

        writer
            .flush()
            .with_context(|| format!("flush chart CSV {}", path.display()))?;
        Ok(())
    }
}

/// Discards everything; for tests and chartless runs.
#[derive(Debug, Default)]
pub struct NullChartSink;

impl ChartSink for NullChartSink {
    fn export(
        &self,
        _output_id: &str,
        _rows: &[IndicatorRow],
        _events: &[TradeEvent],
    ) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use intralab_core::domain::{Bar, TradeKind};

    fn rows() -> Vec<IndicatorRow> {
        let base = Utc.with_ymd_and_hms(2024, 6, 3, 13, 30, 0).unwrap();
        (0..3)
            .map(|i| IndicatorRow {
                bar: Bar {
                    timestamp: base + Duration::minutes(15 * i),
                    open: 100.0,
                    high: 101.0,
                    low: 99.0,
                    close: 100.0 + i as f64,
                    volume: 1000,
                },
                ma_short: 99.5,
                ma_long: 98.5,
                rsi: 50.0,
                macd: 0.0,
                macd_signal: 0.0,
                boll_upper: 103.0,
                boll_middle: 100.0,
                boll_lower: 97.0,
                atr: 1.0,
                bar_return: 0.0,
                volatility: 1.0,
                volume_ratio: 1.0,
            })
            .collect()
    }

    #[test]
    fn output_id_replaces_dots() {
        assert_eq!(output_id("HUT.TO"), "HUT-TO");
        assert_eq!(output_id("SPY"), "SPY");
    }

    #[test]
    fn export_writes_one_record_per_row_with_markers() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvChartExporter::new(dir.path());
        let rows = rows();
        let events = vec![TradeEvent::entry(rows[1].bar.timestamp, 101.0, 2)];

        exporter.export("HUT-TO", &rows, &events).unwrap();

        let content = std::fs::read_to_string(exporter.path_for("HUT-TO")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4); // header + 3 rows
        assert!(lines[0].starts_with("timestamp,close,ma_short"));
        assert!(lines[2].contains("buy"));
        assert!(lines[2].contains("101.0000"));
        assert!(!lines[1].contains("buy"));
    }

    #[test]
    fn export_marks_exits() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = CsvChartExporter::new(dir.path());
        let rows = rows();
        let events = vec![TradeEvent::exit(
            TradeKind::TakeProfit,
            rows[2].bar.timestamp,
            103.0,
            2,
            6.0,
        )];

        exporter.export("SPY", &rows, &events).unwrap();
        let content = std::fs::read_to_string(exporter.path_for("SPY")).unwrap();
        assert!(content.contains("take_profit"));
    }

    #[test]
    fn export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let exporter = CsvChartExporter::new(&nested);
        exporter.export("SPY", &rows(), &[]).unwrap();
        assert!(exporter.path_for("SPY").exists());
    }
}
