//! Session loop — runs the full pipeline per instrument.
//!
//! Each instrument runs to completion before the next starts: fetch →
//! sanitize → indicators → classifier → simulate → notify/chart. Failures
//! are caught at the loop boundary, reported through the notification
//! sink, and the loop proceeds; nothing after config validation is fatal
//! to the overall run.

use anyhow::Result;
use std::path::Path;

use intralab_core::config::ClassifierVariant;
use intralab_core::engine::{IndicatorEngine, IndicatorRow};
use intralab_core::model::{build_training_set, LogisticModel};
use intralab_core::signal::{MaOnlyClassifier, ModelClassifier, RuleClassifier, SignalClassifier};
use intralab_core::sim::{SessionResult, TradeSimulator};
use intralab_core::EngineError;

use crate::chart::{output_id, ChartSink};
use crate::config::{ConfigError, SessionConfig};
use crate::data::MarketDataProvider;
use crate::notify::{send_best_effort, Notifier};
use crate::report;

/// The collaborators one session borrows. All single-threaded and blocking.
pub struct SessionDeps<'a> {
    pub provider: &'a dyn MarketDataProvider,
    pub notifier: &'a dyn Notifier,
    pub chart: &'a dyn ChartSink,
}

/// What happened to one instrument.
#[derive(Debug)]
pub struct InstrumentOutcome {
    pub symbol: String,
    pub result: Result<SessionResult>,
}

impl InstrumentOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Run the configured session over every instrument.
///
/// Only misconfiguration is fatal; per-instrument failures come back as
/// outcomes, already reported through the notifier.
pub fn run_session(
    config: &SessionConfig,
    deps: &SessionDeps<'_>,
) -> Result<Vec<InstrumentOutcome>, ConfigError> {
    config.validate()?;

    let total = config.session.symbols.len();
    let mut outcomes = Vec::with_capacity(total);

    for (i, symbol) in config.session.symbols.iter().enumerate() {
        println!("[{}/{}] Processing {symbol}...", i + 1, total);

        let result = run_instrument(symbol, config, deps);
        match &result {
            Ok(session) => {
                println!(
                    "  {symbol}: {} events, realized ${:.2}",
                    session.events.len(),
                    session.summary.realized_profit
                );
            }
            Err(err) => {
                eprintln!("  {symbol}: {err}");
                let text = match err.downcast_ref::<EngineError>() {
                    Some(EngineError::NoData { .. }) => report::no_data_message(symbol),
                    _ => report::error_message(symbol, err),
                };
                send_best_effort(deps.notifier, &config.output.channel, &text);
            }
        }

        outcomes.push(InstrumentOutcome {
            symbol: symbol.clone(),
            result,
        });
    }

    Ok(outcomes)
}

/// The full pipeline for one instrument.
fn run_instrument(
    symbol: &str,
    config: &SessionConfig,
    deps: &SessionDeps<'_>,
) -> Result<SessionResult> {
    let (series, sanitize) =
        deps.provider
            .fetch(symbol, &config.session.lookback, &config.session.interval)?;
    for warning in &sanitize.dropped {
        eprintln!("  {warning}");
    }

    // Empty series short-circuits before any indicator work.
    if series.is_empty() {
        return Err(EngineError::NoData {
            symbol: symbol.to_string(),
        }
        .into());
    }

    let engine = IndicatorEngine::new(config.indicators.clone());
    let rows = engine.compute(&series)?;

    let classifier = build_classifier(config, &rows)?;

    let simulator = TradeSimulator::new(config.risk.clone());
    let result = if config.session.latest_only {
        simulator.run_latest(&rows, classifier.as_ref())?
    } else {
        simulator.run(&rows, classifier.as_ref())?
    };

    for event in &result.events {
        send_best_effort(
            deps.notifier,
            &config.output.channel,
            &report::trade_message(symbol, event),
        );
    }
    if let Some(last_row) = rows.last() {
        send_best_effort(
            deps.notifier,
            &config.output.channel,
            &report::summary_message(symbol, &result.summary, last_row),
        );
    }

    // Chart export is a side effect only; a failed write never fails the run.
    if let Err(e) = deps
        .chart
        .export(&output_id(symbol), &rows, &result.events)
    {
        eprintln!("  {symbol}: chart export failed: {e}");
    }

    Ok(result)
}

/// Build the configured classifier variant.
///
/// The model variant loads the persisted predictor, or trains one from the
/// rows at hand when the artifact is missing and training is enabled.
fn build_classifier(
    config: &SessionConfig,
    rows: &[IndicatorRow],
) -> Result<Box<dyn SignalClassifier>> {
    let params = &config.classifier;
    match params.variant {
        ClassifierVariant::MaOnly => Ok(Box::new(MaOnlyClassifier)),
        ClassifierVariant::Rules => Ok(Box::new(RuleClassifier::new(
            params.rsi_oversold,
            params.rsi_overbought,
        ))),
        ClassifierVariant::Model => {
            let path = Path::new(&params.model_path);
            let model = match LogisticModel::load(path) {
                Ok(model) => model,
                Err(EngineError::ModelUnavailable { .. }) if params.train_if_missing => {
                    println!("  no model at {}, training...", path.display());
                    let training = build_training_set(rows);
                    let model = LogisticModel::fit(&training)?;
                    if let Err(e) = model.save(path) {
                        eprintln!("  failed to persist model: {e}");
                    }
                    model
                }
                Err(e) => return Err(e.into()),
            };
            Ok(Box::new(ModelClassifier::new(
                Box::new(model),
                params.buy_probability,
                params.sell_probability,
            )))
        }
    }
}
