//! IntraLab CLI — run intraday sessions and train the predictor.
//!
//! Commands:
//! - `run` — fetch data, compute indicators, simulate, notify, export charts
//! - `train` — fit the logistic predictor on fetched data and persist it

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use intralab_core::engine::IndicatorEngine;
use intralab_core::model::{build_training_set, LogisticModel};
use intralab_runner::chart::CsvChartExporter;
use intralab_runner::config::SessionConfig;
use intralab_runner::data::{MarketDataProvider, SyntheticProvider, YahooIntraday};
use intralab_runner::notify::{Notifier, StdoutNotifier, TelegramNotifier};
use intralab_runner::session::{run_session, InstrumentOutcome, SessionDeps};

#[derive(Parser)]
#[command(
    name = "intralab",
    about = "IntraLab CLI — intraday signal engine and trade simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session over the configured instruments.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Symbols to process (overrides the config's instrument list).
        #[arg(long, num_args = 1..)]
        symbols: Vec<String>,

        /// Evaluate only the most recent bar (alert mode).
        #[arg(long, default_value_t = false)]
        latest_only: bool,

        /// Use deterministic synthetic data instead of the network.
        #[arg(long, default_value_t = false)]
        synthetic: bool,

        /// Chart output directory. Defaults to the config's [output] value.
        #[arg(long)]
        chart_dir: Option<String>,
    },
    /// Fit the logistic predictor on one symbol's data and persist it.
    Train {
        /// Symbol to train on.
        #[arg(long)]
        symbol: String,

        /// Output path for the model artifact.
        #[arg(long, default_value = "model.json")]
        model_path: PathBuf,

        /// Lookback period passed to the data provider.
        #[arg(long, default_value = "7d")]
        lookback: String,

        /// Bar interval passed to the data provider.
        #[arg(long, default_value = "15m")]
        interval: String,

        /// Use deterministic synthetic data instead of the network.
        #[arg(long, default_value_t = false)]
        synthetic: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            symbols,
            latest_only,
            synthetic,
            chart_dir,
        } => run_cmd(config, symbols, latest_only, synthetic, chart_dir),
        Commands::Train {
            symbol,
            model_path,
            lookback,
            interval,
            synthetic,
        } => train_cmd(&symbol, &model_path, &lookback, &interval, synthetic),
    }
}

fn run_cmd(
    config_path: Option<PathBuf>,
    symbols: Vec<String>,
    latest_only: bool,
    synthetic: bool,
    chart_dir: Option<String>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => SessionConfig::from_file(&path)?,
        None => SessionConfig::default(),
    };
    if !symbols.is_empty() {
        config.session.symbols = symbols;
    }
    if latest_only {
        config.session.latest_only = true;
    }
    if let Some(dir) = chart_dir {
        config.output.chart_dir = dir;
    }

    let yahoo;
    let synth;
    let provider: &dyn MarketDataProvider = if synthetic {
        synth = SyntheticProvider::new(42, 120);
        &synth
    } else {
        yahoo = YahooIntraday::new();
        &yahoo
    };

    // Telegram when credentials exist, stdout otherwise.
    let telegram;
    let stdout_notifier;
    let notifier: &dyn Notifier = match TelegramNotifier::from_env() {
        Ok(n) => {
            telegram = n;
            &telegram
        }
        Err(_) => {
            stdout_notifier = StdoutNotifier;
            &stdout_notifier
        }
    };

    let chart = CsvChartExporter::new(&config.output.chart_dir);

    let deps = SessionDeps {
        provider,
        notifier,
        chart: &chart,
    };

    // Misconfiguration is the only fatal case: exit non-zero, no partial output.
    let outcomes = run_session(&config, &deps)?;
    print_session_summary(&outcomes);

    Ok(())
}

fn train_cmd(
    symbol: &str,
    model_path: &Path,
    lookback: &str,
    interval: &str,
    synthetic: bool,
) -> Result<()> {
    let yahoo;
    let synth;
    let provider: &dyn MarketDataProvider = if synthetic {
        synth = SyntheticProvider::new(42, 240);
        &synth
    } else {
        yahoo = YahooIntraday::new();
        &yahoo
    };

    let (series, sanitize) = provider.fetch(symbol, lookback, interval)?;
    for warning in &sanitize.dropped {
        eprintln!("{warning}");
    }
    if series.is_empty() {
        bail!("no data for {symbol}; cannot train");
    }

    let rows = IndicatorEngine::default().compute(&series)?;
    let training = build_training_set(&rows);
    println!(
        "Training on {} samples from {} ({} bars)",
        training.samples.len(),
        symbol,
        series.len()
    );

    let model = LogisticModel::fit(&training)?;
    model
        .save(model_path)
        .with_context(|| format!("persist model to {}", model_path.display()))?;
    println!("Model saved to {}", model_path.display());

    Ok(())
}

fn print_session_summary(outcomes: &[InstrumentOutcome]) {
    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    println!();
    println!("=== Session Result ===");
    println!("Instruments:    {}", outcomes.len());
    println!("Completed:      {succeeded}");
    println!("Skipped:        {}", outcomes.len() - succeeded);
    for outcome in outcomes {
        match &outcome.result {
            Ok(session) => {
                println!(
                    "{:<10} trades: {:<3} realized: ${:<10.2} ROI: {:.2}%",
                    outcome.symbol,
                    session.summary.trade_count,
                    session.summary.realized_profit,
                    session.summary.roi * 100.0
                );
            }
            Err(err) => {
                println!("{:<10} skipped: {err}", outcome.symbol);
            }
        }
    }
}
