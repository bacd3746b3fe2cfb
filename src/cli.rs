//! CLI definition and dispatch.

use chrono::{Duration, Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::chart_svg;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report::JsonReport;
use crate::adapters::text_report::TextReport;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestReport, ComparisonReport};
use crate::domain::config_validation::{parse_date, strategy_window, validate_config};
use crate::domain::error::MacrossError;
use crate::domain::execution::DeploymentPolicy;
use crate::domain::price::PriceSeries;
use crate::domain::strategy::{parse_window_pairs, StrategyConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_CAPITAL: f64 = 10_000.0;
pub const DEFAULT_SHORT_WINDOW: usize = 20;
pub const DEFAULT_LONG_WINDOW: usize = 50;
pub const DEFAULT_COMPARE_STRATEGIES: &str = "20/50, 10/30";

#[derive(Parser, Debug)]
#[command(name = "macross", about = "Moving-average crossover backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Flags shared by every command that fetches prices and runs simulations.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Ticker symbol, e.g. AAPL
    #[arg(long)]
    pub ticker: Option<String>,
    /// Starting cash
    #[arg(long)]
    pub capital: Option<f64>,
    /// First date to fetch (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Last date to fetch (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
    /// Read `{TICKER}.csv` from this directory instead of downloading
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
    /// Write the report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write SVG charts into this directory
    #[arg(long)]
    pub charts: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest one crossover strategy against buy-and-hold
    Backtest {
        #[command(flatten)]
        run: RunArgs,
        /// Short moving-average window
        #[arg(long)]
        short: Option<usize>,
        /// Long moving-average window
        #[arg(long)]
        long: Option<usize>,
        /// Share sizing: whole or fractional
        #[arg(long)]
        policy: Option<DeploymentPolicy>,
    },
    /// Compare several crossover strategies and buy-and-hold
    Compare {
        #[command(flatten)]
        run: RunArgs,
        /// Window pairs, e.g. "20/50,10/30"
        #[arg(long)]
        strategies: Option<String>,
        /// Share sizing: whole or fractional
        #[arg(long)]
        policy: Option<DeploymentPolicy>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// The two run modes differ only in their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Backtest,
    Compare,
}

impl RunKind {
    pub fn default_lookback_days(self) -> i64 {
        match self {
            RunKind::Backtest => 730,
            RunKind::Compare => 1095,
        }
    }

    pub fn default_skip_warmup(self) -> bool {
        matches!(self, RunKind::Backtest)
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Backtest {
            run,
            short,
            long,
            policy,
        } => run_backtest(&run, short, long, policy),
        Command::Compare {
            run,
            strategies,
            policy,
        } => run_compare(&run, strategies.as_deref(), policy),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Loads the INI file if one was given; otherwise every key uses its default.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, MacrossError> {
    match path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> MacrossError {
    MacrossError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn config_date(config: &dyn ConfigPort, key: &str) -> Result<Option<NaiveDate>, MacrossError> {
    config
        .get_string("backtest", key)
        .map(|s| parse_date(&s, "backtest", key))
        .transpose()
}

/// Merges flags over file values over defaults. `today` anchors the
/// default end date and lookback window.
pub fn build_backtest_config(
    config: &dyn ConfigPort,
    args: &RunArgs,
    kind: RunKind,
    today: NaiveDate,
) -> Result<BacktestConfig, MacrossError> {
    let ticker = args
        .ticker
        .clone()
        .or_else(|| config.get_string("backtest", "ticker"))
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| MacrossError::ConfigMissing {
            section: "backtest".into(),
            key: "ticker".into(),
        })?;

    let initial_capital = args
        .capital
        .unwrap_or_else(|| config.get_double("backtest", "initial_capital", DEFAULT_CAPITAL));
    if !(initial_capital.is_finite() && initial_capital > 0.0) {
        return Err(config_invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be a positive number",
        ));
    }

    let end_date = match args.end {
        Some(date) => date,
        None => config_date(config, "end_date")?.unwrap_or(today),
    };
    let start_date = match args.start {
        Some(date) => date,
        None => match config_date(config, "start_date")? {
            Some(date) => date,
            None => {
                let lookback =
                    config.get_int("backtest", "lookback_days", kind.default_lookback_days());
                if lookback < 1 {
                    return Err(config_invalid(
                        "backtest",
                        "lookback_days",
                        "lookback_days must be a positive integer",
                    ));
                }
                end_date - Duration::days(lookback)
            }
        },
    };
    if start_date >= end_date {
        return Err(config_invalid(
            "backtest",
            "start_date",
            format!("start date {start_date} must be before end date {end_date}"),
        ));
    }

    Ok(BacktestConfig {
        ticker,
        start_date,
        end_date,
        initial_capital,
        skip_warmup: config.get_bool("backtest", "skip_warmup", kind.default_skip_warmup()),
    })
}

fn config_window(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, MacrossError> {
    let value = strategy_window(config, key, default as i64)?;
    usize::try_from(value)
        .map_err(|_| config_invalid("strategy", key, format!("{key} must be at least 1")))
}

fn config_policy(
    config: &dyn ConfigPort,
    section: &str,
    default: DeploymentPolicy,
) -> Result<DeploymentPolicy, MacrossError> {
    match config.get_string(section, "policy") {
        Some(value) => value
            .parse::<DeploymentPolicy>()
            .map_err(|reason| config_invalid(section, "policy", reason)),
        None => Ok(default),
    }
}

/// The single strategy for `backtest`: flags, then `[strategy]`, then 20/50
/// whole shares.
pub fn build_strategy(
    config: &dyn ConfigPort,
    short: Option<usize>,
    long: Option<usize>,
    policy: Option<DeploymentPolicy>,
) -> Result<StrategyConfig, MacrossError> {
    let short_window = match short {
        Some(w) => w,
        None => config_window(config, "short_window", DEFAULT_SHORT_WINDOW)?,
    };
    let long_window = match long {
        Some(w) => w,
        None => config_window(config, "long_window", DEFAULT_LONG_WINDOW)?,
    };
    let policy = match policy {
        Some(p) => p,
        None => config_policy(config, "strategy", DeploymentPolicy::WholeShares)?,
    };

    let mut strategy = StrategyConfig::crossover(short_window, long_window, policy);
    // A configured name only applies when the windows were not overridden.
    if short.is_none() && long.is_none() {
        if let Some(name) = config.get_string("strategy", "name").filter(|n| !n.trim().is_empty()) {
            strategy.name = name.trim().to_string();
        }
    }
    strategy.validate()?;
    Ok(strategy)
}

/// The strategy list for `compare`: `--strategies`, then
/// `[compare] strategies`, then 20/50 and 10/30, fractional shares.
pub fn resolve_strategies(
    config: &dyn ConfigPort,
    strategies: Option<&str>,
    policy: Option<DeploymentPolicy>,
) -> Result<Vec<StrategyConfig>, MacrossError> {
    let pairs_text = strategies
        .map(str::to_string)
        .or_else(|| config.get_string("compare", "strategies"))
        .unwrap_or_else(|| DEFAULT_COMPARE_STRATEGIES.to_string());
    let policy = match policy {
        Some(p) => p,
        None => config_policy(config, "compare", DeploymentPolicy::Fractional)?,
    };

    let pairs = parse_window_pairs(&pairs_text)
        .map_err(|reason| config_invalid("compare", "strategies", reason))?;
    let strategies: Vec<StrategyConfig> = pairs
        .into_iter()
        .map(|pair| StrategyConfig::crossover(pair.short, pair.long, policy))
        .collect();
    for strategy in &strategies {
        strategy.validate()?;
    }
    Ok(strategies)
}

/// `--data-dir` wins; otherwise `[data] source` picks CSV or Yahoo.
pub fn build_data_port(
    config: &dyn ConfigPort,
    data_dir: Option<&Path>,
) -> Result<Box<dyn MarketDataPort>, MacrossError> {
    if let Some(dir) = data_dir {
        return Ok(Box::new(CsvAdapter::new(dir.to_path_buf())));
    }

    let source = config
        .get_string("data", "source")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "yahoo".to_string());
    match source.as_str() {
        "csv" => {
            let dir = config
                .get_string("data", "csv_dir")
                .ok_or_else(|| MacrossError::ConfigMissing {
                    section: "data".into(),
                    key: "csv_dir".into(),
                })?;
            Ok(Box::new(CsvAdapter::new(PathBuf::from(dir.trim()))))
        }
        "yahoo" => yahoo_port(),
        other => Err(config_invalid(
            "data",
            "source",
            format!("unknown data source '{other}' (expected yahoo or csv)"),
        )),
    }
}

#[cfg(feature = "yahoo")]
fn yahoo_port() -> Result<Box<dyn MarketDataPort>, MacrossError> {
    use crate::adapters::yahoo_adapter::YahooAdapter;
    Ok(Box::new(YahooAdapter::new()?))
}

#[cfg(not(feature = "yahoo"))]
fn yahoo_port() -> Result<Box<dyn MarketDataPort>, MacrossError> {
    Err(MacrossError::Data {
        reason: "yahoo feature is required to download prices; use --data-dir".into(),
    })
}

/// Fetches closes for the configured ticker and window.
pub fn load_prices(
    data_port: &dyn MarketDataPort,
    config: &BacktestConfig,
) -> Result<PriceSeries, MacrossError> {
    eprintln!(
        "Downloading {} data ({} to {})...",
        config.ticker, config.start_date, config.end_date
    );
    let points = data_port.fetch_closes(&config.ticker, config.start_date, config.end_date)?;
    let series = PriceSeries::new(&config.ticker, points)?;
    eprintln!("  Loaded {} trading days", series.len());
    Ok(series)
}

fn renderer(format: ReportFormat) -> Box<dyn ReportPort> {
    match format {
        ReportFormat::Text => Box::new(TextReport),
        ReportFormat::Json => Box::new(JsonReport),
    }
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<(), MacrossError> {
    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("Report written to: {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn write_chart(dir: &Path, name: &str, svg: &str) -> Result<(), MacrossError> {
    let path = dir.join(name);
    fs::write(&path, svg).map_err(|e| MacrossError::Report {
        reason: format!("failed to write chart {}: {e}", path.display()),
    })?;
    eprintln!("Chart written to: {}", path.display());
    Ok(())
}

pub fn write_backtest_charts(
    dir: &Path,
    prices: &PriceSeries,
    report: &BacktestReport,
) -> Result<(), MacrossError> {
    fs::create_dir_all(dir)?;
    let run = &report.run;
    write_chart(
        dir,
        &format!("{}_price_signals.svg", report.ticker),
        &chart_svg::price_signal_svg(prices.points(), &run.short_ma, &run.long_ma, &run.simulation.trades),
    )?;
    write_chart(
        dir,
        &format!("{}_portfolio_value.svg", report.ticker),
        &chart_svg::portfolio_value_svg(&run.simulation.value_curve, report.initial_capital),
    )
}

pub fn write_comparison_charts(
    dir: &Path,
    prices: &PriceSeries,
    report: &ComparisonReport,
) -> Result<(), MacrossError> {
    fs::create_dir_all(dir)?;
    write_chart(
        dir,
        &format!("{}_strategy_returns.svg", report.ticker),
        &chart_svg::returns_bar_svg(&report.summaries()),
    )?;
    if let Some(first) = report.runs.first() {
        write_chart(
            dir,
            &format!("{}_price_signals.svg", report.ticker),
            &chart_svg::price_signal_svg(
                prices.points(),
                &first.short_ma,
                &first.long_ma,
                &first.simulation.trades,
            ),
        )?;
    }
    let best_run = report.runs.iter().find(|r| r.performance == report.best);
    if let Some(run) = best_run {
        write_chart(
            dir,
            &format!("{}_best_portfolio_value.svg", report.ticker),
            &chart_svg::portfolio_value_svg(&run.simulation.value_curve, report.initial_capital),
        )?;
    }
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run_backtest(
    args: &RunArgs,
    short: Option<usize>,
    long: Option<usize>,
    policy: Option<DeploymentPolicy>,
) -> Result<(), MacrossError> {
    let config = load_config(args.config.as_deref())?;
    validate_config(&config)?;

    let bt_config = build_backtest_config(&config, args, RunKind::Backtest, today())?;
    let strategy = build_strategy(&config, short, long, policy)?;
    let data_port = build_data_port(&config, args.data_dir.as_deref())?;

    let prices = load_prices(data_port.as_ref(), &bt_config)?;
    eprintln!("Running {} on {}...", strategy.name, bt_config.ticker);
    let report = backtest_engine::run_backtest(&bt_config, &prices, &strategy)?;

    let rendered = renderer(args.format).render_backtest(&report)?;
    emit(&rendered, args.output.as_deref())?;
    if let Some(dir) = &args.charts {
        write_backtest_charts(dir, &prices, &report)?;
    }
    Ok(())
}

fn run_compare(
    args: &RunArgs,
    strategies: Option<&str>,
    policy: Option<DeploymentPolicy>,
) -> Result<(), MacrossError> {
    let config = load_config(args.config.as_deref())?;
    validate_config(&config)?;

    let bt_config = build_backtest_config(&config, args, RunKind::Compare, today())?;
    let strategies = resolve_strategies(&config, strategies, policy)?;
    let data_port = build_data_port(&config, args.data_dir.as_deref())?;

    let prices = load_prices(data_port.as_ref(), &bt_config)?;
    eprintln!("Testing {} strategies on {}...", strategies.len(), bt_config.ticker);
    let report = backtest_engine::run_comparison(&bt_config, &prices, &strategies)?;

    let rendered = renderer(args.format).render_comparison(&report)?;
    emit(&rendered, args.output.as_deref())?;
    if let Some(dir) = &args.charts {
        write_comparison_charts(dir, &prices, &report)?;
    }
    Ok(())
}

fn run_validate(path: &Path) -> Result<(), MacrossError> {
    eprintln!("Validating configuration: {}", path.display());
    let config = FileConfigAdapter::from_file(path)?;
    validate_config(&config)?;

    let strategy = build_strategy(&config, None, None, None)?;
    eprintln!("  strategy: {} ({})", strategy.name, strategy.policy);
    let compare = resolve_strategies(&config, None, None)?;
    let names: Vec<&str> = compare.iter().map(|s| s.name.as_str()).collect();
    eprintln!("  compare:  {}", names.join(", "));

    eprintln!("\nConfiguration is valid.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn ini(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn parses_backtest_flags() {
        let cli = Cli::try_parse_from([
            "macross", "backtest", "--ticker", "msft", "--capital", "5000", "--short", "10",
            "--long", "30", "--policy", "fractional", "--start", "2023-01-01", "--format", "json",
        ])
        .unwrap();
        let Command::Backtest {
            run,
            short,
            long,
            policy,
        } = cli.command
        else {
            panic!("expected backtest command");
        };
        assert_eq!(run.ticker.as_deref(), Some("msft"));
        assert_eq!(run.capital, Some(5000.0));
        assert_eq!(run.start, Some(d(2023, 1, 1)));
        assert_eq!(run.format, ReportFormat::Json);
        assert_eq!(short, Some(10));
        assert_eq!(long, Some(30));
        assert_eq!(policy, Some(DeploymentPolicy::Fractional));
    }

    #[test]
    fn rejects_unknown_policy_flag() {
        let result = Cli::try_parse_from(["macross", "compare", "--policy", "half"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_defaults_from_today() {
        let args = RunArgs {
            ticker: Some(" aapl ".into()),
            ..RunArgs::default()
        };
        let config = build_backtest_config(&FileConfigAdapter::empty(), &args, RunKind::Backtest, d(2024, 6, 30))
            .unwrap();
        assert_eq!(config.ticker, "AAPL");
        assert_eq!(config.initial_capital, DEFAULT_CAPITAL);
        assert_eq!(config.end_date, d(2024, 6, 30));
        assert_eq!(config.start_date, d(2024, 6, 30) - Duration::days(730));
        assert!(config.skip_warmup);

        let config = build_backtest_config(&FileConfigAdapter::empty(), &args, RunKind::Compare, d(2024, 6, 30))
            .unwrap();
        assert_eq!(config.start_date, d(2024, 6, 30) - Duration::days(1095));
        assert!(!config.skip_warmup);
    }

    #[test]
    fn flags_override_file() {
        let config = ini(
            "[backtest]\nticker = IBM\ninitial_capital = 2000\nstart_date = 2020-01-01\nend_date = 2021-01-01\n",
        );
        let args = RunArgs {
            ticker: Some("goog".into()),
            capital: Some(7500.0),
            end: Some(d(2022, 1, 1)),
            ..RunArgs::default()
        };
        let bt = build_backtest_config(&config, &args, RunKind::Backtest, d(2030, 1, 1)).unwrap();
        assert_eq!(bt.ticker, "GOOG");
        assert_eq!(bt.initial_capital, 7500.0);
        assert_eq!(bt.start_date, d(2020, 1, 1));
        assert_eq!(bt.end_date, d(2022, 1, 1));
    }

    #[test]
    fn missing_ticker_is_config_missing() {
        let result = build_backtest_config(
            &FileConfigAdapter::empty(),
            &RunArgs::default(),
            RunKind::Backtest,
            d(2024, 1, 1),
        );
        assert!(matches!(result, Err(MacrossError::ConfigMissing { ref key, .. }) if key == "ticker"));
    }

    #[test]
    fn non_positive_capital_flag_is_rejected() {
        let args = RunArgs {
            ticker: Some("AAPL".into()),
            capital: Some(0.0),
            ..RunArgs::default()
        };
        let result = build_backtest_config(&FileConfigAdapter::empty(), &args, RunKind::Backtest, d(2024, 1, 1));
        assert!(matches!(result, Err(MacrossError::ConfigInvalid { .. })));
    }

    #[test]
    fn inverted_date_flags_are_rejected() {
        let args = RunArgs {
            ticker: Some("AAPL".into()),
            start: Some(d(2024, 5, 1)),
            end: Some(d(2024, 1, 1)),
            ..RunArgs::default()
        };
        let result = build_backtest_config(&FileConfigAdapter::empty(), &args, RunKind::Backtest, d(2024, 6, 1));
        assert!(matches!(result, Err(MacrossError::ConfigInvalid { .. })));
    }

    #[test]
    fn strategy_defaults_and_name() {
        let strategy = build_strategy(&FileConfigAdapter::empty(), None, None, None).unwrap();
        assert_eq!(strategy.short_window, 20);
        assert_eq!(strategy.long_window, 50);
        assert_eq!(strategy.policy, DeploymentPolicy::WholeShares);
        assert_eq!(strategy.name, "MA 20/50");

        let config = ini("[strategy]\nname = Golden cross\nshort_window = 50\nlong_window = 200\n");
        let strategy = build_strategy(&config, None, None, None).unwrap();
        assert_eq!(strategy.name, "Golden cross");
        assert_eq!(strategy.long_window, 200);

        let strategy = build_strategy(&config, Some(5), None, None).unwrap();
        assert_eq!(strategy.name, "MA 5/200");
    }

    #[test]
    fn strategy_rejects_inverted_flags() {
        let result = build_strategy(&FileConfigAdapter::empty(), Some(50), Some(20), None);
        assert!(matches!(result, Err(MacrossError::InvalidConfiguration { .. })));
    }

    #[test]
    fn strategy_rejects_non_numeric_window() {
        let config = ini("[strategy]\nshort_window = ten\nlong_window = 30\n");
        let result = build_strategy(&config, None, None, None);
        assert!(matches!(result, Err(MacrossError::ConfigInvalid { ref key, .. }) if key == "short_window"));

        // An explicit flag never consults the file value.
        let strategy = build_strategy(&config, Some(10), None, None).unwrap();
        assert_eq!((strategy.short_window, strategy.long_window), (10, 30));
    }

    #[test]
    fn strategy_rejects_negative_window() {
        let config = ini("[strategy]\nshort_window = -3\n");
        let result = build_strategy(&config, None, None, None);
        assert!(matches!(result, Err(MacrossError::ConfigInvalid { .. })));
    }

    #[test]
    fn compare_defaults() {
        let strategies = resolve_strategies(&FileConfigAdapter::empty(), None, None).unwrap();
        let names: Vec<&str> = strategies.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["MA 20/50", "MA 10/30"]);
        assert!(strategies.iter().all(|s| s.policy == DeploymentPolicy::Fractional));
    }

    #[test]
    fn compare_flag_overrides_config() {
        let config = ini("[compare]\nstrategies = 5/15\npolicy = whole\n");
        let strategies = resolve_strategies(&config, Some("3/7,8/21"), None).unwrap();
        assert_eq!(strategies.len(), 2);
        assert_eq!(strategies[1].long_window, 21);
        assert_eq!(strategies[0].policy, DeploymentPolicy::WholeShares);
    }

    #[test]
    fn compare_rejects_garbage() {
        let result = resolve_strategies(&FileConfigAdapter::empty(), Some("20-50"), None);
        assert!(matches!(result, Err(MacrossError::ConfigInvalid { .. })));
    }

    #[test]
    fn data_port_selection() {
        assert!(build_data_port(&FileConfigAdapter::empty(), Some(Path::new("/tmp"))).is_ok());
        assert!(matches!(
            build_data_port(&ini("[data]\nsource = csv\n"), None),
            Err(MacrossError::ConfigMissing { .. })
        ));
        assert!(build_data_port(&ini("[data]\nsource = csv\ncsv_dir = /tmp\n"), None).is_ok());
        assert!(matches!(
            build_data_port(&ini("[data]\nsource = bloomberg\n"), None),
            Err(MacrossError::ConfigInvalid { .. })
        ));
    }
}
