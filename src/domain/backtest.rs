//! Backtest engine: one parametrized simulation per strategy configuration.
//!
//! Every run is a fresh pass over the price series. The simulator walks the
//! days in order, applies any transition event dated that day, then marks
//! the portfolio to the day's close. Open positions are never force-closed.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::MacrossError;
use super::execution::{enter_long, exit_long, DeploymentPolicy, EntryResult, ExitResult, Trade};
use super::metrics::{
    best_strategy, buy_and_hold, BotComparison, PerformanceSummary, TradeCounts,
};
use super::moving_average::{simple_moving_average, MovingAverageSeries};
use super::portfolio::{Portfolio, PortfolioState, ValuePoint};
use super::price::{PricePoint, PriceSeries};
use super::signal::{crossover_events, TransitionEvent, TransitionKind};
use super::strategy::StrategyConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_capital: f64,
    /// Start simulating on the first day the long average exists.
    pub skip_warmup: bool,
}

impl BacktestConfig {
    pub fn validate(&self) -> Result<(), MacrossError> {
        if self.ticker.trim().is_empty() {
            return Err(MacrossError::invalid_configuration("ticker must not be empty"));
        }
        validate_capital(self.initial_capital)
    }
}

fn validate_capital(initial_capital: f64) -> Result<(), MacrossError> {
    if !(initial_capital.is_finite() && initial_capital > 0.0) {
        return Err(MacrossError::invalid_configuration(format!(
            "initial capital must be a positive number, got {initial_capital}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RunWarning {
    /// The series never fills the long window, so no signal can form.
    InsufficientHistory { bars: usize, window: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub trades: Vec<Trade>,
    pub value_curve: Vec<ValuePoint>,
    pub final_state: PortfolioState,
    /// Marked to the last simulated close.
    pub final_value: f64,
}

/// Run the all-in/all-out state machine over `prices`.
pub fn run_simulation(
    prices: &[PricePoint],
    events: &[TransitionEvent],
    initial_cash: f64,
    policy: DeploymentPolicy,
) -> Result<SimulationResult, MacrossError> {
    validate_capital(initial_cash)?;

    let mut portfolio = Portfolio::new(initial_cash);
    let mut pending = events.iter().peekable();

    for point in prices {
        while let Some(event) = pending.next_if(|e| e.date <= point.date) {
            if event.date < point.date {
                warn!(date = %event.date, kind = %event.kind, "event has no matching price day, ignored");
                continue;
            }
            match event.kind {
                TransitionKind::EnterLong => {
                    match enter_long(&mut portfolio, point.date, point.close, policy) {
                        EntryResult::Entered(trade) => {
                            debug!(date = %trade.date, price = trade.price, shares = trade.shares, "buy");
                        }
                        other => debug!(date = %point.date, result = ?other, "entry skipped"),
                    }
                }
                TransitionKind::ExitLong => match exit_long(&mut portfolio, point.date, point.close) {
                    ExitResult::Exited(trade) => {
                        debug!(date = %trade.date, price = trade.price, shares = trade.shares, "sell");
                    }
                    ExitResult::NoPosition => debug!(date = %point.date, "exit skipped, no position"),
                },
            }
        }
        portfolio.record_value(point.date, point.close);
    }

    for event in pending {
        warn!(date = %event.date, kind = %event.kind, "event after last price day, ignored");
    }

    let final_state = portfolio.state();
    let final_value = portfolio
        .value_curve
        .last()
        .map(|p| p.value)
        .unwrap_or(initial_cash);

    Ok(SimulationResult {
        trades: portfolio.trades,
        value_curve: portfolio.value_curve,
        final_state,
        final_value,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRun {
    pub strategy: StrategyConfig,
    pub short_ma: MovingAverageSeries,
    pub long_ma: MovingAverageSeries,
    pub events: Vec<TransitionEvent>,
    pub simulation: SimulationResult,
    pub performance: PerformanceSummary,
    pub trade_counts: TradeCounts,
    pub warnings: Vec<RunWarning>,
}

/// Averages and events over the full series; simulation from `start`.
pub fn run_strategy(
    prices: &PriceSeries,
    strategy: &StrategyConfig,
    initial_capital: f64,
    start: usize,
) -> Result<StrategyRun, MacrossError> {
    strategy.validate()?;
    validate_capital(initial_capital)?;

    let points = prices.points();
    let short_ma = simple_moving_average(points, strategy.short_window);
    let long_ma = simple_moving_average(points, strategy.long_window);
    let events = crossover_events(&short_ma, &long_ma);

    let mut warnings = Vec::new();
    if points.len() < strategy.long_window {
        warn!(
            ticker = prices.ticker(),
            strategy = %strategy.name,
            bars = points.len(),
            window = strategy.long_window,
            "insufficient history for long moving average, no trades possible"
        );
        warnings.push(RunWarning::InsufficientHistory {
            bars: points.len(),
            window: strategy.long_window,
        });
    }

    let window = &points[start.min(points.len() - 1)..];
    // Crossings during the warm-up are history, not orders.
    let first_day = window[0].date;
    let live: Vec<TransitionEvent> = events.iter().copied().filter(|e| e.date >= first_day).collect();
    let simulation = run_simulation(window, &live, initial_capital, strategy.policy)?;
    let performance =
        PerformanceSummary::from_curve(&strategy.name, initial_capital, &simulation.value_curve)?;
    let trade_counts = TradeCounts::from_trades(&simulation.trades);

    info!(
        ticker = prices.ticker(),
        strategy = %strategy.name,
        trades = trade_counts.total,
        final_value = simulation.final_value,
        "strategy run complete"
    );

    Ok(StrategyRun {
        strategy: strategy.clone(),
        short_ma,
        long_ma,
        events,
        simulation,
        performance,
        trade_counts,
        warnings,
    })
}

/// First index to simulate from. With `skip_warmup`, the first day every
/// strategy's long average is present; nothing is trimmed when a series
/// never fills a long window.
pub fn evaluation_start(prices: &PriceSeries, strategies: &[StrategyConfig], skip_warmup: bool) -> usize {
    if !skip_warmup {
        return 0;
    }
    let longest = strategies.iter().map(|s| s.long_window).max().unwrap_or(0);
    if longest == 0 || prices.len() < longest {
        0
    } else {
        longest - 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    pub ticker: String,
    pub initial_capital: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trading_days: usize,
    pub run: StrategyRun,
    pub buy_and_hold: PerformanceSummary,
    pub comparison: BotComparison,
}

/// Single strategy against buy-and-hold over the same window.
pub fn run_backtest(
    config: &BacktestConfig,
    prices: &PriceSeries,
    strategy: &StrategyConfig,
) -> Result<BacktestReport, MacrossError> {
    config.validate()?;
    strategy.validate()?;

    let start = evaluation_start(prices, std::slice::from_ref(strategy), config.skip_warmup);
    let window = &prices.points()[start..];

    let run = run_strategy(prices, strategy, config.initial_capital, start)?;
    let baseline = buy_and_hold(window, config.initial_capital)?;
    let comparison = BotComparison::new(&run.performance, &baseline);

    Ok(BacktestReport {
        ticker: prices.ticker().to_string(),
        initial_capital: config.initial_capital,
        start_date: window[0].date,
        end_date: window[window.len() - 1].date,
        trading_days: window.len(),
        run,
        buy_and_hold: baseline,
        comparison,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub ticker: String,
    pub initial_capital: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trading_days: usize,
    pub buy_and_hold: PerformanceSummary,
    pub runs: Vec<StrategyRun>,
    pub best: PerformanceSummary,
}

impl ComparisonReport {
    /// Buy-and-hold first, then strategies in input order.
    pub fn summaries(&self) -> Vec<PerformanceSummary> {
        std::iter::once(self.buy_and_hold.clone())
            .chain(self.runs.iter().map(|r| r.performance.clone()))
            .collect()
    }
}

/// Buy-and-hold plus every strategy, ranked by percentage return.
pub fn run_comparison(
    config: &BacktestConfig,
    prices: &PriceSeries,
    strategies: &[StrategyConfig],
) -> Result<ComparisonReport, MacrossError> {
    config.validate()?;
    if strategies.is_empty() {
        return Err(MacrossError::invalid_configuration(
            "at least one strategy is required for a comparison",
        ));
    }
    for strategy in strategies {
        strategy.validate()?;
    }

    let start = evaluation_start(prices, strategies, config.skip_warmup);
    let window = &prices.points()[start..];

    let baseline = buy_and_hold(window, config.initial_capital)?;
    let runs = strategies
        .iter()
        .map(|s| run_strategy(prices, s, config.initial_capital, start))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = ComparisonReport {
        ticker: prices.ticker().to_string(),
        initial_capital: config.initial_capital,
        start_date: window[0].date,
        end_date: window[window.len() - 1].date,
        trading_days: window.len(),
        best: baseline.clone(),
        buy_and_hold: baseline,
        runs,
    };
    if let Some(best) = best_strategy(&report.summaries()) {
        report.best = best.clone();
    }
    Ok(report)
}
