//! Performance metrics and strategy ranking.

use serde::Serialize;

use super::error::MacrossError;
use super::execution::{Trade, TradeAction};
use super::portfolio::ValuePoint;
use super::price::PricePoint;

pub const BUY_AND_HOLD: &str = "Buy & Hold";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub name: String,
    pub initial_capital: f64,
    pub final_value: f64,
    pub absolute_return: f64,
    /// Percent, e.g. `12.5` for +12.5%.
    pub return_pct: f64,
    /// Largest peak-to-trough decline of the value series as a fraction.
    pub max_drawdown: f64,
}

impl PerformanceSummary {
    pub fn new(
        name: impl Into<String>,
        initial_capital: f64,
        final_value: f64,
    ) -> Result<Self, MacrossError> {
        if !(initial_capital.is_finite() && initial_capital > 0.0) {
            return Err(MacrossError::invalid_configuration(
                "initial capital must be a positive number",
            ));
        }
        let absolute_return = final_value - initial_capital;
        Ok(PerformanceSummary {
            name: name.into(),
            initial_capital,
            final_value,
            absolute_return,
            return_pct: absolute_return / initial_capital * 100.0,
            max_drawdown: 0.0,
        })
    }

    /// Summary of a value series; an empty series means nothing moved.
    pub fn from_curve(
        name: impl Into<String>,
        initial_capital: f64,
        curve: &[ValuePoint],
    ) -> Result<Self, MacrossError> {
        let final_value = curve.last().map(|p| p.value).unwrap_or(initial_capital);
        let mut summary = Self::new(name, initial_capital, final_value)?;
        summary.max_drawdown = max_drawdown(curve);
        Ok(summary)
    }
}

/// Value series of buying fractional shares at the first close and holding.
pub fn buy_and_hold_curve(prices: &[PricePoint], initial_capital: f64) -> Vec<ValuePoint> {
    let Some(first) = prices.first() else {
        return Vec::new();
    };
    let shares = initial_capital / first.close;
    prices
        .iter()
        .map(|p| ValuePoint {
            date: p.date,
            cash: 0.0,
            shares,
            value: shares * p.close,
        })
        .collect()
}

pub fn buy_and_hold(
    prices: &[PricePoint],
    initial_capital: f64,
) -> Result<PerformanceSummary, MacrossError> {
    if prices.is_empty() {
        return Err(MacrossError::InvalidPriceData {
            reason: "buy-and-hold needs at least one price".into(),
        });
    }
    let curve = buy_and_hold_curve(prices, initial_capital);
    PerformanceSummary::from_curve(BUY_AND_HOLD, initial_capital, &curve)
}

/// Highest `return_pct`; ties go to the earliest entry.
pub fn best_strategy(summaries: &[PerformanceSummary]) -> Option<&PerformanceSummary> {
    summaries.iter().fold(None, |best, s| match best {
        Some(b) if b.return_pct >= s.return_pct => Some(b),
        _ => Some(s),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotComparison {
    pub bot_return: f64,
    pub bot_return_pct: f64,
    pub baseline_return: f64,
    pub baseline_return_pct: f64,
    /// bot final value minus baseline final value
    pub difference: f64,
    pub outperformed: bool,
}

impl BotComparison {
    pub fn new(bot: &PerformanceSummary, baseline: &PerformanceSummary) -> Self {
        BotComparison {
            bot_return: bot.absolute_return,
            bot_return_pct: bot.return_pct,
            baseline_return: baseline.absolute_return,
            baseline_return_pct: baseline.return_pct,
            difference: bot.final_value - baseline.final_value,
            outperformed: bot.return_pct > baseline.return_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TradeCounts {
    pub total: usize,
    pub buys: usize,
    pub sells: usize,
}

impl TradeCounts {
    pub fn from_trades(trades: &[Trade]) -> Self {
        let buys = trades
            .iter()
            .filter(|t| t.action == TradeAction::Buy)
            .count();
        TradeCounts {
            total: trades.len(),
            buys,
            sells: trades.len() - buys,
        }
    }
}

pub fn max_drawdown(curve: &[ValuePoint]) -> f64 {
    let Some(first) = curve.first() else {
        return 0.0;
    };

    let mut peak = first.value;
    let mut max_dd = 0.0_f64;

    for point in curve {
        if point.value > peak {
            peak = point.value;
        } else if peak > 0.0 {
            let dd = (peak - point.value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}
