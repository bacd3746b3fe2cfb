//! Console report adapter implementing ReportPort.

use std::fmt::Write as _;

use crate::domain::backtest::{BacktestReport, ComparisonReport, RunWarning, StrategyRun};
use crate::domain::error::MacrossError;
use crate::domain::execution::{DeploymentPolicy, Trade};
use crate::ports::report_port::ReportPort;

const RULE_WIDTH: usize = 70;
const RECENT_TRADES: usize = 5;

pub struct TextReport;

/// `$1,234,567.89`, with a leading minus for losses.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac}")
}

/// `+12.34%` / `-5.00%`
pub fn format_pct(value: f64) -> String {
    format!("{:+.2}%", value)
}

fn rule(out: &mut String) {
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
}

fn banner(out: &mut String, title: &str) {
    rule(out);
    out.push_str(title);
    out.push('\n');
    rule(out);
}

fn shares(value: f64, policy: DeploymentPolicy) -> String {
    match policy {
        DeploymentPolicy::WholeShares => format!("{:.0}", value),
        DeploymentPolicy::Fractional => format!("{:.4}", value),
    }
}

fn render_warnings(out: &mut String, run: &StrategyRun) {
    for warning in &run.warnings {
        match warning {
            RunWarning::InsufficientHistory { bars, window } => {
                let _ = writeln!(
                    out,
                    "warning: {}: only {} trading days, long average needs {}; no trades possible",
                    run.strategy.name, bars, window
                );
            }
        }
    }
}

fn render_trades(out: &mut String, trades: &[Trade], policy: DeploymentPolicy) {
    let _ = writeln!(
        out,
        "{:<12} {:<6} {:>12} {:>14} {:>14} {:>16}",
        "Date", "Action", "Price", "Shares", "Total Shares", "Cash"
    );
    for trade in trades {
        let _ = writeln!(
            out,
            "{:<12} {:<6} {:>12} {:>14} {:>14} {:>16}",
            trade.date.to_string(),
            trade.action.to_string(),
            format_money(trade.price),
            shares(trade.shares, policy),
            shares(trade.shares_after, policy),
            format_money(trade.cash_after),
        );
    }
}

impl ReportPort for TextReport {
    fn render_backtest(&self, report: &BacktestReport) -> Result<String, MacrossError> {
        let run = &report.run;
        let strategy = &run.strategy;
        let mut out = String::new();

        banner(&mut out, "TRADING BOT PERFORMANCE");
        let _ = writeln!(
            out,
            "Ticker:                {} ({} trading days, {} to {})",
            report.ticker, report.trading_days, report.start_date, report.end_date
        );
        let _ = writeln!(
            out,
            "Strategy:              {} (short {}, long {}, {} shares)",
            strategy.name, strategy.short_window, strategy.long_window, strategy.policy
        );
        render_warnings(&mut out, run);
        out.push('\n');
        let _ = writeln!(out, "Total Trades Executed: {}", run.trade_counts.total);
        let _ = writeln!(out, "  Buy Orders:  {}", run.trade_counts.buys);
        let _ = writeln!(out, "  Sell Orders: {}", run.trade_counts.sells);
        out.push('\n');
        let _ = writeln!(out, "Initial Capital:       {}", format_money(report.initial_capital));
        let _ = writeln!(
            out,
            "Final Portfolio Value: {}",
            format_money(run.performance.final_value)
        );
        let _ = writeln!(
            out,
            "Total Return:          {} ({})",
            format_money(run.performance.absolute_return),
            format_pct(run.performance.return_pct)
        );
        let _ = writeln!(
            out,
            "Max Drawdown:          {:.2}%",
            run.performance.max_drawdown * 100.0
        );
        out.push('\n');

        banner(&mut out, "COMPARISON: BOT vs BUY & HOLD");
        let cmp = &report.comparison;
        let _ = writeln!(
            out,
            "Bot Strategy Return:      {} ({})",
            format_money(cmp.bot_return),
            format_pct(cmp.bot_return_pct)
        );
        let _ = writeln!(
            out,
            "Buy & Hold Return:        {} ({})",
            format_money(cmp.baseline_return),
            format_pct(cmp.baseline_return_pct)
        );
        let _ = writeln!(out, "Difference:               {}", format_money(cmp.difference));
        rule(&mut out);
        if cmp.outperformed {
            out.push_str("Bot OUTPERFORMED buy & hold strategy!\n");
        } else {
            out.push_str("Buy & hold performed better this time.\n");
        }

        let trades = &run.simulation.trades;
        if !trades.is_empty() {
            let recent = &trades[trades.len().saturating_sub(RECENT_TRADES)..];
            let _ = writeln!(out, "\nRecent Trades (last {}):", recent.len());
            render_trades(&mut out, recent, strategy.policy);
        }

        Ok(out)
    }

    fn render_comparison(&self, report: &ComparisonReport) -> Result<String, MacrossError> {
        let mut out = String::new();

        banner(&mut out, "STRATEGY COMPARISON RESULTS");
        let _ = writeln!(
            out,
            "Ticker:          {} ({} trading days, {} to {})",
            report.ticker, report.trading_days, report.start_date, report.end_date
        );
        let _ = writeln!(out, "Initial Capital: {}", format_money(report.initial_capital));
        for run in &report.runs {
            render_warnings(&mut out, run);
        }
        out.push('\n');

        // Buy-and-hold has no run; strategies follow in input order.
        let runs = std::iter::once(None).chain(report.runs.iter().map(Some));
        for (i, (summary, run)) in report.summaries().iter().zip(runs).enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, summary.name);
            let _ = writeln!(out, "   Final Value: {}", format_money(summary.final_value));
            let _ = writeln!(out, "   Return:      {}", format_pct(summary.return_pct));
            let _ = writeln!(out, "   Drawdown:    {:.2}%", summary.max_drawdown * 100.0);
            if let Some(run) = run {
                let _ = writeln!(out, "   Trades:      {}", run.trade_counts.total);
            }
            out.push('\n');
        }
        rule(&mut out);

        let _ = writeln!(
            out,
            "BEST STRATEGY: {} with {} return",
            report.best.name,
            format_pct(report.best.return_pct)
        );
        Ok(out)
    }
}
