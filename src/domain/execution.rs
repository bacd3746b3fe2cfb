//! Trade execution for an all-in/all-out long-only position.
//!
//! Entries deploy all available cash at the day's close, exits liquidate the
//! whole position. Requests that cannot act (no cash to deploy, nothing to
//! sell, position already open) are no-ops rather than errors.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::portfolio::Portfolio;

/// How an entry converts cash into shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DeploymentPolicy {
    /// `floor(cash / price)` shares; the remainder stays as idle cash.
    #[default]
    WholeShares,
    /// `cash / price` shares; cash drops to zero.
    Fractional,
}

impl fmt::Display for DeploymentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentPolicy::WholeShares => write!(f, "whole"),
            DeploymentPolicy::Fractional => write!(f, "fractional"),
        }
    }
}

impl FromStr for DeploymentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whole" | "whole_shares" | "whole-shares" => Ok(DeploymentPolicy::WholeShares),
            "fractional" => Ok(DeploymentPolicy::Fractional),
            other => Err(format!("unknown policy '{other}' (expected whole or fractional)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

/// An executed trade. `shares` is the quantity traded; the `_after` fields
/// are the holdings once the trade settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub action: TradeAction,
    pub price: f64,
    pub shares: f64,
    pub cash_after: f64,
    pub shares_after: f64,
}

impl Trade {
    pub fn notional(&self) -> f64 {
        self.shares * self.price
    }

    /// Signed change in cash caused by this trade.
    pub fn cash_delta(&self) -> f64 {
        match self.action {
            TradeAction::Buy => -self.notional(),
            TradeAction::Sell => self.notional(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryResult {
    Entered(Trade),
    NoCash,
    AlreadyLong,
    /// Whole-share sizing could not afford a single share.
    InsufficientCapital,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExitResult {
    Exited(Trade),
    NoPosition,
}

/// Deploy all cash into shares at `price`.
pub fn enter_long(
    portfolio: &mut Portfolio,
    date: NaiveDate,
    price: f64,
    policy: DeploymentPolicy,
) -> EntryResult {
    if portfolio.shares > 0.0 {
        return EntryResult::AlreadyLong;
    }
    if portfolio.cash <= 0.0 {
        return EntryResult::NoCash;
    }

    let quantity = match policy {
        DeploymentPolicy::WholeShares => (portfolio.cash / price).floor(),
        DeploymentPolicy::Fractional => portfolio.cash / price,
    };
    if quantity <= 0.0 {
        return EntryResult::InsufficientCapital;
    }

    portfolio.cash = match policy {
        DeploymentPolicy::WholeShares => (portfolio.cash - quantity * price).max(0.0),
        DeploymentPolicy::Fractional => 0.0,
    };
    portfolio.shares = quantity;

    let trade = Trade {
        date,
        action: TradeAction::Buy,
        price,
        shares: quantity,
        cash_after: portfolio.cash,
        shares_after: portfolio.shares,
    };
    portfolio.record_trade(trade);
    EntryResult::Entered(trade)
}

/// Liquidate the whole position at `price`.
pub fn exit_long(portfolio: &mut Portfolio, date: NaiveDate, price: f64) -> ExitResult {
    if portfolio.shares <= 0.0 {
        return ExitResult::NoPosition;
    }

    let quantity = portfolio.shares;
    portfolio.cash += quantity * price;
    portfolio.shares = 0.0;

    let trade = Trade {
        date,
        action: TradeAction::Sell,
        price,
        shares: quantity,
        cash_after: portfolio.cash,
        shares_after: 0.0,
    };
    portfolio.record_trade(trade);
    ExitResult::Exited(trade)
}
