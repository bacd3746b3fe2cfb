//! Portfolio state and value tracking for a single instrument.

use chrono::NaiveDate;
use serde::Serialize;

use super::execution::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioState {
    pub cash: f64,
    pub shares: f64,
}

impl PortfolioState {
    /// cash + shares * price
    pub fn value_at(&self, price: f64) -> f64 {
        self.cash + self.shares * price
    }

    pub fn is_long(&self) -> bool {
        self.shares > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub cash: f64,
    pub shares: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Portfolio {
    pub cash: f64,
    pub shares: f64,
    pub initial_capital: f64,
    pub trades: Vec<Trade>,
    pub value_curve: Vec<ValuePoint>,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Portfolio {
            cash: initial_capital,
            shares: 0.0,
            initial_capital,
            trades: Vec::new(),
            value_curve: Vec::new(),
        }
    }

    pub fn state(&self) -> PortfolioState {
        PortfolioState {
            cash: self.cash,
            shares: self.shares,
        }
    }

    pub fn record_trade(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    /// Mark the current holdings to `close` and append the day's value.
    pub fn record_value(&mut self, date: NaiveDate, close: f64) -> f64 {
        let value = self.state().value_at(close);
        self.value_curve.push(ValuePoint {
            date,
            cash: self.cash,
            shares: self.shares,
            value,
        });
        value
    }
}
