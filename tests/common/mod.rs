#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use macross::domain::backtest::BacktestConfig;
use macross::domain::error::MacrossError;
pub use macross::domain::price::PricePoint;
use macross::domain::price::PriceSeries;
use macross::ports::data_port::MarketDataPort;
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PricePoint>>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<(String, NaiveDate, NaiveDate)>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_closes(mut self, ticker: &str, points: Vec<PricePoint>) -> Self {
        self.data.insert(ticker.to_string(), points);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockDataPort {
    fn fetch_closes(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, MacrossError> {
        self.requests
            .borrow_mut()
            .push((ticker.to_string(), start_date, end_date));
        if let Some(reason) = self.errors.get(ticker) {
            return Err(MacrossError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(ticker)
            .map(|points| {
                points
                    .iter()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// One close per consecutive calendar day starting at `start`.
pub fn make_closes(start: &str, closes: &[f64]) -> Vec<PricePoint> {
    let start = date(start);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(start + Duration::days(i as i64), close))
        .collect()
}

pub fn make_series(ticker: &str, start: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(ticker, make_closes(start, closes)).unwrap()
}

/// Flat at `low` for `flat_days`, then flat at `high` for `high_days`.
pub fn step_closes(low: f64, flat_days: usize, high: f64, high_days: usize) -> Vec<f64> {
    std::iter::repeat(low)
        .take(flat_days)
        .chain(std::iter::repeat(high).take(high_days))
        .collect()
}

/// Rises linearly then falls linearly; produces one golden and one death cross.
pub fn rise_and_fall(days_up: usize, days_down: usize) -> Vec<f64> {
    let up = (0..days_up).map(|i| 50.0 + i as f64);
    let peak = 50.0 + days_up as f64;
    let down = (0..days_down).map(move |i| peak - i as f64 * 1.5);
    std::iter::repeat(50.0).take(30).chain(up).chain(down).collect()
}

pub fn make_backtest_config(ticker: &str, capital: f64) -> BacktestConfig {
    BacktestConfig {
        ticker: ticker.to_string(),
        start_date: date("2020-01-01"),
        end_date: date("2030-12-31"),
        initial_capital: capital,
        skip_warmup: false,
    }
}
