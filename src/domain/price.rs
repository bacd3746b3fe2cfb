//! Daily closing prices for a single instrument.

use chrono::NaiveDate;
use serde::Serialize;

use super::error::MacrossError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        PricePoint { date, close }
    }
}

/// A non-empty, strictly date-ascending series of closes.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, points: Vec<PricePoint>) -> Result<Self, MacrossError> {
        let ticker = ticker.into();
        if points.is_empty() {
            return Err(MacrossError::EmptyData { ticker });
        }

        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(MacrossError::InvalidPriceData {
                    reason: format!("close {} on {} is not a positive price", point.close, point.date),
                });
            }
        }

        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(MacrossError::InvalidPriceData {
                reason: format!(
                    "dates must be strictly ascending ({} followed by {})",
                    pair[0].date, pair[1].date
                ),
            });
        }

        Ok(PriceSeries { ticker, points })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }
}
