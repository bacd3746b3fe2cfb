//! Simple moving average over daily closes.

use chrono::NaiveDate;
use serde::Serialize;

use super::price::PricePoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AveragePoint {
    pub date: NaiveDate,
    /// `None` until the window has filled.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageSeries {
    pub window: usize,
    pub values: Vec<AveragePoint>,
}

impl MovingAverageSeries {
    /// Index of the first present value, if any.
    pub fn first_present(&self) -> Option<usize> {
        self.values.iter().position(|p| p.value.is_some())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One output per input point; the mean of closes `[i - window + 1, i]`
/// once `i >= window - 1`, absent before. A zero window or one longer than
/// the series yields an all-absent series.
pub fn simple_moving_average(prices: &[PricePoint], window: usize) -> MovingAverageSeries {
    let mut values: Vec<AveragePoint> = prices
        .iter()
        .map(|p| AveragePoint {
            date: p.date,
            value: None,
        })
        .collect();

    if window > 0 && prices.len() >= window {
        let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();
        for (offset, slice) in closes.windows(window).enumerate() {
            let mean = slice.iter().sum::<f64>() / window as f64;
            values[offset + window - 1].value = Some(mean);
        }
    }

    MovingAverageSeries { window, values }
}
