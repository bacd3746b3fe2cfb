//! Yahoo Finance market data adapter.
//!
//! Fetches daily closes from Yahoo's v8 chart API with a blocking client.
//! Yahoo has no official API; an unknown symbol comes back as a "Not Found"
//! chart error, which is reported as an empty series so the caller sees
//! `EmptyData` for the ticker.

use crate::domain::error::MacrossError;
use crate::domain::price::PricePoint;
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

pub struct YahooAdapter {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooAdapter {
    pub fn new() -> Result<Self, MacrossError> {
        Self::with_base_url("https://query2.finance.yahoo.com")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, MacrossError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| MacrossError::Data {
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let end_ts = end
            .succ_opt()
            .unwrap_or(end)
            .and_time(chrono::NaiveTime::MIN)
            .and_utc()
            .timestamp();
        format!(
            "{}/v8/finance/chart/{ticker}?period1={start_ts}&period2={end_ts}&interval=1d",
            self.base_url
        )
    }
}

fn parse_response(resp: ChartResponse) -> Result<Vec<PricePoint>, MacrossError> {
    let Some(results) = resp.chart.result else {
        return match resp.chart.error {
            Some(err) if err.code == "Not Found" => Ok(Vec::new()),
            Some(err) => Err(MacrossError::Data {
                reason: format!("{}: {}", err.code, err.description),
            }),
            None => Ok(Vec::new()),
        };
    };

    let Some(data) = results.into_iter().next() else {
        return Ok(Vec::new());
    };
    let timestamps = data.timestamp.unwrap_or_default();
    let closes = data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = chrono::DateTime::from_timestamp(ts, 0)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| MacrossError::Data {
                reason: format!("invalid timestamp: {ts}"),
            })?;
        // Holidays and halted days come back with a null close.
        if let Some(close) = closes.get(i).copied().flatten() {
            points.push(PricePoint { date, close });
        }
    }

    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);
    Ok(points)
}

impl MarketDataPort for YahooAdapter {
    fn fetch_closes(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, MacrossError> {
        let url = self.chart_url(ticker, start_date, end_date);
        tracing::debug!(%url, "requesting chart data");

        let resp = self.client.get(&url).send().map_err(|e| MacrossError::Data {
            reason: format!("request for {ticker} failed: {e}"),
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(MacrossError::Data {
                reason: format!("HTTP {status} for {ticker}"),
            });
        }

        let chart: ChartResponse = resp.json().map_err(|e| MacrossError::Data {
            reason: format!("failed to parse response for {ticker}: {e}"),
        })?;

        let points = parse_response(chart)?;
        Ok(points
            .into_iter()
            .filter(|p| p.date >= start_date && p.date <= end_date)
            .collect())
    }
}
