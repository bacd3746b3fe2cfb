//! CSV file market data adapter.
//!
//! Reads `{dir}/{TICKER}.csv`. Columns are located by header name, so both
//! a minimal `date,close` file and a full OHLCV export (`Date,Open,High,Low,
//! Close,Adj Close,Volume`) work.

use crate::domain::error::MacrossError;
use crate::domain::price::PricePoint;
use crate::ports::data_port::MarketDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize, MacrossError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| MacrossError::Data {
            reason: format!("missing {} column", name),
        })
}

impl MarketDataPort for CsvAdapter {
    fn fetch_closes(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, MacrossError> {
        let path = self.csv_path(ticker);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(|e| MacrossError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| MacrossError::Data {
            reason: format!("CSV header error: {}", e),
        })?;
        let date_col = column(headers, "date")?;
        let close_col = column(headers, "close")?;

        let mut points = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| MacrossError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                MacrossError::Data {
                    reason: format!("invalid date '{}': {}", date_str, e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            let close_str = record.get(close_col).unwrap_or_default().trim();
            // Exports leave the close blank on non-trading days.
            if close_str.is_empty() {
                continue;
            }
            let close: f64 = close_str.parse().map_err(|e| MacrossError::Data {
                reason: format!("invalid close value '{}' on {}: {}", close_str, date, e),
            })?;

            points.push(PricePoint { date, close });
        }

        points.sort_by_key(|p| p.date);
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let minimal = "date,close\n\
            2024-01-17,115.0\n\
            2024-01-15,105.0\n\
            2024-01-16,110.0\n";
        fs::write(path.join("BHP.csv"), minimal).unwrap();

        let export = "Date,Open,High,Low,Close,Adj Close,Volume\n\
            2024-02-01,10,11,9,10.5,10.1,1000\n\
            2024-02-02,,,,,,\n\
            2024-02-05,10.5,12,10,11.75,11.3,1200\n";
        fs::write(path.join("AAPL.csv"), export).unwrap();

        fs::write(path.join("BAD.csv"), "when,price\n2024-01-01,1.0\n").unwrap();

        (dir, path)
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn fetch_returns_sorted_closes() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter
            .fetch_closes("BHP", d(2024, 1, 1), d(2024, 1, 31))
            .unwrap();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, d(2024, 1, 15));
        assert_eq!(points[0].close, 105.0);
        assert_eq!(points[2].date, d(2024, 1, 17));
    }

    #[test]
    fn fetch_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter
            .fetch_closes("BHP", d(2024, 1, 16), d(2024, 1, 16))
            .unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].close, 110.0);
    }

    #[test]
    fn reads_full_export_close_column() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter
            .fetch_closes("AAPL", d(2024, 1, 1), d(2024, 12, 31))
            .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].close, 10.5);
        assert_eq!(points[1].close, 11.75);
    }

    #[test]
    fn unknown_ticker_is_empty() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let points = adapter
            .fetch_closes("XYZ", d(2024, 1, 1), d(2024, 1, 31))
            .unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn missing_columns_are_data_errors() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch_closes("BAD", d(2024, 1, 1), d(2024, 1, 31));
        assert!(matches!(result, Err(MacrossError::Data { .. })));
    }
}
