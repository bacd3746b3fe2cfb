//! Market data access port trait.

use crate::domain::error::MacrossError;
use crate::domain::price::PricePoint;
use chrono::NaiveDate;

pub trait MarketDataPort {
    /// Daily closes for `ticker` within `[start_date, end_date]`, ascending.
    /// An unknown ticker yields an empty vector rather than an error.
    fn fetch_closes(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, MacrossError>;
}
