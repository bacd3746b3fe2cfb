//! Report rendering port trait.

use crate::domain::backtest::{BacktestReport, ComparisonReport};
use crate::domain::error::MacrossError;

/// Port for turning backtest results into presentable output.
pub trait ReportPort {
    fn render_backtest(&self, report: &BacktestReport) -> Result<String, MacrossError>;

    fn render_comparison(&self, report: &ComparisonReport) -> Result<String, MacrossError>;
}
