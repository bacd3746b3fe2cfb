//! JSON report adapter implementing ReportPort.

use serde::Serialize;

use crate::domain::backtest::{BacktestReport, ComparisonReport};
use crate::domain::error::MacrossError;
use crate::ports::report_port::ReportPort;

pub struct JsonReport;

fn to_json<T: Serialize>(value: &T) -> Result<String, MacrossError> {
    serde_json::to_string_pretty(value).map_err(|e| MacrossError::Report {
        reason: format!("failed to serialize report: {e}"),
    })
}

impl ReportPort for JsonReport {
    fn render_backtest(&self, report: &BacktestReport) -> Result<String, MacrossError> {
        to_json(report)
    }

    fn render_comparison(&self, report: &ComparisonReport) -> Result<String, MacrossError> {
        to_json(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backtest::{run_backtest, run_comparison, BacktestConfig};
    use crate::domain::execution::DeploymentPolicy;
    use crate::domain::price::{PricePoint, PriceSeries};
    use crate::domain::strategy::StrategyConfig;
    use chrono::NaiveDate;

    fn prices() -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let closes = [20.0, 19.0, 18.0, 19.5, 21.0, 22.0, 21.0, 19.0];
        PriceSeries::new(
            "JSON",
            closes
                .iter()
                .enumerate()
                .map(|(i, &c)| PricePoint::new(start + chrono::Duration::days(i as i64), c))
                .collect(),
        )
        .unwrap()
    }

    fn config() -> BacktestConfig {
        BacktestConfig {
            ticker: "JSON".into(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            initial_capital: 500.0,
            skip_warmup: false,
        }
    }

    #[test]
    fn backtest_json_has_expected_fields() {
        let strategy = StrategyConfig::crossover(2, 3, DeploymentPolicy::WholeShares);
        let report = run_backtest(&config(), &prices(), &strategy).unwrap();
        let json = JsonReport.render_backtest(&report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ticker"], "JSON");
        assert_eq!(value["initial_capital"], 500.0);
        assert_eq!(value["start_date"], "2024-05-01");
        assert_eq!(value["run"]["strategy"]["policy"], "WholeShares");
        assert_eq!(value["buy_and_hold"]["name"], "Buy & Hold");
        assert!(value["comparison"]["difference"].is_number());
        assert_eq!(
            value["run"]["simulation"]["value_curve"].as_array().unwrap().len(),
            8
        );
    }

    #[test]
    fn comparison_json_names_best() {
        let strategies = vec![StrategyConfig::crossover(2, 3, DeploymentPolicy::Fractional)];
        let report = run_comparison(&config(), &prices(), &strategies).unwrap();
        let json = JsonReport.render_comparison(&report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["runs"].as_array().unwrap().len(), 1);
        assert_eq!(value["best"]["name"], report.best.name.as_str());
    }
}
