//! Configuration validation.
//!
//! Every key is optional; only values that are present are checked here.
//! Missing values fall back to defaults when the run settings are built.

use crate::domain::error::MacrossError;
use crate::domain::execution::DeploymentPolicy;
use crate::domain::strategy::parse_window_pairs;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    validate_ticker(config)?;
    validate_initial_capital(config)?;
    validate_dates(config)?;
    validate_lookback(config)?;
    validate_strategy_windows(config)?;
    validate_policy(config, "strategy")?;
    validate_policy(config, "compare")?;
    validate_compare_strategies(config)?;
    validate_data_source(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> MacrossError {
    MacrossError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_ticker(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    match config.get_string("backtest", "ticker") {
        Some(t) if t.trim().is_empty() => Err(invalid("backtest", "ticker", "ticker must not be empty")),
        _ => Ok(()),
    }
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    if config.get_string("backtest", "initial_capital").is_none() {
        return Ok(());
    }
    let value = config.get_double("backtest", "initial_capital", f64::NAN);
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(
            "backtest",
            "initial_capital",
            "initial_capital must be a positive number",
        ));
    }
    Ok(())
}

pub fn parse_date(value: &str, section: &str, field: &str) -> Result<NaiveDate, MacrossError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        invalid(
            section,
            field,
            format!("invalid {} format, expected YYYY-MM-DD", field),
        )
    })
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    let start = config
        .get_string("backtest", "start_date")
        .map(|s| parse_date(&s, "backtest", "start_date"))
        .transpose()?;
    let end = config
        .get_string("backtest", "end_date")
        .map(|s| parse_date(&s, "backtest", "end_date"))
        .transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(invalid(
                "backtest",
                "start_date",
                "start_date must be before end_date",
            ));
        }
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    if config.get_string("backtest", "lookback_days").is_none() {
        return Ok(());
    }
    if config.get_int("backtest", "lookback_days", 0) < 1 {
        return Err(invalid(
            "backtest",
            "lookback_days",
            "lookback_days must be a positive integer",
        ));
    }
    Ok(())
}

/// A window from `[strategy]`; present values must be integers.
pub fn strategy_window(config: &dyn ConfigPort, key: &str, default: i64) -> Result<i64, MacrossError> {
    let value = match config.get_string("strategy", key) {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid("strategy", key, format!("{} must be an integer, got '{}'", key, raw.trim())))?,
        None => default,
    };
    if value < 1 {
        return Err(invalid("strategy", key, format!("{} must be at least 1", key)));
    }
    Ok(value)
}

fn validate_strategy_windows(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    let short = strategy_window(config, "short_window", 20)?;
    let long = strategy_window(config, "long_window", 50)?;
    if short >= long {
        return Err(invalid(
            "strategy",
            "short_window",
            "short_window must be less than long_window",
        ));
    }
    Ok(())
}

fn validate_policy(config: &dyn ConfigPort, section: &str) -> Result<(), MacrossError> {
    if let Some(value) = config.get_string(section, "policy") {
        value
            .parse::<DeploymentPolicy>()
            .map_err(|reason| invalid(section, "policy", reason))?;
    }
    Ok(())
}

fn validate_compare_strategies(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    let Some(value) = config.get_string("compare", "strategies") else {
        return Ok(());
    };
    let pairs = parse_window_pairs(&value).map_err(|reason| invalid("compare", "strategies", reason))?;
    for pair in pairs {
        if pair.short == 0 || pair.short >= pair.long {
            return Err(invalid(
                "compare",
                "strategies",
                format!(
                    "{}/{}: short window must be positive and less than long window",
                    pair.short, pair.long
                ),
            ));
        }
    }
    Ok(())
}

fn validate_data_source(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    match config
        .get_string("data", "source")
        .map(|s| s.trim().to_lowercase())
        .as_deref()
    {
        None | Some("yahoo") => Ok(()),
        Some("csv") => match config.get_string("data", "csv_dir") {
            Some(dir) if !dir.trim().is_empty() => Ok(()),
            _ => Err(MacrossError::ConfigMissing {
                section: "data".to_string(),
                key: "csv_dir".to_string(),
            }),
        },
        Some(other) => Err(invalid(
            "data",
            "source",
            format!("unknown data source '{}' (expected yahoo or csv)", other),
        )),
    }
}
