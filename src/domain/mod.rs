//! Core domain types and logic: averages, signals, simulation, metrics.

pub mod price;
pub mod moving_average;
pub mod signal;
pub mod portfolio;
pub mod execution;
pub mod strategy;
pub mod backtest;
pub mod metrics;
pub mod config_validation;
pub mod error;
