//! Crossover strategy configuration.

use serde::Serialize;
use std::str::FromStr;

use super::error::MacrossError;
use super::execution::DeploymentPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyConfig {
    pub name: String,
    pub short_window: usize,
    pub long_window: usize,
    pub policy: DeploymentPolicy,
}

impl StrategyConfig {
    /// A strategy named after its windows, e.g. `MA 20/50`.
    pub fn crossover(short_window: usize, long_window: usize, policy: DeploymentPolicy) -> Self {
        StrategyConfig {
            name: format!("MA {}/{}", short_window, long_window),
            short_window,
            long_window,
            policy,
        }
    }

    pub fn validate(&self) -> Result<(), MacrossError> {
        if self.short_window == 0 || self.long_window == 0 {
            return Err(MacrossError::invalid_configuration(format!(
                "{}: moving-average windows must be positive",
                self.name
            )));
        }
        if self.short_window >= self.long_window {
            return Err(MacrossError::invalid_configuration(format!(
                "{}: short window ({}) must be less than long window ({})",
                self.name, self.short_window, self.long_window
            )));
        }
        Ok(())
    }
}

/// A `short/long` window pair such as `20/50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPair {
    pub short: usize,
    pub long: usize,
}

impl FromStr for WindowPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (short, long) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| format!("'{}' is not a short/long window pair", s.trim()))?;
        let short = short
            .trim()
            .parse()
            .map_err(|_| format!("invalid short window '{}'", short.trim()))?;
        let long = long
            .trim()
            .parse()
            .map_err(|_| format!("invalid long window '{}'", long.trim()))?;
        Ok(WindowPair { short, long })
    }
}

/// Parse a comma-separated list of window pairs, e.g. `20/50, 10/30`.
pub fn parse_window_pairs(input: &str) -> Result<Vec<WindowPair>, String> {
    let pairs = input
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(str::parse)
        .collect::<Result<Vec<WindowPair>, _>>()?;
    if pairs.is_empty() {
        return Err("no window pairs given".to_string());
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossover_names_by_windows() {
        let s = StrategyConfig::crossover(20, 50, DeploymentPolicy::WholeShares);
        assert_eq!(s.name, "MA 20/50");
        assert_eq!(s.short_window, 20);
        assert_eq!(s.long_window, 50);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn short_not_below_long_is_invalid() {
        let s = StrategyConfig::crossover(50, 50, DeploymentPolicy::Fractional);
        assert!(matches!(
            s.validate(),
            Err(MacrossError::InvalidConfiguration { .. })
        ));
        let s = StrategyConfig::crossover(60, 50, DeploymentPolicy::Fractional);
        assert!(s.validate().is_err());
    }

    #[test]
    fn zero_window_is_invalid() {
        let s = StrategyConfig::crossover(0, 50, DeploymentPolicy::Fractional);
        assert!(s.validate().is_err());
    }

    #[test]
    fn parses_window_pair_list() {
        let pairs = parse_window_pairs("20/50, 10/30").unwrap();
        assert_eq!(
            pairs,
            vec![
                WindowPair { short: 20, long: 50 },
                WindowPair { short: 10, long: 30 }
            ]
        );
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_window_pairs("20-50").is_err());
        assert!(parse_window_pairs("a/50").is_err());
        assert!(parse_window_pairs(" , ").is_err());
    }
}
