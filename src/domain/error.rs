//! Domain error types.

/// Top-level error type for macross.
#[derive(Debug, thiserror::Error)]
pub enum MacrossError {
    #[error("no price data returned for {ticker}")]
    EmptyData { ticker: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("invalid price data: {reason}")]
    InvalidPriceData { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MacrossError {
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        MacrossError::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            MacrossError::Io(_) | MacrossError::Report { .. } => 1,
            MacrossError::InvalidConfiguration { .. }
            | MacrossError::ConfigParse { .. }
            | MacrossError::ConfigMissing { .. }
            | MacrossError::ConfigInvalid { .. } => 2,
            MacrossError::Data { .. } => 3,
            MacrossError::EmptyData { .. } | MacrossError::InvalidPriceData { .. } => 5,
        }
    }
}

impl From<&MacrossError> for std::process::ExitCode {
    fn from(err: &MacrossError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_message_names_ticker() {
        let err = MacrossError::EmptyData {
            ticker: "ZZZZ".into(),
        };
        assert_eq!(err.to_string(), "no price data returned for ZZZZ");
    }

    #[test]
    fn config_invalid_message() {
        let err = MacrossError::ConfigInvalid {
            section: "strategy".into(),
            key: "policy".into(),
            reason: "expected whole or fractional".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [strategy] policy: expected whole or fractional"
        );
    }

    #[test]
    fn exit_codes_group_by_category() {
        let config = MacrossError::invalid_configuration("initial capital must be positive");
        assert_eq!(config.exit_code(), 2);

        let data = MacrossError::Data {
            reason: "timeout".into(),
        };
        assert_eq!(data.exit_code(), 3);

        let empty = MacrossError::EmptyData {
            ticker: "X".into(),
        };
        assert_eq!(empty.exit_code(), 5);

        let io = MacrossError::from(std::io::Error::other("disk"));
        assert_eq!(io.exit_code(), 1);
    }
}
