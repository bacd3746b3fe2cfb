//! INI file configuration adapter.

use crate::domain::error::MacrossError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MacrossError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| MacrossError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// A configuration with no sections; every lookup falls back to defaults.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = r#"
[backtest]
ticker = MSFT
initial_capital = 25000.5
skip_warmup = no

[strategy]
name = Fast cross
short_window = 10
long_window = 30
policy = fractional
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("backtest", "ticker"), Some("MSFT".to_string()));
        assert_eq!(
            adapter.get_string("strategy", "name"),
            Some("Fast cross".to_string())
        );
        assert_eq!(
            adapter.get_string("strategy", "policy"),
            Some("fractional".to_string())
        );
    }

    #[test]
    fn typed_getters() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("strategy", "short_window", 0), 10);
        assert_eq!(adapter.get_double("backtest", "initial_capital", 0.0), 25000.5);
        assert!(!adapter.get_bool("backtest", "skip_warmup", true));
    }

    #[test]
    fn missing_keys_use_defaults() {
        let adapter = FileConfigAdapter::from_string("[backtest]\n").unwrap();
        assert_eq!(adapter.get_string("backtest", "ticker"), None);
        assert_eq!(adapter.get_string("nope", "ticker"), None);
        assert_eq!(adapter.get_int("strategy", "long_window", 50), 50);
        assert_eq!(adapter.get_double("backtest", "initial_capital", 99.9), 99.9);
        assert!(adapter.get_bool("backtest", "skip_warmup", true));
    }

    #[test]
    fn non_numeric_values_use_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[strategy]\nshort_window = abc\n[backtest]\ninitial_capital = lots\n")
                .unwrap();
        assert_eq!(adapter.get_int("strategy", "short_window", 20), 20);
        assert_eq!(adapter.get_double("backtest", "initial_capital", 1.5), 1.5);
    }

    #[test]
    fn bool_spellings() {
        let adapter = FileConfigAdapter::from_string(
            "[backtest]\na = true\nb = yes\nc = 1\nd = false\ne = no\nf = 0\ng = maybe\n",
        )
        .unwrap();
        assert!(adapter.get_bool("backtest", "a", false));
        assert!(adapter.get_bool("backtest", "b", false));
        assert!(adapter.get_bool("backtest", "c", false));
        assert!(!adapter.get_bool("backtest", "d", true));
        assert!(!adapter.get_bool("backtest", "e", true));
        assert!(!adapter.get_bool("backtest", "f", true));
        assert!(adapter.get_bool("backtest", "g", true));
    }

    #[test]
    fn empty_adapter_has_no_values() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("backtest", "ticker"), None);
        assert_eq!(adapter.get_int("strategy", "short_window", 20), 20);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[data]\ncsv_dir = /tmp/prices\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "csv_dir"),
            Some("/tmp/prices".to_string())
        );
    }

    #[test]
    fn from_file_missing_file_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/macross.ini");
        assert!(matches!(result, Err(MacrossError::ConfigParse { .. })));
    }
}
