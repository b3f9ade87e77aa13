//! INI file configuration adapter.

use crate::domain::error::ReturnsError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// Section/key lookups over a parsed INI file. Keys are case-insensitive.
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReturnsError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| ReturnsError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// An adapter with no sections; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    pub fn from_string(content: &str) -> Result<Self, ReturnsError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| ReturnsError::ConfigParse {
                file: "<inline>".into(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
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

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[trade]
fast_span = 12
slow_span = 26
expense_rate = 0.00095

[simulation]
reference_year = 2023
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(adapter.get_string("trade", "fast_span"), Some("12".to_string()));
        assert_eq!(adapter.get_int("simulation", "reference_year", 0), 2023);
        assert_eq!(adapter.get_double("trade", "expense_rate", 0.0), 0.00095);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[trade]\nunits = 20\n").unwrap();
        assert_eq!(adapter.get_string("trade", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[simulation]\nsample_size = abc\n").unwrap();
        assert_eq!(adapter.get_int("simulation", "sample_size", 30), 30);
        assert_eq!(adapter.get_int("simulation", "purchase_times", 10), 10);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[control]\nexpense_rate = not_a_number\n").unwrap();
        assert_eq!(adapter.get_double("control", "expense_rate", 0.5), 0.5);
    }

    #[test]
    fn get_bool_values() {
        let adapter = FileConfigAdapter::from_string(
            "[output]\na = true\nb = yes\nc = 1\nd = false\ne = no\nf = 0\n",
        )
        .unwrap();
        assert!(adapter.get_bool("output", "a", false));
        assert!(adapter.get_bool("output", "b", false));
        assert!(adapter.get_bool("output", "c", false));
        assert!(!adapter.get_bool("output", "d", true));
        assert!(!adapter.get_bool("output", "e", true));
        assert!(!adapter.get_bool("output", "f", true));
        assert!(adapter.get_bool("output", "missing", true));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[returns]\nstart_year = 1960\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("returns", "start_year", 1951), 1960);
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(
            result,
            Err(ReturnsError::ConfigParse { file, .. }) if file == "/nonexistent/path/config.ini"
        ));
    }

    #[test]
    fn empty_adapter_yields_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("trade", "units"), None);
        assert_eq!(adapter.get_double("trade", "units", 20.0), 20.0);
    }

    #[test]
    fn typed_year_and_count_lookups() {
        let adapter = FileConfigAdapter::from_string(
            "[simulation]\nreference_year = 2020\nsample_size = 30\nwindow_years = 99999999999\npurchase_times = -1\n",
        )
        .unwrap();
        assert_eq!(adapter.get_year("simulation", "reference_year", 2023).unwrap(), 2020);
        assert_eq!(adapter.get_year("simulation", "missing", 2023).unwrap(), 2023);
        assert_eq!(adapter.get_count("simulation", "sample_size", 1).unwrap(), 30);
        assert!(matches!(
            adapter.get_year("simulation", "window_years", 20),
            Err(ReturnsError::ConfigInvalid { key, .. }) if key == "window_years"
        ));
        assert!(matches!(
            adapter.get_count("simulation", "purchase_times", 10),
            Err(ReturnsError::ConfigInvalid { key, .. }) if key == "purchase_times"
        ));
    }
}
