//! Configuration validation.
//!
//! Checks the INI sections before any computation runs. Absent keys fall back
//! to defaults and are not errors.

use crate::domain::error::ReturnsError;
use crate::ports::config_port::ConfigPort;

pub fn validate_returns_config(config: &dyn ConfigPort) -> Result<(), ReturnsError> {
    validate_year_range(config, "returns")?;
    Ok(())
}

pub fn validate_trade_config(config: &dyn ConfigPort) -> Result<(), ReturnsError> {
    validate_spans(config)?;
    validate_positive(config, "trade", "units")?;
    validate_positive(config, "trade", "price_divisor")?;
    validate_non_negative(config, "trade", "expense_rate")?;
    validate_year_range(config, "trade")?;
    Ok(())
}

pub fn validate_control_config(config: &dyn ConfigPort) -> Result<(), ReturnsError> {
    validate_positive(config, "control", "units")?;
    validate_positive(config, "control", "price_divisor")?;
    validate_non_negative(config, "control", "expense_rate")?;
    validate_year_range(config, "control")?;
    Ok(())
}

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), ReturnsError> {
    validate_at_least_one(config, "simulation", "window_years")?;
    validate_at_least_one(config, "simulation", "purchase_times")?;
    validate_at_least_one(config, "simulation", "sample_size")?;
    validate_positive(config, "simulation", "units_per_purchase")?;
    validate_positive(config, "simulation", "price_divisor")?;
    validate_non_negative(config, "simulation", "expense_ratio")?;
    validate_year_range(config, "simulation")?;
    Ok(())
}

/// Runs every section check.
pub fn validate_all(config: &dyn ConfigPort) -> Result<(), ReturnsError> {
    validate_returns_config(config)?;
    validate_trade_config(config)?;
    validate_control_config(config)?;
    validate_simulation_config(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> ReturnsError {
    ReturnsError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_positive(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), ReturnsError> {
    let value = config.get_double(section, key, 1.0);
    if value <= 0.0 || value.is_nan() {
        return Err(invalid(section, key, &format!("{key} must be positive")));
    }
    Ok(())
}

fn validate_non_negative(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), ReturnsError> {
    let value = config.get_double(section, key, 0.0);
    if value < 0.0 || value.is_nan() {
        return Err(invalid(section, key, &format!("{key} must be non-negative")));
    }
    Ok(())
}

fn validate_at_least_one(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), ReturnsError> {
    let value = config.get_int(section, key, 1);
    if value < 1 {
        return Err(invalid(section, key, &format!("{key} must be at least 1")));
    }
    Ok(())
}

fn validate_spans(config: &dyn ConfigPort) -> Result<(), ReturnsError> {
    let fast = config.get_int("trade", "fast_span", 12);
    let slow = config.get_int("trade", "slow_span", 26);
    if fast < 1 {
        return Err(invalid("trade", "fast_span", "fast_span must be at least 1"));
    }
    if slow < 1 {
        return Err(invalid("trade", "slow_span", "slow_span must be at least 1"));
    }
    if fast >= slow {
        return Err(invalid(
            "trade",
            "fast_span",
            "fast_span must be shorter than slow_span",
        ));
    }
    Ok(())
}

fn validate_year_range(config: &dyn ConfigPort, section: &str) -> Result<(), ReturnsError> {
    let start = parse_year(config, section, "start_year")?;
    let end = parse_year(config, section, "end_year")?;
    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(invalid(
                section,
                "start_year",
                "start_year must be before end_year",
            ));
        }
    }
    Ok(())
}

fn parse_year(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<i32>, ReturnsError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| invalid(section, key, &format!("invalid {key}, expected a year"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn empty_config_uses_valid_defaults() {
        let config = make_config("");
        assert!(validate_all(&config).is_ok());
    }

    #[test]
    fn valid_full_config_passes() {
        let config = make_config(
            r#"
[returns]
start_year = 1951
end_year = 2024

[trade]
fast_span = 12
slow_span = 26
units = 20
price_divisor = 10
expense_rate = 0.00095
start_year = 1950
end_year = 2023

[control]
units = 20
expense_rate = 0.00095

[simulation]
window_years = 20
purchase_times = 10
sample_size = 30
units_per_purchase = 2
expense_ratio = 0.00095
reference_year = 2023
"#,
        );
        assert!(validate_all(&config).is_ok());
    }

    #[test]
    fn fast_span_must_be_shorter() {
        let config = make_config("[trade]\nfast_span = 26\nslow_span = 12\n");
        let err = validate_trade_config(&config).unwrap_err();
        assert!(matches!(err, ReturnsError::ConfigInvalid { key, .. } if key == "fast_span"));
    }

    #[test]
    fn zero_span_fails() {
        let config = make_config("[trade]\nfast_span = 0\n");
        let err = validate_trade_config(&config).unwrap_err();
        assert!(matches!(err, ReturnsError::ConfigInvalid { key, .. } if key == "fast_span"));
    }

    #[test]
    fn negative_expense_rate_fails() {
        let config = make_config("[trade]\nexpense_rate = -0.01\n");
        let err = validate_trade_config(&config).unwrap_err();
        assert!(matches!(err, ReturnsError::ConfigInvalid { key, .. } if key == "expense_rate"));
    }

    #[test]
    fn zero_price_divisor_fails() {
        let config = make_config("[control]\nprice_divisor = 0\n");
        let err = validate_control_config(&config).unwrap_err();
        assert!(matches!(err, ReturnsError::ConfigInvalid { key, .. } if key == "price_divisor"));
    }

    #[test]
    fn inverted_year_range_fails() {
        let config = make_config("[returns]\nstart_year = 2024\nend_year = 1951\n");
        let err = validate_returns_config(&config).unwrap_err();
        assert!(matches!(err, ReturnsError::ConfigInvalid { key, .. } if key == "start_year"));
    }

    #[test]
    fn non_numeric_year_fails() {
        let config = make_config("[control]\nend_year = soon\n");
        let err = validate_control_config(&config).unwrap_err();
        assert!(matches!(err, ReturnsError::ConfigInvalid { key, .. } if key == "end_year"));
    }

    #[test]
    fn sample_size_zero_fails() {
        let config = make_config("[simulation]\nsample_size = 0\n");
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(err, ReturnsError::ConfigInvalid { key, .. } if key == "sample_size"));
    }

    #[test]
    fn units_per_purchase_negative_fails() {
        let config = make_config("[simulation]\nunits_per_purchase = -2\n");
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(
            matches!(err, ReturnsError::ConfigInvalid { key, .. } if key == "units_per_purchase")
        );
    }
}
