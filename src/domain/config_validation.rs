//! Application configuration validation.
//!
//! Checks every config field before any adapter is built from it.

use crate::domain::error::StatchartError;
use crate::ports::config_port::ConfigPort;
use std::collections::HashSet;

pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_CHART_WIDTH: i64 = 640;
pub const DEFAULT_CHART_HEIGHT: i64 = 360;

pub fn validate_app_config(config: &dyn ConfigPort) -> Result<(), StatchartError> {
    validate_data_dir(config)?;
    validate_tickers(config)?;
    validate_window(config)?;
    validate_chart_dims(config)?;
    Ok(())
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), StatchartError> {
    match config.get_string("data", "dir") {
        Some(dir) if !dir.trim().is_empty() => Ok(()),
        Some(_) => Err(StatchartError::ConfigInvalid {
            section: "data".to_string(),
            key: "dir".to_string(),
            reason: "dir must not be empty".to_string(),
        }),
        None => Err(StatchartError::ConfigMissing {
            section: "data".to_string(),
            key: "dir".to_string(),
        }),
    }
}

fn validate_tickers(config: &dyn ConfigPort) -> Result<(), StatchartError> {
    let value = config
        .get_string("app", "tickers")
        .ok_or_else(|| StatchartError::ConfigMissing {
            section: "app".to_string(),
            key: "tickers".to_string(),
        })?;
    parse_tickers(&value)?;
    Ok(())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), StatchartError> {
    let value = config.get_int("app", "default_window_days", DEFAULT_WINDOW_DAYS);
    if value <= 0 {
        return Err(StatchartError::ConfigInvalid {
            section: "app".to_string(),
            key: "default_window_days".to_string(),
            reason: "default_window_days must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_chart_dims(config: &dyn ConfigPort) -> Result<(), StatchartError> {
    for key in ["width", "height"] {
        let default = if key == "width" {
            DEFAULT_CHART_WIDTH
        } else {
            DEFAULT_CHART_HEIGHT
        };
        let value = config.get_int("chart", key, default);
        if value <= 0 {
            return Err(StatchartError::ConfigInvalid {
                section: "chart".to_string(),
                key: key.to_string(),
                reason: format!("{key} must be positive"),
            });
        }
    }
    Ok(())
}

/// Parses a comma-separated ticker list: trimmed, uppercased, no empty
/// tokens, no duplicates.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, StatchartError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(StatchartError::ConfigInvalid {
                section: "app".to_string(),
                key: "tickers".to_string(),
                reason: "empty ticker in list".to_string(),
            });
        }
        let ticker = trimmed.to_uppercase();
        if !seen.insert(ticker.clone()) {
            return Err(StatchartError::ConfigInvalid {
                section: "app".to_string(),
                key: "tickers".to_string(),
                reason: format!("duplicate ticker: {ticker}"),
            });
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    const VALID_INI: &str = "
[data]
dir = ./data

[app]
tickers = AAPL,MSFT,IBM
default_window_days = 30

[chart]
width = 640
height = 360
";

    #[test]
    fn valid_config_passes() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        assert!(validate_app_config(&adapter).is_ok());
    }

    #[test]
    fn missing_data_dir_fails() {
        let adapter = FileConfigAdapter::from_string("[app]\ntickers = AAPL\n").unwrap();
        let err = validate_app_config(&adapter).unwrap_err();
        assert!(matches!(err, StatchartError::ConfigMissing { .. }));
    }

    #[test]
    fn missing_tickers_fails() {
        let adapter = FileConfigAdapter::from_string("[data]\ndir = ./data\n").unwrap();
        let err = validate_app_config(&adapter).unwrap_err();
        assert!(matches!(err, StatchartError::ConfigMissing { .. }));
    }

    #[test]
    fn non_positive_window_fails() {
        let ini = "[data]\ndir = ./data\n[app]\ntickers = AAPL\ndefault_window_days = 0\n";
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let err = validate_app_config(&adapter).unwrap_err();
        assert!(matches!(err, StatchartError::ConfigInvalid { .. }));
    }

    #[test]
    fn non_positive_chart_dims_fail() {
        let ini = "[data]\ndir = ./data\n[app]\ntickers = AAPL\n[chart]\nwidth = -1\n";
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let err = validate_app_config(&adapter).unwrap_err();
        assert!(matches!(err, StatchartError::ConfigInvalid { .. }));
    }

    #[test]
    fn parse_tickers_uppercases_and_trims() {
        let tickers = parse_tickers(" aapl , msft ").unwrap();
        assert_eq!(tickers, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }

    #[test]
    fn parse_tickers_rejects_empty_token() {
        assert!(parse_tickers("AAPL,,MSFT").is_err());
    }

    #[test]
    fn parse_tickers_rejects_duplicates() {
        assert!(parse_tickers("AAPL,aapl").is_err());
    }
}
