//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "
[data]
dir = ./data

[app]
tickers = AAPL,MSFT,IBM
default_window_days = 30
";

    #[test]
    fn from_string_parses_config() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("app", "tickers"),
            Some("AAPL,MSFT,IBM".to_string())
        );
        assert_eq!(adapter.get_string("data", "dir"), Some("./data".to_string()));
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_string("app", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("app", "default_window_days", 0), 30);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.get_int("app", "missing", 42), 42);
    }

    #[test]
    fn from_file_reads_from_disk() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SAMPLE).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("data", "dir"), Some("./data".to_string()));
    }

    #[test]
    fn from_file_fails_on_missing_path() {
        assert!(FileConfigAdapter::from_file("/nonexistent/statchart.ini").is_err());
    }
}
