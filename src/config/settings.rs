//! User settings for ledgerbook
//!
//! Persisted as JSON next to the data directory. Every field has a serde
//! default so older config files keep loading.

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::BookPaths;
use crate::error::BookError;

/// User settings for ledgerbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for terminal output (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Number of vouchers shown by `voucher recent` when no limit is given
    #[serde(default = "default_recent_voucher_limit")]
    pub recent_voucher_limit: usize,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    String::new()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_voucher_limit() -> usize {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_voucher_limit: default_recent_voucher_limit(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &BookPaths) -> Result<Self, BookError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BookError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| BookError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BookPaths) -> Result<(), BookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BookError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BookError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format a date for display; an unusable `date_format` falls back to ISO
    pub fn format_date(&self, date: NaiveDate) -> String {
        let valid = !StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if valid {
            date.format(&self.date_format).to_string()
        } else {
            date.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.recent_voucher_limit, 10);
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_load_missing_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            currency_symbol: "Rs ".into(),
            recent_voucher_limit: 25,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"recent_voucher_limit": 3}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.recent_voucher_limit, 3);
        assert_eq!(loaded.log_level, "warn");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut settings = Settings::default();
        assert_eq!(settings.format_date(date), "2024-01-10");

        settings.date_format = "%d/%m/%Y".into();
        assert_eq!(settings.format_date(date), "10/01/2024");

        settings.date_format = "%Q".into();
        assert_eq!(settings.format_date(date), "2024-01-10");
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BookPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let result = Settings::load_or_create(&paths);
        assert!(matches!(result, Err(BookError::Config(_))));
    }
}
