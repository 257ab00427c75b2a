//! Configuration file support for recur.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/recur/config.toml`.

use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: RuleDefaults,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Values filled into a rule draft when the form leaves a field empty
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleDefaults {
    /// Sunday-first weekday index (0 = Sunday)
    #[serde(default = "default_weekday")]
    pub weekday: i64,

    #[serde(default = "default_interval_days")]
    pub interval_days: i64,

    /// 1..=4, or 5 for "last"
    #[serde(default = "default_month_position")]
    pub month_position: i64,

    #[serde(default = "default_day_of_month")]
    pub day_of_month: i64,
}

impl Default for RuleDefaults {
    fn default() -> Self {
        Self {
            weekday: default_weekday(),
            interval_days: default_interval_days(),
            month_position: default_month_position(),
            day_of_month: default_day_of_month(),
        }
    }
}

/// Output formatting configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    /// strftime-style format for plain-text date listings
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            preview_limit: default_preview_limit(),
        }
    }
}

// Default value functions
fn default_weekday() -> i64 {
    5
}

fn default_interval_days() -> i64 {
    7
}

fn default_month_position() -> i64 {
    1
}

fn default_day_of_month() -> i64 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".into()
}

fn default_preview_limit() -> usize {
    10
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        base.join("recur").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check that the configured defaults could themselves produce a rule
    pub fn validate(&self) -> Result<()> {
        let d = &self.defaults;
        if !(0..=6).contains(&d.weekday) {
            return Err(Error::Config(format!(
                "defaults.weekday must be 0-6, got {}",
                d.weekday
            )));
        }
        if d.interval_days < 1 {
            return Err(Error::Config(format!(
                "defaults.interval_days must be at least 1, got {}",
                d.interval_days
            )));
        }
        if !(1..=5).contains(&d.month_position) {
            return Err(Error::Config(format!(
                "defaults.month_position must be 1-5, got {}",
                d.month_position
            )));
        }
        if !(1..=31).contains(&d.day_of_month) {
            return Err(Error::Config(format!(
                "defaults.day_of_month must be 1-31, got {}",
                d.day_of_month
            )));
        }
        let date_format = &self.output.date_format;
        if date_format.trim().is_empty() {
            return Err(Error::Config("output.date_format must not be empty".into()));
        }
        if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::Config(format!(
                "output.date_format {:?} is not a valid strftime format",
                date_format
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.weekday, 5);
        assert_eq!(config.defaults.interval_days, 7);
        assert_eq!(config.defaults.month_position, 1);
        assert_eq!(config.defaults.day_of_month, 1);
        assert_eq!(config.output.date_format, "%Y-%m-%d");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.defaults, parsed.defaults);
        assert_eq!(config.output.preview_limit, parsed.output.preview_limit);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[defaults]
weekday = 0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.defaults.weekday, 0);
        assert_eq!(config.defaults.interval_days, 7); // default
        assert_eq!(config.output.preview_limit, 10); // default
    }

    #[test]
    fn test_validate_rejects_bad_defaults() {
        let mut config = Config::default();
        config.defaults.interval_days = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.defaults.month_position = 6;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unknown_strftime_specifier() {
        for bad in ["%Q", "day %!"] {
            let mut config = Config::default();
            config.output.date_format = bad.into();
            assert!(
                matches!(config.validate(), Err(Error::Config(_))),
                "{:?} should be rejected",
                bad
            );
        }

        let mut config = Config::default();
        config.output.date_format = "%d/%m/%Y (%a)".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_bad_date_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\ndate_format = \"%Q\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.defaults.day_of_month = 15;
        config.output.preview_limit = 3;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.day_of_month, 15);
        assert_eq!(loaded.output.preview_limit, 3);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nweekday = 9\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
