use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::{
        errors::{FinanceError, Result},
        services::{
            query::DEFAULT_PAGE_SIZE, recurring_summary::DEFAULT_LOOKAHEAD_DAYS, BillCyclePolicy,
        },
        utils::{ensure_dir, PathResolver},
    },
    storage::json_backend::write_json_atomic,
};

const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub bills_lookahead_days: i64,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            bills_lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            page_size: DEFAULT_PAGE_SIZE,
            data_file: None,
            ui_color_enabled: true,
        }
    }
}

impl Config {
    pub fn bill_policy(&self) -> BillCyclePolicy {
        BillCyclePolicy::with_lookahead(self.bills_lookahead_days)
    }

    /// Page size clamped to `1..=100`.
    pub fn effective_page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Sets one option from its textual form, as typed in the shell.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?.to_ascii_uppercase(),
            "bills_lookahead_days" => {
                let days: i64 = parse_number(key, value)?;
                if days < 0 {
                    return Err(FinanceError::ConfigError(
                        "bills_lookahead_days can't be negative".into(),
                    ));
                }
                self.bills_lookahead_days = days;
            }
            "page_size" => {
                let size: usize = parse_number(key, value)?;
                if size == 0 || size > MAX_PAGE_SIZE {
                    return Err(FinanceError::ConfigError(format!(
                        "page_size must be between 1 and {}",
                        MAX_PAGE_SIZE
                    )));
                }
                self.page_size = size;
            }
            "data_file" => {
                self.data_file = match value {
                    "" | "none" => None,
                    path => Some(PathBuf::from(path)),
                }
            }
            "ui_color_enabled" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" => true,
                    "false" | "off" | "no" => false,
                    other => {
                        return Err(FinanceError::ConfigError(format!(
                            "expected on/off for ui_color_enabled, got `{}`",
                            other
                        )))
                    }
                }
            }
            other => {
                return Err(FinanceError::ConfigError(format!(
                    "unknown option `{}`",
                    other
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
            ("bills_lookahead_days", self.bills_lookahead_days.to_string()),
            ("page_size", self.page_size.to_string()),
            (
                "data_file",
                self.data_file
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "none".into()),
            ),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
        ]
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(FinanceError::ConfigError(format!("{} can't be empty", key)));
    }
    Ok(value.to_string())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| FinanceError::ConfigError(format!("{} expects a number, got `{}`", key, value)))
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data)
                .map_err(|err| FinanceError::ConfigError(format!("{}: {}", self.path.display(), err)))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        write_json_atomic(config, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bills_lookahead_days, 7);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn save_and_reload() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut config = Config::default();
        config.set("currency", "gbp").unwrap();
        config.set("bills_lookahead_days", "3").unwrap();
        config.set("ui_color_enabled", "off").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "GBP");
        assert_eq!(loaded.bill_policy().lookahead_days, 3);
        assert!(!loaded.ui_color_enabled);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"currency":"EUR"}"#).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded.currency, "EUR");
        assert_eq!(loaded.page_size, 10);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("page_size", "0").is_err());
        assert!(config.set("page_size", "ten").is_err());
        assert!(config.set("colour", "on").is_err());
        assert!(config.set("locale", " ").is_err());
        assert_eq!(config, Config::default());
    }
}
