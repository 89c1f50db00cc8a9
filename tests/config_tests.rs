use assert_fs::prelude::*;
use assert_fs::TempDir;
use finance_core::{config::ConfigManager, core::FinanceError};

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let config = manager.load().unwrap();
    assert_eq!(config.currency, "USD");
    assert_eq!(config.bill_policy().lookahead_days, 7);
    assert!(config.data_file.is_none());
}

#[test]
fn settings_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut config = manager.load().unwrap();
    config.set("currency", "eur").unwrap();
    config.set("locale", "de-DE").unwrap();
    config.set("page_size", "25").unwrap();
    manager.save(&config).unwrap();

    dir.child("config/config.json").assert(predicates::path::exists());
    let reloaded = manager.load().unwrap();
    assert_eq!(reloaded.currency, "EUR");
    assert_eq!(reloaded.locale, "de-DE");
    assert_eq!(reloaded.effective_page_size(), 25);
}

#[test]
fn corrupt_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    dir.child("config/config.json").write_str("not json").unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert!(matches!(manager.load(), Err(FinanceError::ConfigError(_))));
}

#[test]
fn invalid_values_leave_config_unchanged() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut config = manager.load().unwrap();
    assert!(config.set("page_size", "0").is_err());
    assert!(config.set("bills_lookahead_days", "-1").is_err());
    assert!(config.set("colour", "on").is_err());
    assert_eq!(config.effective_page_size(), 10);
    assert_eq!(config.bills_lookahead_days, 7);
}
