#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use finance_core::{domain::FinanceData, storage::load_data_from_path};

pub fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/sample.json")
}

pub fn sample_data() -> FinanceData {
    load_data_from_path(&sample_path()).expect("sample data loads")
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn today() -> NaiveDate {
    day(2024, 8, 19)
}
