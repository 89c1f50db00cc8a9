use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    core::{errors::FinanceError, utils::ensure_dir},
    domain::{duplicate_themes, FinanceData},
};

use super::{DataSource, Result};

const TMP_SUFFIX: &str = "tmp";

/// Reads the finance document from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn read(&self) -> Result<FinanceData> {
        if !self.path.exists() {
            return Err(FinanceError::StorageError(format!(
                "data file `{}` not found",
                self.path.display()
            )));
        }
        load_data_from_path(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a document already held in memory; used for fixtures and embedding.
#[derive(Debug, Clone)]
pub struct MemorySource {
    label: String,
    data: FinanceData,
}

impl MemorySource {
    pub fn new(label: impl Into<String>, data: FinanceData) -> Self {
        Self {
            label: label.into(),
            data,
        }
    }
}

impl DataSource for MemorySource {
    fn read(&self) -> Result<FinanceData> {
        Ok(self.data.clone())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Writes a snapshot to `path` by staging it next to the target and renaming.
pub fn save_data_to_path(data: &FinanceData, path: &Path) -> Result<()> {
    write_json_atomic(data, path)
}

pub(crate) fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_data_from_path(path: &Path) -> Result<FinanceData> {
    let raw = fs::read_to_string(path)?;
    let data: FinanceData = serde_json::from_str(&raw)?;
    Ok(data)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Detects dangling references and uniqueness violations in a loaded document.
///
/// None of these stop a load; they are reported so the user can fix the data.
pub fn data_warnings(data: &FinanceData) -> Vec<String> {
    let mut warnings = Vec::new();

    let mut seen_categories = HashSet::new();
    for budget in &data.budgets {
        if data.category_named(&budget.category).is_none() {
            warnings.push(format!(
                "budget `{}` references unknown category",
                budget.category
            ));
        }
        if !seen_categories.insert(budget.category.as_str()) {
            warnings.push(format!(
                "category `{}` has more than one budget",
                budget.category
            ));
        }
        if data.marker(&budget.theme).is_none() {
            warnings.push(format!(
                "budget `{}` uses unknown theme {}",
                budget.category, budget.theme
            ));
        }
    }

    for theme in duplicate_themes(&data.budgets) {
        warnings.push(format!("theme {} is shared by several budgets", theme));
    }
    for theme in duplicate_themes(&data.pots) {
        warnings.push(format!("theme {} is shared by several pots", theme));
    }

    for bill in &data.recurring_bills {
        if !bill.amount.is_finite() {
            warnings.push(format!("bill `{}` has a non-numeric amount", bill.name));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, Pot};
    use tempfile::TempDir;

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");
        let mut data = FinanceData::default();
        data.balance.current = 12.5;

        save_data_to_path(&data, &path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        let loaded = JsonFileSource::new(&path).read().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn missing_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let err = JsonFileSource::new(dir.path().join("absent.json"))
            .read()
            .unwrap_err();
        assert!(matches!(err, FinanceError::StorageError(_)));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"budgets\": [{\"category\": 3}]}").unwrap();
        let err = load_data_from_path(&path).unwrap_err();
        assert!(matches!(err, FinanceError::Malformed(_)));
    }

    #[test]
    fn warnings_flag_duplicates_and_dangling_refs() {
        let mut data = FinanceData::default();
        data.budgets.push(Budget::new("Bills", 100.0, "#277C78"));
        data.budgets.push(Budget::new("Bills", 200.0, "#277c78"));
        data.budgets.push(Budget::new("Rockets", 50.0, "#123456"));
        data.pots.push(Pot::new("A", 10.0, "#F2CDAC"));
        data.pots.push(Pot::new("B", 10.0, "#f2cdac"));

        let warnings = data_warnings(&data);
        assert!(warnings.iter().any(|w| w.contains("more than one budget")));
        assert!(warnings.iter().any(|w| w.contains("shared by several budgets")));
        assert!(warnings.iter().any(|w| w.contains("unknown category")));
        assert!(warnings.iter().any(|w| w.contains("unknown theme #123456")));
        assert!(warnings.iter().any(|w| w.contains("shared by several pots")));
    }

    #[test]
    fn non_numeric_bill_amount_warns_instead_of_failing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bills.json");
        fs::write(
            &path,
            r##"{"recurringBills": [
                {"name": "Spa", "category": "Personal Care", "amount": "abc", "dueDate": 3, "theme": "#626070"}
            ]}"##,
        )
        .unwrap();

        let data = JsonFileSource::new(&path).read().unwrap();
        let warnings = data_warnings(&data);
        assert_eq!(warnings, ["bill `Spa` has a non-numeric amount"]);

        let today = chrono::NaiveDate::from_ymd_opt(2024, 8, 19).unwrap();
        let summary = crate::core::services::summarize(
            &data.recurring_bills,
            today,
            crate::core::services::BillCyclePolicy::default(),
        );
        assert_eq!(summary.due.count, 1);
        assert_eq!(summary.due.total, 0.0);
    }
}
