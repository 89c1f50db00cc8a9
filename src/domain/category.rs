//! Spending categories that budgets, bills and transactions refer to by name.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A spending category. Budgets reference categories by `name`, not by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    /// Derived: set when at least one budget claims this category.
    #[serde(default)]
    pub used_in_budgets: bool,
}

impl Category {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            used_in_budgets: false,
        }
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

const DEFAULT_CATEGORY_NAMES: [&str; 10] = [
    "Entertainment",
    "Bills",
    "Groceries",
    "Dining Out",
    "Transportation",
    "Personal Care",
    "Education",
    "Lifestyle",
    "Shopping",
    "General",
];

static DEFAULT_CATEGORIES: Lazy<Vec<Category>> = Lazy::new(|| {
    DEFAULT_CATEGORY_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| Category::new(idx as u32 + 1, *name))
        .collect()
});

/// Built-in catalogue used when a data document carries no categories.
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES.clone()
}

/// Finds a category by exact name.
pub fn find_category<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|category| category.name == name)
}
