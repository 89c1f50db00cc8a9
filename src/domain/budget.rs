use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A monthly spending limit for one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Category name; budgets link to categories by name.
    pub category: String,
    pub maximum: f64,
    /// Marker color code.
    pub theme: String,
}

impl Budget {
    pub fn new(category: impl Into<String>, maximum: f64, theme: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: category.into(),
            maximum,
            theme: theme.into(),
        }
    }
}

impl Identifiable for Budget {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Budget {
    fn name(&self) -> &str {
        &self.category
    }
}

impl Themed for Budget {
    fn theme(&self) -> &str {
        &self.theme
    }
}

impl Displayable for Budget {
    fn display_label(&self) -> String {
        format!("{} (max {:.2})", self.category, self.maximum)
    }
}
