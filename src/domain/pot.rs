use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A savings pot with a target amount and a running total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub target: f64,
    #[serde(default)]
    pub total: f64,
    pub theme: String,
}

impl Pot {
    pub fn new(name: impl Into<String>, target: f64, theme: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target,
            total: 0.0,
            theme: theme.into(),
        }
    }

    /// Saved share of the target as a percentage, capped at 100.
    pub fn progress_percent(&self) -> f64 {
        if self.target <= 0.0 || !self.target.is_finite() {
            return 0.0;
        }
        (self.total / self.target * 100.0).clamp(0.0, 100.0)
    }
}

impl Identifiable for Pot {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Pot {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Themed for Pot {
    fn theme(&self) -> &str {
        &self.theme
    }
}

impl Displayable for Pot {
    fn display_label(&self) -> String {
        format!("{} ({:.0}%)", self.name, self.progress_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_capped() {
        let mut pot = Pot::new("Holiday", 200.0, "#277C78");
        pot.total = 50.0;
        assert_eq!(pot.progress_percent(), 25.0);
        pot.total = 500.0;
        assert_eq!(pot.progress_percent(), 100.0);
    }

    #[test]
    fn zero_target_reports_no_progress() {
        let mut pot = Pot::new("Empty", 0.0, "#277C78");
        pot.total = 10.0;
        assert_eq!(pot.progress_percent(), 0.0);
    }
}
