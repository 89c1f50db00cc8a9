use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A settled movement of money. Negative amounts are spending, positive are income.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Counterparty name.
    pub name: String,
    pub category: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    #[serde(default)]
    pub recurring: bool,
}

impl Transaction {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        date: DateTime<Utc>,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            avatar: None,
            name: name.into(),
            category: category.into(),
            date,
            amount,
            recurring: false,
        }
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn is_spending(&self) -> bool {
        self.amount < 0.0
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Transaction {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {:+.2} ({})", self.name, self.amount, self.category)
    }
}
