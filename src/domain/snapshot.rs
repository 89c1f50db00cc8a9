//! The whole finance document held in memory for a session.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    balance::{Balance, Settings},
    common::Identifiable,
    budget::Budget,
    category::{default_categories, Category},
    marker::{default_marker_themes, MarkerTheme},
    pot::Pot,
    recurring::RecurringBill,
    transaction::Transaction,
};

/// Snapshot of every list the application works with.
///
/// Derived flags (`Category::used_in_budgets`, `MarkerTheme::used_in_*`) are only
/// trustworthy after the snapshot went through the store's reconciliation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceData {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub balance: Balance,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub pots: Vec<Pot>,
    #[serde(default)]
    pub recurring_bills: Vec<RecurringBill>,
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    #[serde(default = "default_marker_themes")]
    pub marker_themes: Vec<MarkerTheme>,
}

impl Default for FinanceData {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            balance: Balance::default(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            pots: Vec::new(),
            recurring_bills: Vec::new(),
            categories: default_categories(),
            marker_themes: default_marker_themes(),
        }
    }
}

fn by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

fn by_id_mut<T: Identifiable>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

impl FinanceData {
    pub fn budget(&self, id: Uuid) -> Option<&Budget> {
        by_id(&self.budgets, id)
    }

    pub fn budget_mut(&mut self, id: Uuid) -> Option<&mut Budget> {
        by_id_mut(&mut self.budgets, id)
    }

    pub fn pot(&self, id: Uuid) -> Option<&Pot> {
        by_id(&self.pots, id)
    }

    pub fn pot_mut(&mut self, id: Uuid) -> Option<&mut Pot> {
        by_id_mut(&mut self.pots, id)
    }

    pub fn bill(&self, id: Uuid) -> Option<&RecurringBill> {
        by_id(&self.recurring_bills, id)
    }

    pub fn bill_mut(&mut self, id: Uuid) -> Option<&mut RecurringBill> {
        by_id_mut(&mut self.recurring_bills, id)
    }

    pub fn category_named(&self, name: &str) -> Option<&Category> {
        super::category::find_category(&self.categories, name)
    }

    pub fn marker(&self, key: &str) -> Option<&MarkerTheme> {
        super::marker::find_marker(&self.marker_themes, key)
    }
}
