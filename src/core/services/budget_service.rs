//! Budget add/edit/remove with uniqueness checks, plus monthly spending figures.
//!
//! Validation reads the derived `used_in_budgets` flags, so callers must pass a
//! reconciled snapshot (the store guarantees this between updates).

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::domain::{Budget, FinanceData, Transaction};

use super::{transaction_service::TransactionService, FieldErrors, ServiceError, ServiceResult};

const LATEST_SPENDING_LIMIT: usize = 3;

/// Form input for creating or editing a budget.
#[derive(Debug, Clone)]
pub struct BudgetDraft {
    pub category: String,
    pub maximum: f64,
    /// Marker color code or marker name.
    pub theme: String,
}

/// Spending against one budget during the month containing the reference date.
#[derive(Debug, Clone)]
pub struct BudgetSpending {
    pub budget: Budget,
    pub spent: f64,
    pub remaining: f64,
    pub latest: Vec<Transaction>,
}

impl BudgetSpending {
    pub fn percent_used(&self) -> f64 {
        if self.budget.maximum <= 0.0 {
            return 0.0;
        }
        (self.spent / self.budget.maximum * 100.0).clamp(0.0, 100.0)
    }
}

pub struct BudgetService;

impl BudgetService {
    pub fn add(data: &mut FinanceData, draft: BudgetDraft) -> ServiceResult<Uuid> {
        let theme = Self::validate(data, None, &draft)?;
        let budget = Budget::new(draft.category.trim(), draft.maximum, theme);
        let id = budget.id;
        tracing::info!(category = %budget.category, maximum = budget.maximum, "budget added");
        data.budgets.push(budget);
        Ok(id)
    }

    pub fn edit(data: &mut FinanceData, id: Uuid, draft: BudgetDraft) -> ServiceResult<()> {
        let current = data
            .budget(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("budget {}", id)))?;
        let theme = Self::validate(data, Some(&current), &draft)?;
        let budget = data
            .budget_mut(id)
            .ok_or_else(|| ServiceError::NotFound(format!("budget {}", id)))?;
        budget.category = draft.category.trim().to_string();
        budget.maximum = draft.maximum;
        budget.theme = theme;
        tracing::info!(%id, "budget updated");
        Ok(())
    }

    pub fn remove(data: &mut FinanceData, id: Uuid) -> ServiceResult<Budget> {
        let position = data
            .budgets
            .iter()
            .position(|budget| budget.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("budget {}", id)))?;
        let removed = data.budgets.remove(position);
        tracing::info!(category = %removed.category, "budget removed");
        Ok(removed)
    }

    /// Finds a budget by its category name.
    pub fn find_by_category<'a>(data: &'a FinanceData, category: &str) -> Option<&'a Budget> {
        let category = category.trim();
        data.budgets
            .iter()
            .find(|budget| budget.category == category)
            .or_else(|| {
                data.budgets
                    .iter()
                    .find(|budget| budget.category.eq_ignore_ascii_case(category))
            })
    }

    pub fn spending(data: &FinanceData, today: NaiveDate) -> Vec<BudgetSpending> {
        data.budgets
            .iter()
            .map(|budget| {
                let spent = Self::spent_in_month(data, &budget.category, today);
                BudgetSpending {
                    budget: budget.clone(),
                    spent,
                    remaining: (budget.maximum - spent).max(0.0),
                    latest: TransactionService::latest_in_category(
                        data,
                        &budget.category,
                        LATEST_SPENDING_LIMIT,
                    )
                    .into_iter()
                    .cloned()
                    .collect(),
                }
            })
            .collect()
    }

    fn spent_in_month(data: &FinanceData, category: &str, today: NaiveDate) -> f64 {
        data.transactions
            .iter()
            .filter(|txn| txn.category == category && txn.is_spending())
            .filter(|txn| {
                let day = txn.day();
                day.year() == today.year() && day.month() == today.month()
            })
            .map(|txn| txn.amount.abs())
            .sum()
    }

    /// Checks the draft and returns the canonical color code for its theme.
    fn validate(
        data: &FinanceData,
        current: Option<&Budget>,
        draft: &BudgetDraft,
    ) -> ServiceResult<String> {
        let mut errors = FieldErrors::new();
        let category_name = draft.category.trim();
        match data.category_named(category_name) {
            None if category_name.is_empty() => errors.push("category", "can't be empty"),
            None => errors.push("category", format!("unknown category `{}`", category_name)),
            Some(category) => {
                let own = current.is_some_and(|budget| budget.category == category.name);
                if category.used_in_budgets && !own {
                    errors.push(
                        "category",
                        format!("`{}` already has a budget", category.name),
                    );
                }
            }
        }

        errors.require_positive("maximum", draft.maximum);

        let mut color = String::new();
        match data.marker(&draft.theme) {
            None => errors.push("theme", format!("unknown theme `{}`", draft.theme.trim())),
            Some(marker) => {
                let own = current.is_some_and(|budget| marker.matches(&budget.theme));
                if marker.used_in_budgets && !own {
                    errors.push(
                        "theme",
                        format!("{} is already used by another budget", marker.name),
                    );
                }
                color = marker.color_code.clone();
            }
        }

        errors.finish()?;
        Ok(color)
    }
}
