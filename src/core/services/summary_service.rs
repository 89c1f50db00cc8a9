use chrono::NaiveDate;

use crate::domain::{Balance, FinanceData};

use super::{
    budget_service::BudgetService,
    pot_service::PotService,
    recurring_summary::{self, BillCyclePolicy, RecurringSummary},
};

/// Aggregates shown on the overview page.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub balance: Balance,
    pub pots_saved: f64,
    pub pot_count: usize,
    pub budget_limit: f64,
    pub budget_spent: f64,
    pub bills: RecurringSummary,
}

pub struct SummaryService;

impl SummaryService {
    pub fn overview(data: &FinanceData, today: NaiveDate, policy: BillCyclePolicy) -> Overview {
        let spending = BudgetService::spending(data, today);
        Overview {
            balance: data.balance,
            pots_saved: PotService::total_saved(data),
            pot_count: data.pots.len(),
            budget_limit: spending.iter().map(|entry| entry.budget.maximum).sum(),
            budget_spent: spending.iter().map(|entry| entry.spent).sum(),
            bills: Self::bills(data, today, policy),
        }
    }

    pub fn bills(data: &FinanceData, today: NaiveDate, policy: BillCyclePolicy) -> RecurringSummary {
        recurring_summary::summarize(&data.recurring_bills, today, policy)
    }
}
