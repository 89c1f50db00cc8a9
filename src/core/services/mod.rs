pub mod bill_service;
pub mod budget_service;
pub mod pot_service;
pub mod query;
pub mod recurring_summary;
pub mod summary_service;
pub mod transaction_service;
pub mod used_status;

pub use bill_service::{BillDraft, BillService};
pub use budget_service::{BudgetDraft, BudgetService, BudgetSpending};
pub use pot_service::{PotDraft, PotService};
pub use query::{Page, SortOrder};
pub use recurring_summary::{
    bill_rows, classify_bill, summarize, BillCyclePolicy, BillRow, BillStatus, BucketTotal,
    RecurringSummary,
};
pub use summary_service::{Overview, SummaryService};
pub use transaction_service::{TransactionQuery, TransactionService};
pub use used_status::{reconcile, reconcile_pots, reconcile_snapshot};

use std::fmt;

use crate::core::errors::FinanceError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] FinanceError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
    #[error("{}", format_field_errors(.0))]
    Validation(Vec<FieldError>),
}

impl ServiceError {
    /// Per-field messages when the error came from form validation.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ServiceError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

/// A validation failure attached to one input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collects field errors for one submission; the submission fails if any were recorded.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        // First failure per field wins, like an inline form message.
        if self.errors.iter().any(|err| err.field == field) {
            return;
        }
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub(crate) fn require_name(&mut self, field: &'static str, value: &str, max_len: usize) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, "can't be empty");
        } else if trimmed.chars().count() > max_len {
            self.push(field, format!("must be at most {} characters", max_len));
        }
    }

    pub(crate) fn require_finite(&mut self, field: &'static str, value: f64) {
        if !value.is_finite() {
            self.push(field, "must be a number");
        }
    }

    pub(crate) fn require_positive(&mut self, field: &'static str, value: f64) {
        if !value.is_finite() {
            self.push(field, "must be a number");
        } else if value <= 0.0 {
            self.push(field, "must be greater than zero");
        }
    }

    pub(crate) fn finish(self) -> ServiceResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            tracing::warn!(errors = %format_field_errors(&self.errors), "validation rejected");
            Err(ServiceError::Validation(self.errors))
        }
    }
}
