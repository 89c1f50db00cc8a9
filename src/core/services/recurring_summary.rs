//! Classifies recurring bills into paid / due / due-soon / unpaid buckets.
//!
//! The billing cycle is the calendar month that contains `today`. A bill counts
//! as paid when its `last_paid` date falls inside that month. Unpaid bills are
//! split by their resolved due date: before `today` is due (overdue), within
//! the lookahead window is due soon, anything later is plain unpaid.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::domain::RecurringBill;

pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillCyclePolicy {
    /// Days after `today` (inclusive) that count as "due soon".
    pub lookahead_days: i64,
}

impl BillCyclePolicy {
    pub fn with_lookahead(days: i64) -> Self {
        Self {
            lookahead_days: days.max(0),
        }
    }
}

impl Default for BillCyclePolicy {
    fn default() -> Self {
        Self::with_lookahead(DEFAULT_LOOKAHEAD_DAYS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BillStatus {
    Paid,
    Due,
    DueSoon,
    Unpaid,
}

impl BillStatus {
    pub fn label(self) -> &'static str {
        match self {
            BillStatus::Paid => "Paid",
            BillStatus::Due => "Due",
            BillStatus::DueSoon => "Due soon",
            BillStatus::Unpaid => "Upcoming",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BucketTotal {
    pub count: usize,
    pub total: f64,
}

impl BucketTotal {
    fn add(&mut self, amount: f64) {
        self.count += 1;
        self.total += amount;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringSummary {
    pub paid: BucketTotal,
    pub unpaid: BucketTotal,
    pub due_soon: BucketTotal,
    pub due: BucketTotal,
}

impl RecurringSummary {
    pub fn bucket(&self, status: BillStatus) -> BucketTotal {
        match status {
            BillStatus::Paid => self.paid,
            BillStatus::Due => self.due,
            BillStatus::DueSoon => self.due_soon,
            BillStatus::Unpaid => self.unpaid,
        }
    }

    fn bucket_mut(&mut self, status: BillStatus) -> &mut BucketTotal {
        match status {
            BillStatus::Paid => &mut self.paid,
            BillStatus::Due => &mut self.due,
            BillStatus::DueSoon => &mut self.due_soon,
            BillStatus::Unpaid => &mut self.unpaid,
        }
    }

    pub fn bill_count(&self) -> usize {
        self.paid.count + self.unpaid.count + self.due_soon.count + self.due.count
    }

    pub fn total(&self) -> f64 {
        self.paid.total + self.unpaid.total + self.due_soon.total + self.due.total
    }
}

/// A bill paired with its classification for the current cycle.
#[derive(Debug, Clone)]
pub struct BillRow<'a> {
    pub bill: &'a RecurringBill,
    pub status: BillStatus,
    pub due_on: NaiveDate,
}

fn same_cycle(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

pub fn classify_bill(bill: &RecurringBill, today: NaiveDate, policy: BillCyclePolicy) -> BillStatus {
    if bill.last_paid.is_some_and(|paid| same_cycle(paid, today)) {
        return BillStatus::Paid;
    }
    let due_on = bill.due_date.resolve(today);
    if due_on < today {
        return BillStatus::Due;
    }
    let soon_cutoff = today + Duration::days(policy.lookahead_days);
    if due_on <= soon_cutoff {
        BillStatus::DueSoon
    } else {
        BillStatus::Unpaid
    }
}

pub fn summarize(
    bills: &[RecurringBill],
    today: NaiveDate,
    policy: BillCyclePolicy,
) -> RecurringSummary {
    let summary = bills.iter().fold(RecurringSummary::default(), |mut acc, bill| {
        acc.bucket_mut(classify_bill(bill, today, policy))
            .add(bill.magnitude());
        acc
    });
    tracing::debug!(
        bills = bills.len(),
        paid = summary.paid.count,
        due = summary.due.count,
        due_soon = summary.due_soon.count,
        unpaid = summary.unpaid.count,
        "recurring bills summarized"
    );
    summary
}

/// Classifies every bill, keeping input order.
pub fn bill_rows<'a>(
    bills: &'a [RecurringBill],
    today: NaiveDate,
    policy: BillCyclePolicy,
) -> Vec<BillRow<'a>> {
    bills
        .iter()
        .map(|bill| BillRow {
            bill,
            status: classify_bill(bill, today, policy),
            due_on: bill.due_date.resolve(today),
        })
        .collect()
}
