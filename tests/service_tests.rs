mod common;

use common::{day, sample_data, today};
use finance_core::{
    core::services::{
        bill_rows, reconcile, reconcile_snapshot, summarize, BillCyclePolicy, BillStatus,
        BudgetService, PotService, SortOrder, SummaryService, TransactionQuery,
        TransactionService,
    },
    domain::{DueDate, RecurringBill},
};

#[test]
fn sample_bills_fall_into_every_bucket() {
    let data = sample_data();
    let summary = summarize(&data.recurring_bills, today(), BillCyclePolicy::default());

    assert_eq!(summary.paid.count, 2);
    assert!((summary.paid.total - 165.0).abs() < 1e-9);
    assert_eq!(summary.due.count, 1);
    assert!((summary.due.total - 30.0).abs() < 1e-9);
    assert_eq!(summary.due_soon.count, 2);
    assert!((summary.due_soon.total - 19.99).abs() < 1e-9);
    assert_eq!(summary.unpaid.count, 2);
    assert!((summary.unpaid.total - 135.0).abs() < 1e-9);
    assert_eq!(summary.bill_count(), data.recurring_bills.len());
}

#[test]
fn lookahead_boundary_is_inclusive() {
    let data = sample_data();
    let rows = bill_rows(&data.recurring_bills, today(), BillCyclePolicy::with_lookahead(7));
    let nimbus = rows
        .iter()
        .find(|row| row.bill.name == "Nimbus Data Storage")
        .unwrap();
    assert_eq!(nimbus.due_on, day(2024, 8, 26));
    assert_eq!(nimbus.status, BillStatus::DueSoon);

    let rows = bill_rows(&data.recurring_bills, today(), BillCyclePolicy::with_lookahead(6));
    let nimbus = rows
        .iter()
        .find(|row| row.bill.name == "Nimbus Data Storage")
        .unwrap();
    assert_eq!(nimbus.status, BillStatus::Unpaid);
}

#[test]
fn payment_last_month_does_not_count_this_month() {
    let bill = RecurringBill::new("Gym", "Lifestyle", 40.0, DueDate::DayOfMonth(31), "#277C78")
        .with_last_paid(day(2024, 1, 31));
    let summary = summarize(
        std::slice::from_ref(&bill),
        day(2024, 2, 10),
        BillCyclePolicy::default(),
    );
    assert_eq!(summary.unpaid.count, 1);
    assert_eq!(bill.due_date.resolve(day(2024, 2, 10)), day(2024, 2, 29));
}

#[test]
fn reconcile_marks_only_claimed_entries() {
    let mut data = sample_data();
    data.budgets.retain(|budget| budget.category != "Bills");
    let (categories, markers) = reconcile(&data.budgets, &data.categories, &data.marker_themes);

    assert_eq!(categories.len(), data.categories.len());
    assert_eq!(markers.len(), data.marker_themes.len());
    let used: Vec<_> = categories
        .iter()
        .filter(|category| category.used_in_budgets)
        .map(|category| category.name.as_str())
        .collect();
    assert_eq!(used, vec!["Entertainment", "Dining Out", "Personal Care"]);
    let cyan = markers.iter().find(|marker| marker.name == "Cyan").unwrap();
    assert!(!cyan.used_in_budgets);
}

#[test]
fn reconciled_snapshot_tracks_pot_themes() {
    let data = reconcile_snapshot(&sample_data());
    let navy = data.marker("Navy").unwrap();
    assert!(navy.used_in_budgets);
    assert!(navy.used_in_pots);
    let red = data.marker("Red").unwrap();
    assert!(!red.used_in_budgets && !red.used_in_pots);
}

#[test]
fn overview_matches_sample_month() {
    let data = reconcile_snapshot(&sample_data());
    let overview = SummaryService::overview(&data, today(), BillCyclePolicy::default());
    assert!((overview.pots_saved - 389.0).abs() < 1e-9);
    assert_eq!(overview.pot_count, 4);
    assert!((overview.budget_limit - 975.0).abs() < 1e-9);
    assert!((overview.budget_spent - 248.0).abs() < 1e-9);
    assert_eq!(PotService::total_saved(&data), overview.pots_saved);
}

#[test]
fn budget_spending_caps_remaining_at_zero() {
    let data = reconcile_snapshot(&sample_data());
    let spending = BudgetService::spending(&data, today());
    let dining = spending
        .iter()
        .find(|entry| entry.budget.category == "Dining Out")
        .unwrap();
    assert!((dining.spent - 133.0).abs() < 1e-9);
    assert_eq!(dining.remaining, 0.0);
    assert_eq!(dining.latest.len(), 3);
}

#[test]
fn transaction_query_pages_and_filters() {
    let data = sample_data();
    let page = TransactionService::query(
        &data,
        &TransactionQuery {
            search: String::new(),
            category: None,
            sort: SortOrder::Latest,
            page: 2,
            page_size: 10,
        },
    );
    assert_eq!(page.total_items, 17);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.len(), 7);

    let dining = TransactionService::query(
        &data,
        &TransactionQuery {
            search: "bistro".into(),
            category: Some("Dining Out".into()),
            sort: SortOrder::Latest,
            page: 1,
            page_size: 10,
        },
    );
    assert_eq!(dining.items.len(), 1);
    assert_eq!(dining.items[0].name, "Savory Bites Bistro");
}
