use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use finance_core::core::services::{
    reconcile_snapshot, summarize, BillCyclePolicy, BudgetService, SortOrder, TransactionQuery,
    TransactionService,
};
use finance_core::domain::{
    category::default_categories, marker::default_marker_themes, Budget, DueDate, FinanceData,
    Pot, RecurringBill, Transaction,
};
use finance_core::storage::{load_data_from_path, save_data_to_path};
use tempfile::tempdir;

fn build_sample_data(txn_count: usize, bill_count: usize) -> FinanceData {
    let categories = default_categories();
    let markers = default_marker_themes();
    let mut data = FinanceData::default();

    for (idx, category) in categories.iter().enumerate() {
        let marker = &markers[idx % markers.len()];
        data.budgets.push(Budget::new(
            category.name.clone(),
            100.0 + idx as f64 * 25.0,
            marker.color_code.clone(),
        ));
    }
    for (idx, marker) in markers.iter().enumerate().skip(categories.len()) {
        data.pots
            .push(Pot::new(format!("Pot {}", idx), 500.0, marker.color_code.clone()));
    }

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    for idx in 0..txn_count {
        let category = &categories[idx % categories.len()];
        let amount = if idx % 4 == 0 { 120.0 } else { -(5.0 + (idx % 90) as f64) };
        data.transactions.push(Transaction::new(
            format!("Counterparty {}", idx % 250),
            category.name.clone(),
            start + Duration::hours(idx as i64 * 3),
            amount,
        ));
    }

    let paid_on = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
    for idx in 0..bill_count {
        let category = &categories[idx % categories.len()];
        let mut bill = RecurringBill::new(
            format!("Bill {}", idx),
            category.name.clone(),
            10.0 + (idx % 40) as f64,
            DueDate::DayOfMonth((idx % 31) as u32 + 1),
            markers[idx % markers.len()].color_code.clone(),
        );
        if idx % 3 == 0 {
            bill = bill.with_last_paid(paid_on);
        }
        data.recurring_bills.push(bill);
    }
    data
}

fn bench_derivations(c: &mut Criterion) {
    let data = build_sample_data(black_box(10_000), black_box(5_000));
    let today = NaiveDate::from_ymd_opt(2024, 8, 19).unwrap();
    let policy = BillCyclePolicy::default();

    c.bench_function("recurring_summary_5k", |b| {
        b.iter(|| black_box(summarize(&data.recurring_bills, today, policy)))
    });

    c.bench_function("used_status_reconcile", |b| {
        b.iter(|| black_box(reconcile_snapshot(&data)))
    });

    c.bench_function("budget_spending_10k", |b| {
        b.iter(|| black_box(BudgetService::spending(&data, today)))
    });

    c.bench_function("transaction_query_10k", |b| {
        b.iter_batched(
            || TransactionQuery {
                search: "party 1".into(),
                category: None,
                sort: SortOrder::Highest,
                page: 3,
                page_size: 10,
            },
            |query| black_box(TransactionService::query(&data, &query).total_items),
            BatchSize::SmallInput,
        )
    });
}

fn bench_document_io(c: &mut Criterion) {
    let data = build_sample_data(black_box(10_000), black_box(1_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("finance.json");

    c.bench_function("document_save_10k", |b| {
        b.iter(|| save_data_to_path(&data, &file_path).expect("save document"))
    });

    save_data_to_path(&data, &file_path).expect("seed");

    c.bench_function("document_load_10k", |b| {
        b.iter(|| black_box(load_data_from_path(&file_path).expect("load document")))
    });
}

criterion_group!(benches, bench_derivations, bench_document_io);
criterion_main!(benches);
