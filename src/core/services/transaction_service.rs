use crate::domain::{FinanceData, Transaction};

use super::query::{matches_search, paginate, Page, SortOrder, DEFAULT_PAGE_SIZE};

/// Filters applied to the transaction listing.
#[derive(Debug, Clone)]
pub struct TransactionQuery {
    pub search: String,
    pub category: Option<String>,
    pub sort: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            sort: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

pub struct TransactionService;

impl TransactionService {
    pub fn query<'a>(data: &'a FinanceData, query: &TransactionQuery) -> Page<&'a Transaction> {
        let mut matches: Vec<&Transaction> = data
            .transactions
            .iter()
            .filter(|txn| matches_search(&txn.name, &query.search))
            .filter(|txn| {
                query
                    .category
                    .as_deref()
                    .map_or(true, |category| txn.category == category)
            })
            .collect();
        matches.sort_by(|left, right| {
            query.sort.compare(
                (left.date, left.name.as_str(), left.amount),
                (right.date, right.name.as_str(), right.amount),
            )
        });
        paginate(matches, query.page, query.page_size)
    }

    /// The `limit` most recent transactions in `category`.
    pub fn latest_in_category<'a>(
        data: &'a FinanceData,
        category: &str,
        limit: usize,
    ) -> Vec<&'a Transaction> {
        let mut matches: Vec<&Transaction> = data
            .transactions
            .iter()
            .filter(|txn| txn.category == category)
            .collect();
        matches.sort_by(|left, right| right.date.cmp(&left.date));
        matches.truncate(limit);
        matches
    }
}
