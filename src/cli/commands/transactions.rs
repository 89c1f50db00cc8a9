use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{SortOrder, TransactionQuery, TransactionService};
use crate::currency::format_date;

use super::parse_args;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "transactions",
        "Search, filter and page through transactions",
        "transactions [--search text] [--category name] [--sort latest|oldest|a-z|z-a|highest|lowest] [--page n]",
        cmd_transactions,
    )]
}

fn cmd_transactions(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["search", "category", "sort", "page"])?;
    let data = context.snapshot()?;

    let category = match parsed.option("category") {
        None => None,
        Some(raw) if raw.eq_ignore_ascii_case("all") => None,
        Some(raw) => Some(
            data.category_named(raw)
                .map(|category| category.name.clone())
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("unknown category `{}`", raw))
                })?,
        ),
    };
    let query = TransactionQuery {
        search: parsed.option("search").unwrap_or_default().to_string(),
        category,
        sort: match parsed.option("sort") {
            Some(raw) => raw.parse::<SortOrder>().map_err(CommandError::InvalidArguments)?,
            None => SortOrder::Latest,
        },
        page: match parsed.option("page") {
            Some(raw) => raw.parse().map_err(|_| {
                CommandError::InvalidArguments(format!("page must be a number, got `{}`", raw))
            })?,
            None => 1,
        },
        page_size: context.config.effective_page_size(),
    };

    let page = TransactionService::query(&data, &query);
    let money = context.money();
    output_section("Transactions");
    if page.items.is_empty() {
        io::print_info("No transactions match.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Recipient / Sender").max(32),
        TableColumn::left("Category"),
        TableColumn::left("Date"),
        TableColumn::right("Amount"),
    ]);
    for txn in &page.items {
        table.push(vec![
            txn.name.clone(),
            txn.category.clone(),
            format_date(txn.day()),
            money.signed(txn.amount),
        ]);
    }
    io::print_info(table.render());
    io::print_info(format!(
        "Page {} of {} ({} transactions, sorted {})",
        page.page, page.total_pages, page.total_items, query.sort
    ));
    Ok(())
}
