use chrono::NaiveDate;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{
    classify_bill, summarize, BillDraft, BillService, BillStatus, SortOrder,
};
use crate::currency::format_date;
use crate::domain::{Displayable, DueDate, FinanceData, RecurringBill};

use super::{parse_amount, parse_args, require_subcommand, resolve_named};

const BILL_USAGE: &str = "bill add <name> <category> <amount> <due-day|YYYY-MM-DD> <theme>
bill edit <name> [--name N] [--category C] [--amount A] [--due D] [--theme T]
bill remove <name>
bill pay <name> [YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "bills",
            "List recurring bills with their status this month",
            "bills [--search text] [--sort latest|oldest|a-z|z-a|highest|lowest]",
            cmd_bills,
        ),
        CommandEntry::new("bill", "Add, edit, remove or pay a recurring bill", BILL_USAGE, cmd_bill),
    ]
}

fn cmd_bills(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["search", "sort"])?;
    let sort = match parsed.option("sort") {
        Some(raw) => raw.parse::<SortOrder>().map_err(CommandError::InvalidArguments)?,
        None => SortOrder::Oldest,
    };
    let search = parsed.option("search").unwrap_or_default();
    let data = context.snapshot()?;
    let today = context.today();
    let policy = context.config.bill_policy();
    let money = context.money();

    let bills = BillService::search(&data, search, sort, today);
    let mut table = Table::new(vec![
        TableColumn::left("Bill").max(40),
        TableColumn::left("Category"),
        TableColumn::left("Due"),
        TableColumn::left("Status"),
        TableColumn::right("Amount"),
    ]);
    for bill in &bills {
        table.push(vec![
            bill.name.clone(),
            bill.category.clone(),
            bill.due_date.to_string(),
            classify_bill(bill, today, policy).label().to_string(),
            money.amount(bill.magnitude()),
        ]);
    }

    let summary = summarize(&data.recurring_bills, today, policy);
    output_section(format!("Recurring Bills ({})", format_date(today)));
    if table.is_empty() {
        io::print_info("No recurring bills match.");
    } else {
        io::print_info(table.render());
    }
    io::print_info("");
    for status in [
        BillStatus::Paid,
        BillStatus::Unpaid,
        BillStatus::DueSoon,
        BillStatus::Due,
    ] {
        let bucket = summary.bucket(status);
        if status == BillStatus::Due && bucket.count == 0 {
            continue;
        }
        io::print_info(format!(
            "  {:<9} {:>3} bills  {}",
            status.label(),
            bucket.count,
            money.amount(bucket.total)
        ));
    }
    io::print_info(format!(
        "  {:<9} {:>3} bills  {}",
        "Total",
        summary.bill_count(),
        money.amount(summary.total())
    ));
    Ok(())
}

fn cmd_bill(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = require_subcommand(args, BILL_USAGE)?;
    match sub.to_lowercase().as_str() {
        "add" => bill_add(context, &rest),
        "edit" => bill_edit(context, &rest),
        "remove" | "rm" | "delete" => bill_remove(context, &rest),
        "pay" => bill_pay(context, &rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown bill action `{}`; expected add, edit, remove or pay",
            other
        ))),
    }
}

fn bill_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[])?;
    let draft = BillDraft {
        name: parsed.positional(0, "bill name")?.to_string(),
        category: parsed.positional(1, "category")?.to_string(),
        amount: parse_amount("amount", parsed.positional(2, "amount")?)?,
        due_date: parse_due(parsed.positional(3, "due date")?)?,
        theme: parsed.positional(4, "theme")?.to_string(),
    };
    let name = draft.name.trim().to_string();
    context.update(|data| BillService::add(data, draft))?;
    io::print_success(format!("Recurring bill `{}` added.", name));
    Ok(())
}

fn bill_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["name", "category", "amount", "due", "theme"])?;
    let target = parsed.positional(0, "bill name")?;
    let data = context.snapshot()?;
    let current = find_bill(&data, target)?;
    let id = current.id;

    let draft = BillDraft {
        name: parsed.option("name").unwrap_or(current.name.as_str()).to_string(),
        category: parsed.option("category").unwrap_or(current.category.as_str()).to_string(),
        amount: match parsed.option("amount") {
            Some(raw) => parse_amount("amount", raw)?,
            None => current.amount,
        },
        due_date: match parsed.option("due") {
            Some(raw) => parse_due(raw)?,
            None => current.due_date,
        },
        theme: parsed.option("theme").unwrap_or(current.theme.as_str()).to_string(),
    };
    context.update(|data| BillService::edit(data, id, draft))?;
    io::print_success(format!("Recurring bill `{}` updated.", target));
    Ok(())
}

fn bill_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: bill remove <name>".into()))?;
    let data = context.snapshot()?;
    let bill = find_bill(&data, name)?;
    let id = bill.id;
    if !context.confirm(&format!("Remove recurring bill {}?", bill.display_label()))? {
        io::print_info("Nothing removed.");
        return Ok(());
    }
    let removed = context.update(|data| BillService::remove(data, id))?;
    io::print_success(format!("Recurring bill `{}` removed.", removed.name));
    Ok(())
}

fn bill_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: bill pay <name> [date]".into()))?;
    let date = match args.get(1) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            CommandError::InvalidArguments(format!("payment date must be YYYY-MM-DD, got `{}`", raw))
        })?,
        None => context.today(),
    };
    let data = context.snapshot()?;
    let id = find_bill(&data, name)?.id;
    context.update(|data| BillService::mark_paid(data, id, date))?;
    io::print_success(format!("Recorded payment for `{}` on {}.", name, format_date(date)));
    Ok(())
}

fn find_bill<'a>(data: &'a FinanceData, name: &str) -> Result<&'a RecurringBill, CommandError> {
    resolve_named(
        "recurring bill",
        name,
        BillService::find_by_name(data, name),
        &data.recurring_bills,
    )
}

fn parse_due(raw: &str) -> Result<DueDate, CommandError> {
    raw.parse::<DueDate>().map_err(CommandError::InvalidArguments)
}
