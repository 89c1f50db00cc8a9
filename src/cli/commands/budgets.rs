use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{BudgetDraft, BudgetService};
use crate::currency::format_date;
use crate::domain::{Budget, Displayable, FinanceData};

use super::{parse_amount, parse_args, require_subcommand, resolve_named};

const BUDGET_USAGE: &str = "budget add <category> <maximum> <theme>
budget edit <category> [--category C] [--maximum M] [--theme T]
budget remove <category>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budgets",
            "Show budgets with this month's spending",
            "budgets",
            cmd_budgets,
        ),
        CommandEntry::new("budget", "Add, edit or remove a budget", BUDGET_USAGE, cmd_budget),
    ]
}

fn cmd_budgets(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let data = context.snapshot()?;
    let money = context.money();
    let spending = BudgetService::spending(&data, context.today());

    output_section("Budgets");
    if spending.is_empty() {
        io::print_info("No budgets yet. Add one with `budget add`.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Category"),
        TableColumn::left("Theme"),
        TableColumn::right("Maximum"),
        TableColumn::right("Spent"),
        TableColumn::right("Remaining"),
        TableColumn::right("Used"),
    ]);
    for entry in &spending {
        let theme = data
            .marker(&entry.budget.theme)
            .map(|marker| marker.name.clone())
            .unwrap_or_else(|| entry.budget.theme.clone());
        table.push(vec![
            entry.budget.category.clone(),
            theme,
            money.amount(entry.budget.maximum),
            money.amount(entry.spent),
            money.amount(entry.remaining),
            format!("{:.0}%", entry.percent_used()),
        ]);
    }
    io::print_info(table.render());

    for entry in spending.iter().filter(|entry| !entry.latest.is_empty()) {
        io::print_info(format!("\nLatest spending: {}", entry.budget.category));
        for txn in &entry.latest {
            io::print_info(format!("  {}  {}", format_date(txn.day()), txn.display_label()));
        }
    }
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = require_subcommand(args, BUDGET_USAGE)?;
    match sub.to_lowercase().as_str() {
        "add" => budget_add(context, &rest),
        "edit" => budget_edit(context, &rest),
        "remove" | "rm" | "delete" => budget_remove(context, &rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown budget action `{}`; expected add, edit or remove",
            other
        ))),
    }
}

fn budget_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[])?;
    let draft = BudgetDraft {
        category: parsed.positional(0, "category")?.to_string(),
        maximum: parse_amount("maximum", parsed.positional(1, "maximum")?)?,
        theme: parsed.positional(2, "theme")?.to_string(),
    };
    let category = draft.category.trim().to_string();
    context.update(|data| BudgetService::add(data, draft))?;
    io::print_success(format!("Budget for `{}` added.", category));
    Ok(())
}

fn budget_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["category", "maximum", "theme"])?;
    let target = parsed.positional(0, "budget category")?;
    let data = context.snapshot()?;
    let current = find_budget(&data, target)?;
    let id = current.id;
    let draft = BudgetDraft {
        category: parsed
            .option("category")
            .unwrap_or(current.category.as_str())
            .to_string(),
        maximum: match parsed.option("maximum") {
            Some(raw) => parse_amount("maximum", raw)?,
            None => current.maximum,
        },
        theme: parsed.option("theme").unwrap_or(current.theme.as_str()).to_string(),
    };
    context.update(|data| BudgetService::edit(data, id, draft))?;
    io::print_success(format!("Budget `{}` updated.", target));
    Ok(())
}

fn budget_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let category = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: budget remove <category>".into()))?;
    let data = context.snapshot()?;
    let budget = find_budget(&data, category)?;
    let id = budget.id;
    if !context.confirm(&format!("Remove budget {}?", budget.display_label()))? {
        io::print_info("Nothing removed.");
        return Ok(());
    }
    let removed = context.update(|data| BudgetService::remove(data, id))?;
    io::print_success(format!("Budget `{}` removed.", removed.category));
    Ok(())
}

fn find_budget<'a>(data: &'a FinanceData, category: &str) -> Result<&'a Budget, CommandError> {
    resolve_named(
        "budget",
        category,
        BudgetService::find_by_category(data, category),
        &data.budgets,
    )
}
