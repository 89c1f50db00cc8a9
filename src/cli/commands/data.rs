use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{BillStatus, SummaryService};
use crate::core::utils::PathResolver;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "load",
            "Load a finance data file",
            "load [path]  (defaults to the configured data_file)",
            cmd_load,
        ),
        CommandEntry::new(
            "export",
            "Write the current session to a file",
            "export [path]  (defaults to a timestamped file under exports/)",
            cmd_export,
        ),
        CommandEntry::new(
            "overview",
            "Show balance, pots, budgets and recurring bills at a glance",
            "overview",
            cmd_overview,
        ),
        CommandEntry::new(
            "categories",
            "List transaction categories",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "themes",
            "List marker themes and where they are used",
            "themes",
            cmd_themes,
        ),
    ]
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => context.config.data_file.clone().ok_or_else(|| {
            CommandError::InvalidArguments(
                "usage: load <path> (or set a default with `config set data_file <path>`)".into(),
            )
        })?,
    };
    context.load_from(&path)?;
    let data = context.snapshot()?;
    io::print_success(format!(
        "Loaded `{}`: {} transactions, {} budgets, {} pots, {} recurring bills.",
        path.display(),
        data.transactions.len(),
        data.budgets.len(),
        data.pots.len(),
        data.recurring_bills.len()
    ));
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => PathResolver::export_dir_in(&PathResolver::base_dir()).join(format!(
            "finance-{}.json",
            Utc::now().format("%Y%m%d-%H%M%S")
        )),
    };
    if context
        .source
        .as_ref()
        .is_some_and(|source| same_file(source.path(), &path))
    {
        return Err(CommandError::InvalidArguments(
            "export target is the loaded data file; pick another path".into(),
        ));
    }
    context.store.export(&path)?;
    io::print_success(format!("Exported session to `{}`.", path.display()));
    Ok(())
}

/// Whether two spellings name the same file, including targets that do not
/// exist yet.
fn same_file(a: &Path, b: &Path) -> bool {
    resolved(a) == resolved(b)
}

fn resolved(path: &Path) -> PathBuf {
    if let Ok(path) = fs::canonicalize(path) {
        return path;
    }
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

fn cmd_overview(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let data = context.snapshot()?;
    let money = context.money();
    let overview = SummaryService::overview(&data, context.today(), context.config.bill_policy());

    output_section("Overview");
    io::print_info(format!("  Current balance : {}", money.amount(overview.balance.current)));
    io::print_info(format!("  Income          : {}", money.amount(overview.balance.income)));
    io::print_info(format!("  Expenses        : {}", money.amount(overview.balance.expenses)));

    output_section("Pots");
    io::print_info(format!(
        "  Total saved     : {} across {} pots",
        money.amount(overview.pots_saved),
        overview.pot_count
    ));

    output_section("Budgets");
    io::print_info(format!(
        "  Spent           : {} of {} limit",
        money.amount(overview.budget_spent),
        money.amount(overview.budget_limit)
    ));

    output_section("Recurring Bills");
    for status in [
        BillStatus::Paid,
        BillStatus::Unpaid,
        BillStatus::DueSoon,
        BillStatus::Due,
    ] {
        let bucket = overview.bills.bucket(status);
        if status == BillStatus::Due && bucket.count == 0 {
            continue;
        }
        io::print_info(format!(
            "  {:<15} : {} ({})",
            status.label(),
            money.amount(bucket.total),
            bucket.count
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let data = context.snapshot()?;
    let mut table = Table::new(vec![TableColumn::left("Category"), TableColumn::left("Budget")]);
    for category in &data.categories {
        table.push(vec![
            category.name.clone(),
            if category.used_in_budgets { "yes" } else { "-" }.into(),
        ]);
    }
    output_section("Categories");
    io::print_info(table.render());
    Ok(())
}

fn cmd_themes(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let data = context.snapshot()?;
    let mut table = Table::new(vec![
        TableColumn::left("Theme"),
        TableColumn::left("Color"),
        TableColumn::left("Budget"),
        TableColumn::left("Pot"),
    ]);
    let flag = |used: bool| if used { "yes" } else { "-" }.to_string();
    for marker in &data.marker_themes {
        table.push(vec![
            marker.name.clone(),
            marker.color_code.clone(),
            flag(marker.used_in_budgets),
            flag(marker.used_in_pots),
        ]);
    }
    output_section("Marker Themes");
    io::print_info(table.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn differently_spelled_paths_match() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("data.json");
        fs::write(&file, "{}").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        assert!(same_file(&file, &dir.path().join(".").join("data.json")));
        assert!(same_file(&file, &dir.path().join("nested/../data.json")));
        assert!(!same_file(&file, &dir.path().join("other.json")));
    }

    #[test]
    fn missing_targets_resolve_through_their_parent() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("new.json");
        assert!(same_file(&target, &dir.path().join("./new.json")));
        assert!(!same_file(&target, &dir.path().join("newer.json")));
    }
}
