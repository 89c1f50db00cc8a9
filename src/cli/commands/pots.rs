use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::{PotDraft, PotService};
use crate::domain::{Displayable, FinanceData, Pot};

use super::{parse_amount, parse_args, require_subcommand, resolve_named};

const POT_USAGE: &str = "pot add <name> <target> <theme>
pot edit <name> [--name N] [--target T] [--theme T]
pot remove <name>
pot deposit <name> <amount>
pot withdraw <name> <amount>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("pots", "Show savings pots", "pots", cmd_pots),
        CommandEntry::new(
            "pot",
            "Manage a savings pot or move money in and out of it",
            POT_USAGE,
            cmd_pot,
        ),
    ]
}

fn cmd_pots(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let data = context.snapshot()?;
    let money = context.money();
    output_section("Pots");
    if data.pots.is_empty() {
        io::print_info("No pots yet. Add one with `pot add`.");
        return Ok(());
    }
    let mut table = Table::new(vec![
        TableColumn::left("Pot"),
        TableColumn::left("Theme"),
        TableColumn::right("Saved"),
        TableColumn::right("Target"),
        TableColumn::right("Progress"),
    ]);
    for pot in &data.pots {
        let theme = data
            .marker(&pot.theme)
            .map(|marker| marker.name.clone())
            .unwrap_or_else(|| pot.theme.clone());
        table.push(vec![
            pot.name.clone(),
            theme,
            money.amount(pot.total),
            money.amount(pot.target),
            format!("{:.2}%", pot.progress_percent()),
        ]);
    }
    io::print_info(table.render());
    io::print_info(format!(
        "Total saved: {}",
        money.amount(PotService::total_saved(&data))
    ));
    Ok(())
}

fn cmd_pot(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (sub, rest) = require_subcommand(args, POT_USAGE)?;
    match sub.to_lowercase().as_str() {
        "add" => pot_add(context, &rest),
        "edit" => pot_edit(context, &rest),
        "remove" | "rm" | "delete" => pot_remove(context, &rest),
        "deposit" | "add-money" => pot_move(context, &rest, Direction::Deposit),
        "withdraw" => pot_move(context, &rest, Direction::Withdraw),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown pot action `{}`; expected add, edit, remove, deposit or withdraw",
            other
        ))),
    }
}

fn pot_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &[])?;
    let draft = PotDraft {
        name: parsed.positional(0, "pot name")?.to_string(),
        target: parse_amount("target", parsed.positional(1, "target")?)?,
        theme: parsed.positional(2, "theme")?.to_string(),
    };
    let name = draft.name.trim().to_string();
    context.update(|data| PotService::add(data, draft))?;
    io::print_success(format!("Pot `{}` added.", name));
    Ok(())
}

fn pot_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = parse_args(args, &["name", "target", "theme"])?;
    let target_name = parsed.positional(0, "pot name")?;
    let data = context.snapshot()?;
    let current = find_pot(&data, target_name)?;
    let id = current.id;
    let draft = PotDraft {
        name: parsed.option("name").unwrap_or(current.name.as_str()).to_string(),
        target: match parsed.option("target") {
            Some(raw) => parse_amount("target", raw)?,
            None => current.target,
        },
        theme: parsed.option("theme").unwrap_or(current.theme.as_str()).to_string(),
    };
    context.update(|data| PotService::edit(data, id, draft))?;
    io::print_success(format!("Pot `{}` updated.", target_name));
    Ok(())
}

fn pot_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: pot remove <name>".into()))?;
    let data = context.snapshot()?;
    let pot = find_pot(&data, name)?;
    let id = pot.id;
    if !context.confirm(&format!(
        "Remove pot {}? Its savings return to the balance.",
        pot.display_label()
    ))? {
        io::print_info("Nothing removed.");
        return Ok(());
    }
    let removed = context.update(|data| PotService::remove(data, id))?;
    io::print_success(format!(
        "Pot `{}` removed; {} returned to the balance.",
        removed.name,
        context.money().amount(removed.total)
    ));
    Ok(())
}

#[derive(Clone, Copy)]
enum Direction {
    Deposit,
    Withdraw,
}

fn pot_move(context: &mut ShellContext, args: &[&str], direction: Direction) -> CommandResult {
    let parsed = parse_args(args, &[])?;
    let name = parsed.positional(0, "pot name")?;
    let amount = parse_amount("amount", parsed.positional(1, "amount")?)?;
    let data = context.snapshot()?;
    let id = find_pot(&data, name)?.id;
    let total = context.update(|data| match direction {
        Direction::Deposit => PotService::deposit(data, id, amount),
        Direction::Withdraw => PotService::withdraw(data, id, amount),
    })?;
    let money = context.money();
    let verb = match direction {
        Direction::Deposit => "Added",
        Direction::Withdraw => "Withdrew",
    };
    io::print_success(format!(
        "{} {}; `{}` now holds {}.",
        verb,
        money.amount(amount),
        name,
        money.amount(total)
    ));
    Ok(())
}

fn find_pot<'a>(data: &'a FinanceData, name: &str) -> Result<&'a Pot, CommandError> {
    resolve_named("pot", name, PotService::find_by_name(data, name), &data.pots)
}
