pub mod bills;
pub mod budgets;
pub mod config;
pub mod data;
pub mod pots;
pub mod system;
pub mod transactions;

use crate::cli::core::{closest_match, CommandError};
use crate::cli::registry::CommandRegistry;
use crate::domain::NamedEntity;

pub fn register_all(registry: &mut CommandRegistry) {
    let groups = [
        data::definitions(),
        bills::definitions(),
        budgets::definitions(),
        pots::definitions(),
        transactions::definitions(),
        config::definitions(),
        system::definitions(),
    ];
    for entry in groups.into_iter().flatten() {
        registry.register(entry);
    }
}

/// Positional arguments plus `--key value` options.
#[derive(Debug, Default)]
pub(crate) struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: Vec<(&'a str, &'a str)>,
}

impl<'a> ParsedArgs<'a> {
    pub fn option(&self, key: &str) -> Option<&'a str> {
        self.options
            .iter()
            .rev()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }

    pub fn positional(&self, idx: usize, what: &str) -> Result<&'a str, CommandError> {
        self.positional
            .get(idx)
            .copied()
            .ok_or_else(|| CommandError::InvalidArguments(format!("missing {}", what)))
    }
}

pub(crate) fn parse_args<'a>(
    args: &[&'a str],
    allowed: &[&str],
) -> Result<ParsedArgs<'a>, CommandError> {
    let mut parsed = ParsedArgs::default();
    let mut iter = args.iter().copied();
    while let Some(arg) = iter.next() {
        match arg.strip_prefix("--") {
            Some(key) if !key.is_empty() => {
                if !allowed.contains(&key) {
                    let hint = closest_match(key, allowed.iter().copied())
                        .map(|best| format!(" (did you mean `--{}`?)", best))
                        .unwrap_or_default();
                    return Err(CommandError::InvalidArguments(format!(
                        "unknown option `--{}`{}",
                        key, hint
                    )));
                }
                let value = iter.next().ok_or_else(|| {
                    CommandError::InvalidArguments(format!("option `--{}` needs a value", key))
                })?;
                parsed.options.push((key, value));
            }
            _ => parsed.positional.push(arg),
        }
    }
    Ok(parsed)
}

/// Parses `1,234.50`, `$75` or `-20` into a number.
pub(crate) fn parse_amount(field: &str, raw: &str) -> Result<f64, CommandError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '$' | '€' | '£' | '_'))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("{} must be a number, got `{}`", field, raw))
        })
}

/// Resolves an entity by name, suggesting a close name when nothing matches.
pub(crate) fn resolve_named<'a, T: NamedEntity>(
    kind: &str,
    name: &str,
    found: Option<&'a T>,
    items: &'a [T],
) -> Result<&'a T, CommandError> {
    found.ok_or_else(|| {
        let hint = closest_match(name, items.iter().map(NamedEntity::name))
            .map(|best| format!(" Did you mean `{}`?", best))
            .unwrap_or_default();
        CommandError::InvalidArguments(format!("No {} named `{}`.{}", kind, name, hint))
    })
}

pub(crate) fn require_subcommand<'a>(
    args: &[&'a str],
    usage: &str,
) -> Result<(&'a str, Vec<&'a str>), CommandError> {
    match args.split_first() {
        Some((sub, rest)) => Ok((*sub, rest.to_vec())),
        None => Err(CommandError::InvalidArguments(format!("usage: {}", usage))),
    }
}
