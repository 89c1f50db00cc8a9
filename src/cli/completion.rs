use std::mem;

use rustyline::{
    completion::{Completer, Pair},
    highlight::Highlighter,
    hint::Hinter,
    validate::Validator,
    Context as ReadlineContext, Helper,
};

use crate::{
    config::Config,
    domain::{
        category::default_categories, marker::default_marker_themes, FinanceData,
    },
};

const SORT_ORDERS: &[&str] = &["latest", "oldest", "a-z", "z-a", "highest", "lowest"];

/// Tab completion for command names, actions and the names found in the
/// loaded snapshot.
pub(crate) struct CompletionHelper {
    commands: Vec<String>,
    bills: Vec<String>,
    pots: Vec<String>,
    budgets: Vec<String>,
    categories: Vec<String>,
    themes: Vec<String>,
    config_keys: Vec<String>,
}

impl CompletionHelper {
    pub(crate) fn new(names: Vec<&'static str>) -> Self {
        let mut helper = Self {
            commands: sorted(names.into_iter().map(str::to_ascii_lowercase)),
            bills: Vec::new(),
            pots: Vec::new(),
            budgets: Vec::new(),
            categories: Vec::new(),
            themes: Vec::new(),
            config_keys: sorted(
                Config::default()
                    .entries()
                    .into_iter()
                    .map(|(key, _)| key.to_string()),
            ),
        };
        helper.refresh(None);
        helper
    }

    /// Re-reads entity names after a command may have changed the snapshot.
    pub(crate) fn refresh(&mut self, data: Option<&FinanceData>) {
        let Some(data) = data else {
            self.bills.clear();
            self.pots.clear();
            self.budgets.clear();
            self.categories = sorted(default_categories().into_iter().map(|c| c.name));
            self.themes = sorted(default_marker_themes().into_iter().map(|m| m.name));
            return;
        };
        self.bills = sorted(data.recurring_bills.iter().map(|bill| bill.name.clone()));
        self.pots = sorted(data.pots.iter().map(|pot| pot.name.clone()));
        self.budgets = sorted(data.budgets.iter().map(|budget| budget.category.clone()));
        self.categories = if data.categories.is_empty() {
            sorted(default_categories().into_iter().map(|c| c.name))
        } else {
            sorted(data.categories.iter().map(|c| c.name.clone()))
        };
        self.themes = if data.marker_themes.is_empty() {
            sorted(default_marker_themes().into_iter().map(|m| m.name))
        } else {
            sorted(data.marker_themes.iter().map(|m| m.name.clone()))
        };
    }

    /// Start offset of the word under the cursor and its replacements.
    pub(crate) fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let (words, start, current) = split_words(prefix);
        let pool = self.pool_for(&words);
        let needle = current.to_lowercase();
        let matches = pool
            .iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&needle))
            .map(|candidate| shell_words::quote(candidate).into_owned())
            .collect();
        (start, matches)
    }

    fn pool_for(&self, words: &[String]) -> Vec<String> {
        let lowered: Vec<String> = words.iter().map(|word| word.to_lowercase()).collect();
        let words: Vec<&str> = lowered.iter().map(String::as_str).collect();

        if let Some(flag) = words.last().and_then(|word| word.strip_prefix("--")) {
            return match flag {
                "category" => self.categories.clone(),
                "theme" => self.themes.clone(),
                "sort" => SORT_ORDERS.iter().map(|order| order.to_string()).collect(),
                _ => Vec::new(),
            };
        }

        match words.as_slice() {
            [] | ["help"] => self.commands.clone(),
            ["bill"] => actions(&["add", "edit", "remove", "pay"]),
            ["budget"] => actions(&["add", "edit", "remove"]),
            ["pot"] => actions(&["add", "edit", "remove", "deposit", "withdraw"]),
            ["config"] => actions(&["show", "set", "path"]),
            ["bill", "edit" | "remove" | "pay"] => self.bills.clone(),
            ["bill", "add", _] => self.categories.clone(),
            ["bill", "add", _, _, _, _] => self.themes.clone(),
            ["pot", "edit" | "remove" | "deposit" | "withdraw"] => self.pots.clone(),
            ["pot", "add", _, _] => self.themes.clone(),
            ["budget", "edit" | "remove"] => self.budgets.clone(),
            ["budget", "add"] => self.categories.clone(),
            ["budget", "add", _, _] => self.themes.clone(),
            ["config", "set"] => self.config_keys.clone(),
            _ => Vec::new(),
        }
    }
}

fn sorted(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut names: Vec<String> = names.collect();
    names.sort_by_key(|name| name.to_lowercase());
    names.dedup();
    names
}

fn actions(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Splits the text before the cursor into finished words, the byte offset of
/// the word being typed and that word with quotes removed.
fn split_words(prefix: &str) -> (Vec<String>, usize, String) {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut start = prefix.len();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for (idx, ch) in prefix.char_indices() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                if !in_word {
                    start = idx;
                    in_word = true;
                }
                quote = Some(ch);
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                if !in_word {
                    start = idx;
                    in_word = true;
                }
                current.push(ch);
            }
        }
    }
    if !in_word {
        start = prefix.len();
    }
    (words, start, current)
}

impl Helper for CompletionHelper {}

impl Completer for CompletionHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|replacement| Pair {
                display: replacement.clone(),
                replacement,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CompletionHelper {
    type Hint = String;
}

impl Highlighter for CompletionHelper {}

impl Validator for CompletionHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, Pot};

    fn helper() -> CompletionHelper {
        let mut data = FinanceData::default();
        data.pots.push(Pot::new("Savings", 2000.0, "#277C78"));
        data.pots.push(Pot::new("Concert Ticket", 150.0, "#626070"));
        data.budgets.push(Budget::new("Entertainment", 50.0, "#277C78"));
        let mut helper =
            CompletionHelper::new(vec!["pots", "pot", "bills", "bill", "budget", "help"]);
        helper.refresh(Some(&data));
        helper
    }

    #[test]
    fn completes_commands_then_actions() {
        let helper = helper();
        assert_eq!(helper.candidates("po"), (0, vec!["pot".to_string(), "pots".to_string()]));
        assert_eq!(
            helper.candidates("pot w"),
            (4, vec!["withdraw".to_string()])
        );
        assert_eq!(helper.candidates("bill ").1, vec!["add", "edit", "remove", "pay"]);
    }

    #[test]
    fn completes_names_from_the_snapshot() {
        let helper = helper();
        assert_eq!(
            helper.candidates("pot deposit c"),
            (12, vec!["'Concert Ticket'".to_string()])
        );
        assert_eq!(
            helper.candidates("pot remove 'Conc"),
            (11, vec!["'Concert Ticket'".to_string()])
        );
        assert_eq!(helper.candidates("budget edit e").1, vec!["Entertainment"]);
        assert!(helper.candidates("bill pay ").1.is_empty());
    }

    #[test]
    fn completes_flag_values_and_config_keys() {
        let helper = helper();
        assert_eq!(helper.candidates("bills --sort hi").1, vec!["highest"]);
        assert!(helper
            .candidates("budget edit Entertainment --category ")
            .1
            .contains(&"Bills".to_string()));
        assert_eq!(helper.candidates("config set page").1, vec!["page_size"]);
    }

    #[test]
    fn refresh_without_data_forgets_names() {
        let mut helper = helper();
        helper.refresh(None);
        assert!(helper.candidates("pot edit ").1.is_empty());
        assert!(!helper.candidates("pot add Car 100 ").1.is_empty());
    }
}
