//! Shell context construction, dispatch and error reporting.

use std::{env, io, path::Path, sync::Arc};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;

use crate::{
    config::ConfigManager,
    core::{
        errors::FinanceError,
        services::{ServiceError, ServiceResult},
        time::{Clock, FixedClock, SystemClock},
        CancelToken, FinanceStore,
    },
    currency::MoneyFormat,
    domain::FinanceData,
    storage::JsonFileSource,
};

pub use crate::core::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

/// Pins "today" for the shell, e.g. `FINANCE_CORE_TODAY=2024-08-19`.
pub const TODAY_ENV: &str = "FINANCE_CORE_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        cli_io::apply_config(&config);

        let mut context = ShellContext {
            mode,
            registry,
            store: FinanceStore::new(),
            source: None,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            clock: clock_from_env()?,
            last_command: None,
            running: true,
        };
        context.auto_load_default();
        Ok(context)
    }

    fn auto_load_default(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(path) = self.config.data_file.clone() else {
            return;
        };
        match self.load_from(&path) {
            Ok(()) => cli_io::print_success(format!(
                "Automatically loaded `{}`.",
                path.display()
            )),
            Err(err) => cli_io::print_warning(format!(
                "Could not load default data file `{}`: {}",
                path.display(),
                err
            )),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        match self.source.as_ref().and_then(|source| source.path().file_name()) {
            Some(name) => format!("finance [{}]> ", name.to_string_lossy()),
            None => "finance> ".to_string(),
        }
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(crate) fn snapshot(&self) -> Result<Arc<FinanceData>, CommandError> {
        self.store.snapshot().map_err(CommandError::from)
    }

    /// Runs a service mutation against the store.
    pub(crate) fn update<T, F>(&mut self, f: F) -> Result<T, CommandError>
    where
        F: FnOnce(&mut FinanceData) -> ServiceResult<T>,
    {
        self.store.update(f).map_err(CommandError::from)
    }

    /// Money formatting for the loaded document, falling back to the configured currency.
    pub(crate) fn money(&self) -> MoneyFormat {
        match self.store.snapshot() {
            Ok(data) => MoneyFormat::new(&data.settings.currency, &data.settings.locale),
            Err(_) => MoneyFormat::new(&self.config.currency, &self.config.locale),
        }
    }

    pub(crate) fn load_from(&mut self, path: &Path) -> CommandResult {
        let source = JsonFileSource::new(path);
        let metadata = self.store.load(&source, &CancelToken::new())?;
        for warning in &metadata.warnings {
            cli_io::print_warning(warning);
        }
        self.source = Some(source);
        Ok(())
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Asks before a destructive action; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = closest_match(input, self.registry.names()) {
            cli_io::print_hint(format!("Did you mean `{}`?", best));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            CommandError::DataNotLoaded => {
                cli_io::print_error("No finance data loaded.");
                cli_io::print_hint("Use `load <path>` to open a data file.");
            }
            CommandError::Service(ServiceError::Validation(errors)) => {
                cli_io::print_error("Please fix the following:");
                for error in errors {
                    cli_io::print_info(format!("  {}", error));
                }
            }
            other => cli_io::print_error(other),
        }
        Ok(())
    }
}

fn clock_from_env() -> Result<Box<dyn Clock>, CliError> {
    match env::var(TODAY_ENV) {
        Ok(value) => {
            let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                CliError::Input(format!("{} must be YYYY-MM-DD, got `{}`", TODAY_ENV, value))
            })?;
            Ok(Box::new(FixedClock::on(date)))
        }
        Err(_) => Ok(Box::new(SystemClock)),
    }
}

/// Closest candidate within an edit distance of 3, ignoring case.
pub(crate) fn closest_match<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let needle = input.to_lowercase();
    candidates
        .into_iter()
        .map(|candidate| (levenshtein(&candidate.to_lowercase(), &needle), candidate))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No finance data loaded. Use `load <path>` first.")]
    DataNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(FinanceError),
    #[error(transparent)]
    Service(ServiceError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<FinanceError> for CommandError {
    fn from(err: FinanceError) -> Self {
        match err {
            FinanceError::NotLoaded => CommandError::DataNotLoaded,
            other => CommandError::Core(other),
        }
    }
}

impl From<ServiceError> for CommandError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Core(err) => err.into(),
            ServiceError::Invalid(message) => CommandError::InvalidArguments(message),
            other => CommandError::Service(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Budget, FinanceData};
    use tempfile::TempDir;

    fn context(temp: &TempDir) -> ShellContext {
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let mut context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();
        context.clock = Box::new(FixedClock::on(NaiveDate::from_ymd_opt(2024, 8, 19).unwrap()));
        context
    }

    #[test]
    fn suggestions_tolerate_typos() {
        let names = ["overview", "budgets", "bills"];
        assert_eq!(closest_match("overveiw", names), Some("overview"));
        assert_eq!(closest_match("BILS", names), Some("bills"));
        assert_eq!(closest_match("zzzzzzzzzz", names), None);
    }

    #[test]
    fn commands_require_loaded_data() {
        let temp = TempDir::new().unwrap();
        let mut context = context(&temp);
        let err = context.process_line("overview").unwrap_err();
        assert!(matches!(err, CommandError::DataNotLoaded));
    }

    #[test]
    fn validation_errors_keep_their_fields() {
        let temp = TempDir::new().unwrap();
        let mut context = context(&temp);
        let mut data = FinanceData::default();
        data.budgets.push(Budget::new("Bills", 100.0, "#277C78"));
        context.store.replace(data, "test");

        let err = context
            .process_line("budget add Bills 50 Green")
            .unwrap_err();
        match err {
            CommandError::Service(ServiceError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|error| error.field).collect();
                assert_eq!(fields, ["category", "theme"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn exit_stops_the_loop() {
        let temp = TempDir::new().unwrap();
        let mut context = context(&temp);
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
        assert_eq!(context.process_line("").unwrap(), LoopControl::Continue);
    }
}
