use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::{time::Clock, FinanceStore},
    storage::JsonFileSource,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: FinanceStore,
    pub source: Option<JsonFileSource>,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub clock: Box<dyn Clock>,
    pub last_command: Option<String>,
    pub running: bool,
}
