use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

const CONFIG_USAGE: &str = "config [show|set <key> <value>|path]
keys: locale, currency, bills_lookahead_days, page_size, data_file, ui_color_enabled";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let action = args.first().map(|action| action.to_lowercase());
    match action.as_deref() {
        None | Some("show") => {
            output_section("Configuration");
            for (key, value) in context.config.entries() {
                io::print_info(format!("  {:<22} {}", key, value));
            }
            Ok(())
        }
        Some("path") => {
            io::print_info(context.config_manager.path().display());
            Ok(())
        }
        Some("set") => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: {}",
                    CONFIG_USAGE
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            updated.set(key, &value)?;
            context.config = updated;
            context.persist_config()?;
            io::apply_config(&context.config);
            io::print_success(format!("Set {}.", key));
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; expected show, set or path",
            other
        ))),
    }
}
