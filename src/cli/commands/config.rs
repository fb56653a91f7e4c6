use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::submission::JsonOutbox;

const KEYS: &[&str] = &[
    "customer.user_name",
    "customer.first_name",
    "customer.last_name",
    "customer.email",
    "customer.phone_primary",
    "customer.phone_other",
    "outbox_dir",
    "default_crew_size",
    "acting_employee",
];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change customer details and preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    KEYS.join("|")
                )));
            }
            let value = args[2..].join(" ");
            set_config_value(context, args[1], value.trim())?;
            context.persist_config()?;
            output::success(format!("{} updated.", args[1]));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  File              : {}", context.config_manager.path().display()));
    output::info(format!("  Customer          : {}", config.customer.full_name()));
    output::info(format!("  User name         : {}", config.customer.user_name));
    output::info(format!("  Email             : {}", config.customer.email));
    output::info(format!("  Phone             : {}", config.customer.phone_primary));
    if !config.customer.phone_other.is_empty() {
        output::info(format!("  Other phone       : {}", config.customer.phone_other));
    }
    output::info(format!("  Outbox            : {}", context.outbox.dir().display()));
    output::info(format!("  Default crew size : {}", config.default_crew_size));
    output::info(format!(
        "  Acting employee   : {}",
        config.acting_employee.as_deref().unwrap_or("(none)")
    ));
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let customer = &mut context.config.customer;
    match key {
        "customer.user_name" => customer.user_name = value.to_string(),
        "customer.first_name" => customer.first_name = value.to_string(),
        "customer.last_name" => customer.last_name = value.to_string(),
        "customer.email" => customer.email = value.to_string(),
        "customer.phone_primary" => customer.phone_primary = value.to_string(),
        "customer.phone_other" => customer.phone_other = value.to_string(),
        "outbox_dir" => {
            let dir = (!value.is_empty()).then(|| PathBuf::from(value));
            context.config.outbox_dir = dir;
            let dir = context.config_manager.outbox_dir(&context.config);
            context.outbox = JsonOutbox::new(dir)?;
        }
        "default_crew_size" => {
            let size: u32 = value.parse().map_err(|_| {
                CommandError::InvalidArguments("crew size must be a whole number".into())
            })?;
            if size == 0 {
                return Err(CommandError::InvalidArguments(
                    "crew size must be at least 1".into(),
                ));
            }
            context.config.default_crew_size = size;
        }
        "acting_employee" => {
            if value.is_empty() {
                context.config.acting_employee = None;
                context.schedule.job.clear();
            } else {
                let employee = context.roster.by_user_name(value)?.clone();
                context.config.acting_employee = Some(employee.user_name.clone());
                context.board.sync_session(&mut context.schedule, &employee)?;
            }
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{}`; expected one of: {}",
                other,
                KEYS.join(", ")
            )))
        }
    }
    Ok(())
}
