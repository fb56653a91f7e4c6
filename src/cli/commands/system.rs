use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::catalog::RoomCatalog;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "version",
            "Show build, catalog and data directory details",
            "version",
            cmd_version,
        ),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    let catalog = RoomCatalog::standard();
    output::section(format!("Move Planner {}", meta.version));
    output::info(format!(
        "  build    {} ({}, {})",
        meta.git_hash, meta.git_status, meta.profile
    ));
    output::info(format!(
        "  built    {} for {} with {}",
        meta.timestamp, meta.target, meta.rustc
    ));
    output::info(format!(
        "  catalog  {} rooms, {} specialty items",
        catalog.list_rooms().len(),
        catalog.specialty_items().len()
    ));
    output::info(format!("  data     {}", context.config_manager.base_dir().display()));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry, context.wizard.active_step());
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
