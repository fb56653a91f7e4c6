//! Line-oriented shell driving the planner wizard and the crew dashboard.

pub mod commands;
pub mod core;
pub mod forms;
pub mod help;
pub mod output;
pub mod registry;
mod shell;

pub use self::core::{CliError, CliMode, CommandError, CommandResult, ShellContext};
pub use self::shell::{run_cli, SCRIPT_ENV};
