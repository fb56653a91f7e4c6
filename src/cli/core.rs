//! Shell context, dispatch and the error types shared by command handlers.

use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    catalog::RoomCatalog,
    config::{Config, ConfigManager},
    dispatch::{DispatchData, DispatchError, JobBoard, Roster, ScheduleSession},
    domain::Employee,
    errors::PlannerError,
    planner::WizardController,
    submission::JsonOutbox,
};

use super::commands;
use super::forms;
use super::output as cli_output;
use super::registry::{CommandEntry, CommandRegistry};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failures reported by individual commands; the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("Command failed: {0}")]
    Command(String),
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub wizard: WizardController<'static>,
    pub outbox: JsonOutbox,
    pub roster: Roster,
    pub board: JobBoard,
    pub schedule: ScheduleSession,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        let outbox = JsonOutbox::new(config_manager.outbox_dir(&config))?;
        let (roster, board) = DispatchData::load(&config_manager.dispatch_file())?.split();

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            wizard: WizardController::initialized(RoomCatalog::standard()),
            outbox,
            roster,
            board,
            schedule: ScheduleSession::default(),
            last_command: None,
            running: true,
        })
    }

    pub fn prompt(&self) -> String {
        format!("move-planner[{}]> ", self.wizard.active_step())
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        tracing::debug!(command, args = args.len(), "dispatching command");
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub fn suggest_command(&self, raw: &str) {
        let needle = raw.to_lowercase();
        let closest = self
            .registry
            .names()
            .map(|name| (levenshtein(&needle, name), name))
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance);
        match closest {
            Some((_, name)) => cli_output::warning(format!(
                "Unknown command `{}`. Did you mean `{}`?",
                raw, name
            )),
            None => cli_output::warning(format!(
                "Unknown command `{}`. Type `help` to list commands.",
                raw
            )),
        }
    }

    pub fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        tracing::debug!(error = %err, last = ?self.last_command, "command failed");
        cli_output::error(&err);
        Ok(())
    }

    pub fn print_warning(&self, message: &str) {
        cli_output::warning(message);
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        forms::confirm_action(&self.theme, "Exit the planner?", true)
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn persist_dispatch(&self) -> Result<(), CommandError> {
        DispatchData::join(&self.roster, &self.board).save(&self.config_manager.dispatch_file())?;
        Ok(())
    }

    /// The roster entry dashboard commands act on behalf of.
    pub(crate) fn acting_employee(&self) -> Result<Employee, CommandError> {
        let user_name = self.config.acting_employee.as_deref().ok_or_else(|| {
            CommandError::Message("No acting employee. Use `config set acting_employee <user>` first.".into())
        })?;
        Ok(self.roster.by_user_name(user_name)?.clone())
    }
}
