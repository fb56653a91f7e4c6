use std::{
    fmt,
    io::{self, BufRead},
    path::PathBuf,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::{quote, split};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

/// Selects script mode: commands are read line by line from stdin.
pub const SCRIPT_ENV: &str = "MOVE_PLANNER_CLI_SCRIPT";

const HISTORY_FILE: &str = "history.txt";

/// Commands whose first argument is a field key of the active step.
const FIELD_COMMANDS: &[&str] = &["set"];

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    if mode == CliMode::Script {
        output::disable_colors();
    }

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    let history = history_path(context);
    if let Err(err) = editor.load_history(&history) {
        tracing::debug!(path = %history.display(), error = %err, "no shell history loaded");
    }

    while context.running {
        if let Some(helper) = editor.helper_mut() {
            helper.set_fields(active_field_keys(context));
        }

        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Goodbye.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Err(err) = editor.save_history(&history) {
        tracing::warn!(path = %history.display(), error = %err, "failed to save shell history");
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        if line.trim_start().starts_with('#') {
            continue;
        }
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn history_path(context: &ShellContext) -> PathBuf {
    context.config_manager.base_dir().join(HISTORY_FILE)
}

fn active_field_keys(context: &ShellContext) -> Vec<String> {
    context
        .wizard
        .current_field_set()
        .map(|set| set.keys().map(str::to_string).collect())
        .unwrap_or_default()
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };
    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Tab completion: command names first, then the active step's field keys after `set`.
struct CommandHelper {
    commands: Vec<String>,
    fields: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            fields: Vec::new(),
        }
    }

    fn set_fields(&mut self, fields: Vec<String>) {
        self.fields = fields;
    }

    fn candidates(&self, line: &str) -> (usize, Vec<Pair>) {
        let start = line
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = &line[start..];
        let preceding: Vec<&str> = line[..start].split_whitespace().collect();

        let pairs = match preceding.as_slice() {
            [] => {
                let needle = needle.to_ascii_lowercase();
                self.commands
                    .iter()
                    .filter(|name| name.starts_with(&needle))
                    .map(|name| pair(name, name.clone()))
                    .collect()
            }
            [command] if FIELD_COMMANDS.contains(&command.to_ascii_lowercase().as_str()) => self
                .fields
                .iter()
                .filter(|key| key.starts_with(needle))
                .map(|key| pair(key, quote(key).into_owned()))
                .collect(),
            _ => Vec::new(),
        };
        (start, pairs)
    }
}

fn pair(display: &str, replacement: String) -> Pair {
    Pair {
        display: display.to_string(),
        replacement,
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(&line[..pos]))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(helper: &CommandHelper, line: &str) -> (usize, Vec<String>) {
        let (start, pairs) = helper.candidates(line);
        (start, pairs.into_iter().map(|p| p.replacement).collect())
    }

    #[test]
    fn quoted_arguments_stay_together() {
        let tokens = parse_command_line(r#"set fromAddress "12 Elm Street""#).unwrap();
        assert_eq!(tokens, ["set", "fromAddress", "12 Elm Street"]);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let err = parse_command_line("request \"no end").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn completion_candidates_are_sorted_and_unique() {
        let helper = CommandHelper::new(vec!["step", "steps", "Step", "show"]);
        assert_eq!(helper.commands, ["show", "step", "steps"]);
        assert_eq!(
            replacements(&helper, "ST"),
            (0, vec!["step".to_string(), "steps".to_string()])
        );
    }

    #[test]
    fn set_completes_field_keys_of_the_active_step() {
        let mut helper = CommandHelper::new(vec!["set", "show"]);
        helper.set_fields(vec![
            "Bed".to_string(),
            "Bedside Table".to_string(),
            "Dresser".to_string(),
        ]);

        assert_eq!(
            replacements(&helper, "set Be"),
            (4, vec!["Bed".to_string(), "'Bedside Table'".to_string()])
        );
        assert_eq!(replacements(&helper, "show Be").1, Vec::<String>::new());
        assert_eq!(replacements(&helper, "set Bed 3").1, Vec::<String>::new());
    }
}
