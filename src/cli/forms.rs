//! Field-by-field prompting for a wizard step.
//!
//! The engine walks a copy of a step's [`FieldSet`], asking the interaction
//! for each value and validating it with the field's own kind. Nothing is
//! written back until the user confirms the summary; callers then apply the
//! completed set to the wizard.

use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CommandError;
use crate::cli::output;
use crate::planner::{Field, FieldKind, FieldSet, FieldValue};

const BACK: &str = ":back";
const CANCEL: &str = ":cancel";
const HELP: &str = ":help";
const CLEAR: &str = ":clear";

/// High-level lifecycle states emitted by the form runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResult<T> {
    Completed(T),
    Cancelled,
}

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// Keep the current value.
    Keep,
    /// Remove the current value.
    Clear,
    /// Abort the entire form immediately.
    Cancel,
    /// Go back to the previous field.
    Back,
    /// Request additional information for the current field.
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

pub struct PromptContext<'a> {
    pub title: &'a str,
    pub field: &'a Field,
    pub index: usize,
    pub total: usize,
}

impl PromptContext<'_> {
    pub fn current(&self) -> Option<String> {
        self.field.value.as_ref().map(ToString::to_string)
    }
}

/// Snapshot of collected data displayed before final confirmation.
#[derive(Debug, Default)]
pub struct FormSummary {
    pub entries: Vec<(String, String)>,
}

impl FormSummary {
    pub fn from_fields(fields: &FieldSet) -> Self {
        let entries = fields
            .iter()
            .map(|field| {
                let value = if field.is_missing() {
                    "[unfilled]".to_string()
                } else {
                    field.display_value()
                };
                (field.label.clone(), value)
            })
            .collect();
        Self { entries }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["Review your entries:".to_string()];
        lines.extend(
            self.entries
                .iter()
                .map(|(label, value)| format!("  {}: {}", label, value)),
        );
        lines
    }
}

/// Interaction surface used by the form engine.
pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, summary: &FormSummary, lines: &[String]) -> ConfirmationResponse;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormSessionEvent {
    Moved,
    Repeat,
}

/// Cursor over the fields being edited.
struct FormSession {
    fields: FieldSet,
    keys: Vec<String>,
    index: usize,
}

impl FormSession {
    fn new(fields: FieldSet) -> Self {
        let keys = fields.keys().map(str::to_string).collect();
        Self {
            fields,
            keys,
            index: 0,
        }
    }

    fn is_complete(&self) -> bool {
        self.index >= self.keys.len()
    }

    fn current_field(&self) -> Option<&Field> {
        self.keys.get(self.index).and_then(|key| self.fields.get(key))
    }

    fn apply_response(
        &mut self,
        response: PromptResponse,
    ) -> Result<FormSessionEvent, ValidationError> {
        let Some(key) = self.keys.get(self.index).cloned() else {
            return Ok(FormSessionEvent::Repeat);
        };
        match response {
            PromptResponse::Value(raw) => {
                self.fields
                    .set_raw(&key, &raw)
                    .map_err(|err| ValidationError::new(err.to_string()))?;
                self.index += 1;
                Ok(FormSessionEvent::Moved)
            }
            PromptResponse::Keep => {
                self.index += 1;
                Ok(FormSessionEvent::Moved)
            }
            PromptResponse::Clear => {
                self.fields
                    .clear(&key)
                    .map_err(|err| ValidationError::new(err.to_string()))?;
                self.index += 1;
                Ok(FormSessionEvent::Moved)
            }
            PromptResponse::Back => {
                self.index = self.index.saturating_sub(1);
                Ok(FormSessionEvent::Moved)
            }
            PromptResponse::Help => Ok(FormSessionEvent::Repeat),
            PromptResponse::Cancel => Ok(FormSessionEvent::Repeat),
        }
    }
}

/// Drives a [`FormInteraction`] over a copy of a step's fields.
pub struct FormEngine<'a> {
    title: &'a str,
    initial: &'a FieldSet,
}

impl<'a> FormEngine<'a> {
    pub fn new(title: &'a str, initial: &'a FieldSet) -> Self {
        Self { title, initial }
    }

    pub fn run<I: FormInteraction>(&self, interaction: &mut I) -> FormResult<FieldSet> {
        let mut session = FormSession::new(self.initial.clone());
        let total = session.keys.len();

        loop {
            if session.is_complete() {
                let summary = FormSummary::from_fields(&session.fields);
                match interaction.confirm(&summary, &summary.lines()) {
                    ConfirmationResponse::Confirm => {
                        return FormResult::Completed(session.fields);
                    }
                    ConfirmationResponse::Back if total > 0 => {
                        session.index = total - 1;
                        continue;
                    }
                    ConfirmationResponse::Back | ConfirmationResponse::Cancel => {
                        return FormResult::Cancelled;
                    }
                }
            }

            let Some(field) = session.current_field() else {
                session.index = total;
                continue;
            };
            let context = PromptContext {
                title: self.title,
                field,
                index: session.index,
                total,
            };
            let response = interaction.prompt_field(&context);
            if response == PromptResponse::Help {
                output::info(field_help(field));
            }
            if response == PromptResponse::Cancel {
                return FormResult::Cancelled;
            }

            if let Err(err) = session.apply_response(response) {
                output::warning(err);
            }
        }
    }
}

pub fn field_help(field: &Field) -> String {
    let expected = match field.kind {
        FieldKind::Boolean => "Answer yes or no.",
        FieldKind::Text => "Free text. Leave empty to keep the current value.",
        FieldKind::Integer => "A whole number of zero or more.",
        FieldKind::Date => "A date in YYYY-MM-DD format.",
        FieldKind::Time => "A 24-hour time in HH:MM format.",
    };
    format!("{}: {}", field.label, expected)
}

/// Interactive implementation backed by dialoguer prompts.
pub struct DialoguerInteraction<'t> {
    theme: &'t ColorfulTheme,
}

impl<'t> DialoguerInteraction<'t> {
    pub fn new(theme: &'t ColorfulTheme) -> Self {
        Self { theme }
    }

    fn prompt_boolean(&self, context: &PromptContext<'_>) -> PromptResponse {
        let current = matches!(context.field.value, Some(FieldValue::Boolean(true)));
        match Confirm::with_theme(self.theme)
            .with_prompt(prompt_label(context))
            .default(current)
            .interact_opt()
        {
            Ok(Some(answer)) => PromptResponse::Value(answer.to_string()),
            Ok(None) if context.index > 0 => PromptResponse::Back,
            Ok(None) | Err(_) => PromptResponse::Cancel,
        }
    }

    fn prompt_text(&self, context: &PromptContext<'_>) -> PromptResponse {
        let mut input = Input::<String>::with_theme(self.theme)
            .with_prompt(prompt_label(context))
            .allow_empty(true);
        if let Some(current) = context.current() {
            input = input.with_initial_text(current);
        }
        match input.interact_text() {
            Ok(raw) => parse_special(&raw),
            Err(_) => PromptResponse::Cancel,
        }
    }
}

impl FormInteraction for DialoguerInteraction<'_> {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        match context.field.kind {
            FieldKind::Boolean => self.prompt_boolean(context),
            _ => self.prompt_text(context),
        }
    }

    fn confirm(&mut self, _summary: &FormSummary, lines: &[String]) -> ConfirmationResponse {
        for line in lines {
            output::info(line);
        }
        match Confirm::with_theme(self.theme)
            .with_prompt("Save these values?")
            .default(true)
            .interact_opt()
        {
            Ok(Some(true)) => ConfirmationResponse::Confirm,
            Ok(Some(false)) => ConfirmationResponse::Back,
            Ok(None) | Err(_) => ConfirmationResponse::Cancel,
        }
    }
}

/// Yes/no question outside a form, e.g. before discarding input.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

fn prompt_label(context: &PromptContext<'_>) -> String {
    format!(
        "[{} {}/{}] {}",
        context.title,
        context.index + 1,
        context.total,
        context.field.label
    )
}

/// Maps the `:back`, `:cancel`, `:help` and `:clear` escapes; empty input
/// keeps the current value.
pub(crate) fn parse_special(raw: &str) -> PromptResponse {
    match raw.trim() {
        "" => PromptResponse::Keep,
        BACK => PromptResponse::Back,
        CANCEL => PromptResponse::Cancel,
        HELP => PromptResponse::Help,
        CLEAR => PromptResponse::Clear,
        value => PromptResponse::Value(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct MockInteraction {
        prompts: VecDeque<PromptResponse>,
        confirmations: VecDeque<ConfirmationResponse>,
        seen: Vec<String>,
    }

    impl MockInteraction {
        fn new(prompts: Vec<PromptResponse>, confirmations: Vec<ConfirmationResponse>) -> Self {
            Self {
                prompts: prompts.into(),
                confirmations: confirmations.into(),
                seen: Vec::new(),
            }
        }
    }

    impl FormInteraction for MockInteraction {
        fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
            self.seen.push(context.field.key.clone());
            self.prompts.pop_front().unwrap_or(PromptResponse::Keep)
        }

        fn confirm(&mut self, _summary: &FormSummary, _lines: &[String]) -> ConfirmationResponse {
            self.confirmations
                .pop_front()
                .unwrap_or(ConfirmationResponse::Confirm)
        }
    }

    fn sample() -> FieldSet {
        FieldSet::new()
            .with(Field::date("date", "Date").with_required())
            .with(Field::integer("Bed", "Bed").with_value(FieldValue::Integer(0)))
            .with(Field::boolean("needTruck", "Need a truck"))
    }

    #[test]
    fn form_completes_with_parsed_values() {
        let fields = sample();
        let engine = FormEngine::new("Test", &fields);
        let mut interaction = MockInteraction::new(
            vec![
                PromptResponse::Value("2026-11-02".into()),
                PromptResponse::Value("3".into()),
                PromptResponse::Value("yes".into()),
            ],
            vec![ConfirmationResponse::Confirm],
        );

        let FormResult::Completed(result) = engine.run(&mut interaction) else {
            panic!("form should complete");
        };
        assert_eq!(result.text("date"), "2026-11-02");
        assert_eq!(result.integer("Bed"), 3);
        assert!(result.bool("needTruck"));
    }

    #[test]
    fn invalid_input_reprompts_same_field() {
        let fields = sample();
        let engine = FormEngine::new("Test", &fields);
        let mut interaction = MockInteraction::new(
            vec![
                PromptResponse::Value("next tuesday".into()),
                PromptResponse::Value("2026-11-02".into()),
                PromptResponse::Value("-1".into()),
                PromptResponse::Value("1".into()),
                PromptResponse::Keep,
            ],
            vec![],
        );

        let FormResult::Completed(result) = engine.run(&mut interaction) else {
            panic!("form should complete");
        };
        assert_eq!(interaction.seen, ["date", "date", "Bed", "Bed", "needTruck"]);
        assert_eq!(result.integer("Bed"), 1);
        assert!(!result.bool("needTruck"));
    }

    #[test]
    fn back_revisits_previous_field() {
        let fields = sample();
        let engine = FormEngine::new("Test", &fields);
        let mut interaction = MockInteraction::new(
            vec![
                PromptResponse::Value("2026-11-02".into()),
                PromptResponse::Back,
                PromptResponse::Value("2026-11-03".into()),
                PromptResponse::Keep,
                PromptResponse::Keep,
            ],
            vec![],
        );

        let FormResult::Completed(result) = engine.run(&mut interaction) else {
            panic!("form should complete");
        };
        assert_eq!(result.text("date"), "2026-11-03");
    }

    #[test]
    fn cancel_leaves_input_untouched() {
        let fields = sample();
        let engine = FormEngine::new("Test", &fields);
        let mut interaction = MockInteraction::new(
            vec![PromptResponse::Value("2026-11-02".into()), PromptResponse::Cancel],
            vec![],
        );

        assert_eq!(engine.run(&mut interaction), FormResult::Cancelled);
        assert!(fields.get("date").is_some_and(Field::is_missing));
    }

    #[test]
    fn declining_confirmation_returns_to_last_field() {
        let fields = sample();
        let engine = FormEngine::new("Test", &fields);
        let mut interaction = MockInteraction::new(
            vec![
                PromptResponse::Keep,
                PromptResponse::Keep,
                PromptResponse::Keep,
                PromptResponse::Value("y".into()),
            ],
            vec![ConfirmationResponse::Back, ConfirmationResponse::Confirm],
        );

        let FormResult::Completed(result) = engine.run(&mut interaction) else {
            panic!("form should complete");
        };
        assert!(result.bool("needTruck"));
        assert_eq!(interaction.seen.last().map(String::as_str), Some("needTruck"));
    }

    #[test]
    fn empty_field_set_goes_straight_to_confirmation() {
        let fields = FieldSet::new();
        let engine = FormEngine::new("Items", &fields);
        let mut interaction = MockInteraction::new(vec![], vec![ConfirmationResponse::Confirm]);

        assert_eq!(
            engine.run(&mut interaction),
            FormResult::Completed(FieldSet::new())
        );
        assert!(interaction.seen.is_empty());
    }

    #[test]
    fn special_inputs_map_to_responses() {
        assert_eq!(parse_special("  "), PromptResponse::Keep);
        assert_eq!(parse_special(":back"), PromptResponse::Back);
        assert_eq!(parse_special(":clear"), PromptResponse::Clear);
        assert_eq!(parse_special(" 4 "), PromptResponse::Value("4".into()));
    }
}
