use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms::{self, DialoguerInteraction, FormEngine, FormResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::NamedEntity;
use crate::planner::{FieldSet, WizardStep};

use super::parse_position;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("steps", "List the wizard steps", "steps", cmd_steps),
        CommandEntry::new("step", "Go to a wizard step", "step <number>", cmd_step),
        CommandEntry::new(
            "show",
            "Show the fields of the active or given step",
            "show [number]",
            cmd_show,
        ),
        CommandEntry::new(
            "set",
            "Set a field of the active step",
            "set <field> <value>",
            cmd_set,
        ),
        CommandEntry::new(
            "fill",
            "Fill the active step field by field",
            "fill",
            cmd_fill,
        ),
        CommandEntry::new(
            "request",
            "Add a special request",
            "request <text>",
            cmd_request,
        ),
        CommandEntry::new(
            "rooms",
            "List the selected rooms and their items",
            "rooms",
            cmd_rooms,
        ),
        CommandEntry::new(
            "preview",
            "Print the estimate request as JSON",
            "preview",
            cmd_preview,
        ),
        CommandEntry::new(
            "submit",
            "Submit the estimate request to the outbox",
            "submit",
            cmd_submit,
        ),
        CommandEntry::new("reset", "Discard all wizard input", "reset", cmd_reset),
        CommandEntry::new(
            "outbox",
            "List submitted estimate requests",
            "outbox",
            cmd_outbox,
        ),
    ]
}

fn cmd_steps(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let active = context.wizard.active_step();
    let steps = context.wizard.step_field_sets()?;
    output::section("Wizard steps");
    for (step, fields) in steps.iter() {
        let marker = if step == active { ">" } else { " " };
        let missing = fields
            .iter()
            .filter(|field| field.required && field.is_missing())
            .count();
        let suffix = if missing > 0 {
            format!(" ({} required missing)", missing)
        } else {
            String::new()
        };
        output::info(format!(
            "{} {}. {}{}",
            marker,
            step.index() + 1,
            step,
            suffix
        ));
    }
    Ok(())
}

fn cmd_step(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: step <number>".into()));
    };
    let index = parse_position(raw, "step", WizardStep::ALL.len())?;
    context.wizard.go_to_step(index)?;
    let step = context.wizard.active_step();
    print_step(step, context.wizard.field_set(step)?);
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let step = match args.first() {
        Some(raw) => {
            let index = parse_position(raw, "step", WizardStep::ALL.len())?;
            WizardStep::from_index(index).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown step `{}`", raw))
            })?
        }
        None => context.wizard.active_step(),
    };
    print_step(step, context.wizard.field_set(step)?);
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value>".into(),
        ));
    }
    let step = context.wizard.active_step();
    let key = args[0];
    let value = args[1..].join(" ");
    context.wizard.set_value(step, key, &value)?;
    let shown = context
        .wizard
        .field_set(step)?
        .get(key)
        .map(|field| field.display_value())
        .unwrap_or_default();
    output::success(format!("{} = {}", key, shown));
    Ok(())
}

fn cmd_fill(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.is_interactive() {
        return Err(CommandError::InvalidArguments(
            "`fill` needs an interactive terminal; use `set` in scripts".into(),
        ));
    }
    let step = context.wizard.active_step();
    let original = context.wizard.current_field_set()?.clone();
    if original.is_empty() {
        output::info(format!("The {} step has no fields.", step));
        return Ok(());
    }

    let title = step.label();
    let engine = FormEngine::new(title, &original);
    let mut interaction = DialoguerInteraction::new(&context.theme);
    let completed = match engine.run(&mut interaction) {
        FormResult::Completed(fields) => fields,
        FormResult::Cancelled => {
            output::info("Operation cancelled.");
            return Ok(());
        }
    };

    let mut changed = 0;
    for field in completed.iter() {
        if original.get(&field.key).map(|f| &f.value) == Some(&field.value) {
            continue;
        }
        match &field.value {
            Some(value) => context.wizard.set_typed(step, &field.key, value.clone())?,
            None => context.wizard.clear_value(step, &field.key)?,
        }
        changed += 1;
    }
    output::success(format!("{} field(s) updated on {}.", changed, step));
    Ok(())
}

fn cmd_request(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: request <text>".into(),
        ));
    }
    let number = context.wizard.add_special_request(&args.join(" "))?;
    if context.wizard.special_request_saved() {
        output::success(format!("Special request #{} saved.", number));
    }
    Ok(())
}

fn cmd_rooms(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let checked = context.wizard.checked_rooms()?;
    output::section("Selected rooms");
    if checked.is_empty() {
        output::info("No rooms selected. Tick rooms on step 6.");
        return Ok(());
    }
    let catalog = context.wizard.catalog();
    for name in checked.iter() {
        let items: Vec<&str> = catalog.items_for(name).names().collect();
        output::info(format!("  {}: {}", name, items.join(", ")));
    }
    Ok(())
}

fn cmd_preview(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let request = context.wizard.preview(&context.config.customer)?;
    output::info(serde_json::to_string_pretty(&request)?);
    let missing = context.wizard.missing_required()?;
    if !missing.is_empty() {
        output::warning(format!("Still missing: {}", missing.join(", ")));
    }
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.config.customer.name().is_empty() {
        output::warning("No customer configured; the request will be anonymous.");
    }
    if context.is_interactive()
        && !forms::confirm_action(&context.theme, "Submit this estimate request?", true)?
    {
        output::info("Operation cancelled.");
        return Ok(());
    }
    let (request, receipt) = context
        .wizard
        .submit(&context.config.customer, &context.outbox)?;
    output::success(format!(
        "Estimate request {} submitted ({} rooms, {} items).",
        receipt.id,
        request.rooms.len(),
        request.total_items()
    ));
    context.wizard.reset();
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.is_interactive()
        && !forms::confirm_action(&context.theme, "Discard all wizard input?", false)?
    {
        output::info("Operation cancelled.");
        return Ok(());
    }
    context.wizard.reset();
    output::success("Wizard reset.");
    Ok(())
}

fn cmd_outbox(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let receipts = context.outbox.list()?;
    output::section(format!("Outbox ({})", context.outbox.dir().display()));
    if receipts.is_empty() {
        output::info("No estimate requests submitted yet.");
        return Ok(());
    }
    for receipt in receipts {
        output::info(format!(
            "  {}  {}  {}",
            receipt.submitted_at.format("%Y-%m-%d %H:%M:%S"),
            receipt.id,
            receipt.customer
        ));
    }
    Ok(())
}

fn print_step(step: WizardStep, fields: &FieldSet) {
    output::section(format!(
        "Step {}/{}: {}",
        step.index() + 1,
        WizardStep::ALL.len(),
        step
    ));
    if fields.is_empty() {
        let hint = match step {
            WizardStep::Items => "No rooms selected, so there are no items to count.",
            WizardStep::SpecialRequests => "No special requests yet. Use `request <text>`.",
            _ => "This step has no fields.",
        };
        output::info(hint);
        return;
    }
    let width = fields.keys().map(str::len).max().unwrap_or(0);
    for field in fields.iter() {
        let marker = if field.required { "*" } else { " " };
        output::info(format!(
            " {}{:<width$}  {} [{}]: {}",
            marker,
            field.key,
            field.label,
            field.kind,
            field.display_value(),
            width = width
        ));
    }
}
