use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::planner::WizardStep;

/// Grouped command list followed by a pointer to the active wizard step.
pub fn print_overview(registry: &CommandRegistry, active: WizardStep) {
    for (group, entries) in registry.groups() {
        output::section(group);
        for entry in entries {
            output::info(format!("  {:<10} {}", entry.name, entry.description));
        }
    }
    output::info(format!(
        "Current step: {}. {} `help <command>` shows usage.",
        active.label(),
        step_hint(active)
    ));
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::info(format!("  {}", entry.description));
    output::info(format!("  Usage: {}", entry.usage));
}

fn step_hint(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Rooms => "Tick rooms with `set <room> yes`; items follow the selection.",
        WizardStep::Items => "Enter a count per item with `set <item> <n>`.",
        WizardStep::SpecialRequests => "Add free text with `request <text>`.",
        _ => "Use `fill` to answer the step's prompts, or `set` a single field.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_step_has_a_hint() {
        for step in WizardStep::ALL {
            assert!(step_hint(step).ends_with('.'));
        }
        assert!(step_hint(WizardStep::Items).contains("set <item>"));
    }
}
