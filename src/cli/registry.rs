use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands known to the shell, kept in named groups in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    groups: Vec<(&'static str, Vec<&'static str>)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entries` under `group`; a name registered twice keeps its first group.
    pub fn register_group(&mut self, group: &'static str, entries: Vec<CommandEntry>) {
        let mut names = Vec::with_capacity(entries.len());
        for entry in entries {
            let name = entry.name;
            if self.commands.insert(name, entry).is_none() {
                names.push(name);
            }
        }
        match self.groups.iter_mut().find(|(title, _)| *title == group) {
            Some((_, existing)) => existing.extend(names),
            None => self.groups.push((group, names)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    /// Group titles with their entries, in registration order.
    pub fn groups(&self) -> impl Iterator<Item = (&'static str, Vec<&CommandEntry>)> + '_ {
        self.groups.iter().map(|(title, names)| {
            let entries = names
                .iter()
                .filter_map(|name| self.commands.get(name))
                .collect();
            (*title, entries)
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups
            .iter()
            .flat_map(|(_, names)| names.iter().copied())
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn groups_keep_registration_order_and_first_owner() {
        let mut registry = CommandRegistry::new();
        registry.register_group(
            "Wizard",
            vec![
                CommandEntry::new("steps", "", "steps", noop),
                CommandEntry::new("step", "", "step", noop),
            ],
        );
        registry.register_group("System", vec![CommandEntry::new("help", "", "help", noop)]);
        registry.register_group("Wizard", vec![CommandEntry::new("help", "", "help", noop)]);

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, ["steps", "step", "help"]);
        let titles: Vec<&str> = registry.groups().map(|(title, _)| title).collect();
        assert_eq!(titles, ["Wizard", "System"]);
        assert!(registry.handler("step").is_some());
        assert!(registry.get("reset").is_none());
    }
}
