pub mod config;
pub mod dispatch;
pub mod planner;
pub mod system;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandEntry, CommandRegistry};

/// Command groups in the order `help` lists them.
pub(crate) fn all_groups() -> Vec<(&'static str, Vec<CommandEntry>)> {
    vec![
        ("Estimate wizard", planner::definitions()),
        ("Crew dashboard", dispatch::definitions()),
        ("Settings", config::definitions()),
        ("Shell", system::definitions()),
    ]
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for (group, entries) in all_groups() {
        registry.register_group(group, entries);
    }
}

/// Parses a 1-based list position into an index.
pub(crate) fn parse_position(raw: &str, what: &str, len: usize) -> Result<usize, CommandError> {
    let position: usize = raw.parse().map_err(|_| {
        CommandError::InvalidArguments(format!("{} number must be numeric", what))
    })?;
    if position == 0 || position > len {
        return Err(CommandError::InvalidArguments(format!(
            "{} number must be between 1 and {}",
            what, len
        )));
    }
    Ok(position - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_are_unique() {
        let groups = all_groups();
        let mut names: Vec<&str> = groups
            .iter()
            .flat_map(|(_, entries)| entries.iter().map(|entry| entry.name))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn positions_are_one_based() {
        assert_eq!(parse_position("1", "step", 9).unwrap(), 0);
        assert_eq!(parse_position("9", "step", 9).unwrap(), 8);
        assert!(parse_position("0", "step", 9).is_err());
        assert!(parse_position("10", "step", 9).is_err());
        assert!(parse_position("two", "step", 9).is_err());
    }
}
