//! Per-user dashboard state, owned by the caller and passed in explicitly.

use std::fmt;

use uuid::Uuid;

use crate::domain::{AssignedEmployee, AssignmentConflict, Availability};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobTab {
    #[default]
    Info,
    Workers,
}

impl JobTab {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "info" | "0" => Some(JobTab::Info),
            "workers" | "1" => Some(JobTab::Workers),
            _ => None,
        }
    }
}

impl fmt::Display for JobTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobTab::Info => f.write_str("info"),
            JobTab::Workers => f.write_str("workers"),
        }
    }
}

/// Assignment flags for the job currently open on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSessionState {
    pub job_id: Option<Uuid>,
    pub assignment_available: bool,
    pub already_assigned: bool,
    pub employee_to_boot: Option<AssignedEmployee>,
}

impl JobSessionState {
    /// Overwrites every flag from a fresh availability check.
    pub fn sync(&mut self, availability: &Availability) {
        match availability {
            Availability::Available { employee_to_boot } => {
                self.assignment_available = true;
                self.already_assigned = false;
                self.employee_to_boot = employee_to_boot.clone();
            }
            Availability::Conflict(AssignmentConflict::AlreadyAssigned) => {
                self.assignment_available = false;
                self.already_assigned = true;
                self.employee_to_boot = None;
            }
            Availability::Conflict(AssignmentConflict::JobFull) => {
                self.assignment_available = false;
                self.already_assigned = false;
                self.employee_to_boot = None;
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSession {
    pub tab: JobTab,
    pub job: JobSessionState,
}

impl ScheduleSession {
    /// Opens `job_id`, keeping the previously selected tab.
    pub fn open_job(&mut self, job_id: Uuid) {
        self.job.clear();
        self.job.job_id = Some(job_id);
    }

    pub fn set_tab(&mut self, tab: JobTab) {
        self.tab = tab;
    }

    /// Leaves the open job and returns to the schedule overview.
    pub fn back(&mut self) {
        self.tab = JobTab::Info;
        self.job.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_overwrites_stale_flags() {
        let mut state = JobSessionState::default();
        state.sync(&Availability::Conflict(AssignmentConflict::AlreadyAssigned));
        assert!(state.already_assigned);

        state.sync(&Availability::Available {
            employee_to_boot: None,
        });
        assert!(state.assignment_available);
        assert!(!state.already_assigned);
    }

    #[test]
    fn back_resets_tab_and_job() {
        let mut session = ScheduleSession::default();
        session.open_job(Uuid::new_v4());
        session.set_tab(JobTab::Workers);
        session.back();
        assert_eq!(session, ScheduleSession::default());
    }

    #[test]
    fn tabs_parse_by_name_or_index() {
        assert_eq!(JobTab::parse("Workers"), Some(JobTab::Workers));
        assert_eq!(JobTab::parse("0"), Some(JobTab::Info));
        assert_eq!(JobTab::parse("stats"), None);
    }
}
