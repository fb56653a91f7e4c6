//! Staff dashboard core: the crew roster, the job board with self-service
//! assignment, and the per-user schedule session.

pub mod board;
pub mod roster;
pub mod session;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{AssignmentConflict, Employee, Job};
use crate::errors::PlannerResult;
use crate::utils::persistence::{load_json, save_json};

pub use board::JobBoard;
pub use roster::Roster;
pub use session::{JobSessionState, JobTab, ScheduleSession};

pub type DispatchResult<T> = Result<T, DispatchError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Job not found: {0}")]
    JobNotFound(Uuid),
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),
    #[error("Employee `{0}` already exists")]
    DuplicateEmployee(String),
    #[error("Employee is not assigned to job {0}")]
    NotAssigned(Uuid),
    #[error("Cannot assign: {0}")]
    Conflict(AssignmentConflict),
}

/// Persisted dashboard data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchData {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl DispatchData {
    /// Loads from `path`, yielding empty data when the file is absent.
    pub fn load(path: &Path) -> PlannerResult<Self> {
        if path.exists() {
            load_json(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> PlannerResult<()> {
        save_json(self, path)
    }

    pub fn split(self) -> (Roster, JobBoard) {
        (Roster::new(self.employees), JobBoard::new(self.jobs))
    }

    pub fn join(roster: &Roster, board: &JobBoard) -> Self {
        Self {
            employees: roster.list().to_vec(),
            jobs: board.jobs().to_vec(),
        }
    }
}
