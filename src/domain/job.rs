use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{common::*, employee::AssignedEmployee};

/// A scheduled move the crew can sign up for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub id: Uuid,
    pub customer_name: String,
    pub load_address: String,
    pub start: NaiveDateTime,
    pub number_workers: u32,
    #[serde(default)]
    pub assigned: Vec<AssignedEmployee>,
}

impl Job {
    pub fn new(
        customer_name: impl Into<String>,
        load_address: impl Into<String>,
        start: NaiveDateTime,
        number_workers: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_name: customer_name.into(),
            load_address: load_address.into(),
            start,
            number_workers,
            assigned: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.assigned.len() >= self.number_workers as usize
    }

    pub fn is_assigned(&self, employee_id: Uuid) -> bool {
        self.assigned
            .iter()
            .any(|member| member.employee_id == employee_id)
    }

    /// The assignee that loses a contested spot first.
    pub fn least_senior(&self) -> Option<&AssignedEmployee> {
        self.assigned.iter().min_by_key(|member| member.seniority)
    }
}

impl Displayable for Job {
    fn display_label(&self) -> String {
        format!(
            "{} on {} ({}/{} crew)",
            self.customer_name,
            self.start.format("%Y-%m-%d %H:%M"),
            self.assigned.len(),
            self.number_workers
        )
    }
}

/// Reasons an employee cannot take a spot on a job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AssignmentConflict {
    AlreadyAssigned,
    JobFull,
}

impl fmt::Display for AssignmentConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentConflict::AlreadyAssigned => write!(f, "already assigned to this job"),
            AssignmentConflict::JobFull => write!(f, "job crew is full"),
        }
    }
}

/// Outcome of checking whether an employee may join a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Available {
        employee_to_boot: Option<AssignedEmployee>,
    },
    Conflict(AssignmentConflict),
}
