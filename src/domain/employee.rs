use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

/// A member of the moving crew roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: Uuid,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub status: EmployeeStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Higher values outrank lower ones when a full job is contested.
    pub seniority: u32,
}

impl Employee {
    pub fn new(
        user_name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        seniority: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: String::new(),
            status: EmployeeStatus::Active,
            tags: Vec::new(),
            seniority,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}

impl NamedEntity for Employee {
    fn name(&self) -> &str {
        &self.user_name
    }
}

impl Displayable for Employee {
    fn display_label(&self) -> String {
        format!("{} (@{})", self.full_name(), self.user_name)
    }
}

/// Snapshot of an employee placed on a job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssignedEmployee {
    pub employee_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub seniority: u32,
}

impl From<&Employee> for AssignedEmployee {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id,
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            seniority: employee.seniority,
        }
    }
}

impl Displayable for AssignedEmployee {
    fn display_label(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
