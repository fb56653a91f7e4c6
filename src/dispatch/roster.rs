use uuid::Uuid;

use crate::domain::Employee;

use super::{DispatchError, DispatchResult};

/// The crew roster shown on the employees page.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    pub fn new(employees: Vec<Employee>) -> Self {
        Self { employees }
    }

    pub fn add(&mut self, employee: Employee) -> DispatchResult<Uuid> {
        let normalized = employee.user_name.trim().to_ascii_lowercase();
        if self
            .employees
            .iter()
            .any(|existing| existing.user_name.to_ascii_lowercase() == normalized)
        {
            return Err(DispatchError::DuplicateEmployee(employee.user_name));
        }
        let id = employee.id;
        self.employees.push(employee);
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    pub fn by_user_name(&self, user_name: &str) -> DispatchResult<&Employee> {
        self.employees
            .iter()
            .find(|employee| employee.user_name.eq_ignore_ascii_case(user_name))
            .ok_or_else(|| DispatchError::EmployeeNotFound(user_name.to_string()))
    }

    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    /// Employees whose full name contains `query` (case-insensitive) or who
    /// carry `query` as a tag. An empty query returns everyone.
    pub fn filter(&self, query: &str) -> Vec<&Employee> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.employees.iter().collect();
        }
        self.employees
            .iter()
            .filter(|employee| {
                employee.full_name().to_lowercase().contains(&needle)
                    || employee
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase() == needle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::default();
        roster
            .add(Employee::new("mpalin", "Michael", "Palin", 3).with_tags(["Driver"]))
            .unwrap();
        roster
            .add(Employee::new("eidle", "Eric", "Idle", 2).with_tags(["Packer", "Driver"]))
            .unwrap();
        roster
            .add(Employee::new("tjones", "Terry", "Jones", 5).with_tags(["Lead"]))
            .unwrap();
        roster
    }

    #[test]
    fn filter_matches_name_substrings_and_tags() {
        let roster = roster();
        let by_name: Vec<&str> = roster
            .filter("terry")
            .iter()
            .map(|employee| employee.user_name.as_str())
            .collect();
        assert_eq!(by_name, vec!["tjones"]);

        assert_eq!(roster.filter("driver").len(), 2);
        assert_eq!(roster.filter("  ").len(), 3);
    }

    #[test]
    fn duplicate_user_names_are_rejected() {
        let mut roster = roster();
        let err = roster
            .add(Employee::new("MPalin", "Mike", "Palin", 1))
            .unwrap_err();
        assert_eq!(err, DispatchError::DuplicateEmployee("MPalin".into()));
    }

    #[test]
    fn lookup_by_user_name_ignores_case() {
        let roster = roster();
        assert_eq!(roster.by_user_name("EIDLE").unwrap().first_name, "Eric");
        assert!(roster.by_user_name("gchapman").is_err());
    }
}
