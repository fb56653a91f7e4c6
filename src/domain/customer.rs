use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Contact details of the customer requesting an estimate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_primary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone_other: String,
}

impl Customer {
    pub fn new(
        user_name: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = email.into();
        self.phone_primary = phone.into();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl NamedEntity for Customer {
    fn name(&self) -> &str {
        &self.user_name
    }
}

impl Displayable for Customer {
    fn display_label(&self) -> String {
        if self.email.is_empty() {
            self.full_name()
        } else {
            format!("{} <{}>", self.full_name(), self.email)
        }
    }
}
