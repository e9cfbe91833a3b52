//! Facade-side employee types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::upstream::UpstreamEmployee;

/// Youngest age the upstream accepts.
pub const MIN_AGE: i32 = 16;
/// Oldest age the upstream accepts.
pub const MAX_AGE: i32 = 75;

/// Employee record exposed by the facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub salary: i32,
    pub age: i32,
    pub title: String,
    pub email: String,
}

impl From<UpstreamEmployee> for Employee {
    fn from(record: UpstreamEmployee) -> Self {
        Self {
            id: record.id,
            name: record.name,
            salary: record.salary,
            age: record.age,
            title: record.title,
            email: record.email,
        }
    }
}

/// Payload for creating an employee upstream.
///
/// Missing fields deserialize to empty values and are caught by [`validate`](Self::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeInput {
    pub name: String,
    pub salary: i32,
    pub age: i32,
    pub title: String,
}

impl EmployeeInput {
    /// Check the upstream's acceptance rules, returning every violation.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("name must not be blank".to_string());
        }
        if self.salary <= 0 {
            problems.push("salary must be greater than zero".to_string());
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            problems.push(format!("age must be between {MIN_AGE} and {MAX_AGE}"));
        }
        if self.title.trim().is_empty() {
            problems.push("title must not be blank".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
