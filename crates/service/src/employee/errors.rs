use thiserror::Error;

/// Business and infrastructure errors for employee workflows.
///
/// Absence of a record is not an error; lookups return `Option`.
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("employee already exists with given email: {email}")]
    DuplicateEmail { email: String },
    #[error("{matches} employees named '{first_name} {last_name}'")]
    NonUniqueName { first_name: String, last_name: String, matches: usize },
    #[error("query error: {0}")]
    Query(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl EmployeeError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            EmployeeError::DuplicateEmail { .. } => 1002,
            EmployeeError::NonUniqueName { .. } => 1003,
            EmployeeError::Query(_) => 1101,
            EmployeeError::Repository(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for EmployeeError {
    fn from(e: models::errors::ModelError) -> Self { EmployeeError::Repository(e.to_string()) }
}

impl From<sea_orm::DbErr> for EmployeeError {
    fn from(e: sea_orm::DbErr) -> Self { EmployeeError::Repository(e.to_string()) }
}
