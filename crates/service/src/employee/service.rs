use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::Employee;
use super::errors::EmployeeError;
use super::query::NameQuery;
use super::repository::EmployeeRepository;

/// Employee business service independent of web framework.
///
/// Holds no mutable state of its own; every call goes straight to the
/// injected repository, so one instance can be shared across requests.
pub struct EmployeeService<R: EmployeeRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: EmployeeRepository + ?Sized> EmployeeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create an employee after checking that the email is not taken.
    ///
    /// The check and the insert are not atomic: two concurrent creates with the
    /// same email can both pass the check, and the schema unique key decides.
    ///
    /// # Examples
    /// ```
    /// use service::employee::{Employee, EmployeeError, EmployeeService, repository::mock::MockEmployeeRepository};
    /// use std::sync::Arc;
    /// let svc = EmployeeService::new(Arc::new(MockEmployeeRepository::default()));
    /// let saved = tokio_test::block_on(svc.create_employee(Employee::new("Mihail", "Cepraga", "mcepraga@mail.com"))).unwrap();
    /// assert!(saved.id.is_some());
    /// let dup = tokio_test::block_on(svc.create_employee(Employee::new("Other", "Name", "mcepraga@mail.com")));
    /// assert!(matches!(dup, Err(EmployeeError::DuplicateEmail { .. })));
    /// ```
    #[instrument(skip(self, candidate), fields(email = %candidate.email))]
    pub async fn create_employee(&self, candidate: Employee) -> Result<Employee, EmployeeError> {
        if let Some(existing) = self.repo.find_by_email(&candidate.email).await? {
            warn!(existing_id = ?existing.id, "duplicate_email_rejected");
            return Err(EmployeeError::DuplicateEmail { email: candidate.email });
        }
        // ids are store-assigned; a client supplied id never selects a row here
        let saved = self.repo.save(Employee { id: None, ..candidate }).await?;
        info!(id = ?saved.id, "employee_created");
        Ok(saved)
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>, EmployeeError> {
        self.repo.find_all().await
    }

    pub async fn get_employee_by_id(&self, id: i32) -> Result<Option<Employee>, EmployeeError> {
        self.repo.find_by_id(id).await
    }

    /// Copy names and email from `incoming` onto `existing` and persist.
    ///
    /// `existing` must come from `get_employee_by_id`; its id is kept and the
    /// id carried by `incoming` is ignored. Moving to an email owned by another
    /// employee fails with `DuplicateEmail` before anything is written. An
    /// `existing` without an id is rejected as a `Repository` error.
    #[instrument(skip(self, existing, incoming), fields(id = ?existing.id, email = %incoming.email))]
    pub async fn update_employee(&self, existing: Employee, incoming: Employee) -> Result<Employee, EmployeeError> {
        let Some(id) = existing.id else {
            return Err(EmployeeError::Repository("cannot update an employee that has no id".into()));
        };
        if existing.email != incoming.email {
            if let Some(owner) = self.repo.find_by_email(&incoming.email).await? {
                if owner.id != Some(id) {
                    warn!(owner_id = ?owner.id, "duplicate_email_rejected");
                    return Err(EmployeeError::DuplicateEmail { email: incoming.email });
                }
            }
        }
        let merged = Employee {
            id: Some(id),
            first_name: incoming.first_name,
            last_name: incoming.last_name,
            email: incoming.email,
        };
        let updated = self.repo.save(merged).await?;
        info!("employee_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_employee_by_id(&self, id: i32) -> Result<(), EmployeeError> {
        self.repo.delete_by_id(id).await?;
        info!("employee_deleted");
        Ok(())
    }

    /// Lookup by first and last name through the chosen query variant.
    pub async fn find_employee_by_name(&self, first_name: &str, last_name: &str, query: NameQuery) -> Result<Option<Employee>, EmployeeError> {
        debug!(%first_name, %last_name, %query, "find_employee_by_name");
        self.repo.find_by_name(first_name, last_name, query).await
    }

    /// Remove every employee. Meant for resetting test environments.
    pub async fn delete_all_employees(&self) -> Result<(), EmployeeError> {
        self.repo.delete_all().await?;
        warn!("all_employees_deleted");
        Ok(())
    }
}
