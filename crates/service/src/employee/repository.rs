use async_trait::async_trait;

use super::domain::Employee;
use super::errors::EmployeeError;
use super::query::NameQuery;

/// Repository abstraction for employee persistence.
///
/// Holds no business rules: email uniqueness is checked by the service.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Every stored employee, ordered by id.
    async fn find_all(&self) -> Result<Vec<Employee>, EmployeeError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, EmployeeError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, EmployeeError>;
    /// Lookup by `(first_name, last_name)`.
    /// `None` when nothing matches, `NonUniqueName` when several rows do.
    async fn find_by_name(&self, first_name: &str, last_name: &str, query: NameQuery) -> Result<Option<Employee>, EmployeeError>;
    /// Insert when `id` is `None`, otherwise overwrite the row with that id.
    async fn save(&self, employee: Employee) -> Result<Employee, EmployeeError>;
    /// Idempotent: deleting a missing id is not an error.
    async fn delete_by_id(&self, id: i32) -> Result<(), EmployeeError>;
    async fn delete_all(&self) -> Result<(), EmployeeError>;
}

/// Collapse the rows of a name lookup according to the uniqueness policy.
pub(crate) fn single_match(first_name: &str, last_name: &str, mut rows: Vec<Employee>) -> Result<Option<Employee>, EmployeeError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        matches => Err(EmployeeError::NonUniqueName {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            matches,
        }),
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i32, Employee>, // key: id
        last_id: i32,
    }

    /// Behaves like the SQL store: ids are assigned on insert and never
    /// reused, and the email column carries a unique key.
    #[derive(Default)]
    pub struct MockEmployeeRepository {
        state: Mutex<State>,
        unavailable: AtomicBool,
    }

    impl MockEmployeeRepository {
        /// Make every call fail as if the database were unreachable.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.state.lock().map(|s| s.rows.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn state(&self) -> Result<MutexGuard<'_, State>, EmployeeError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(EmployeeError::Repository("connection refused".into()));
            }
            self.state.lock().map_err(|_| EmployeeError::Repository("mock store poisoned".into()))
        }
    }

    fn email_taken(state: &State, email: &str, except: Option<i32>) -> bool {
        state.rows.values().any(|e| e.email == email && e.id != except)
    }

    #[async_trait]
    impl EmployeeRepository for MockEmployeeRepository {
        async fn find_all(&self) -> Result<Vec<Employee>, EmployeeError> {
            Ok(self.state()?.rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, EmployeeError> {
            Ok(self.state()?.rows.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, EmployeeError> {
            Ok(self.state()?.rows.values().find(|e| e.email == email).cloned())
        }

        async fn find_by_name(&self, first_name: &str, last_name: &str, _query: NameQuery) -> Result<Option<Employee>, EmployeeError> {
            let rows = self.state()?
                .rows
                .values()
                .filter(|e| e.first_name == first_name && e.last_name == last_name)
                .cloned()
                .collect();
            single_match(first_name, last_name, rows)
        }

        async fn save(&self, mut employee: Employee) -> Result<Employee, EmployeeError> {
            let mut state = self.state()?;
            if email_taken(&state, &employee.email, employee.id) {
                return Err(EmployeeError::Repository(format!("unique constraint violated: employee.email = {}", employee.email)));
            }
            let id = match employee.id {
                Some(id) if state.rows.contains_key(&id) => id,
                Some(id) => return Err(EmployeeError::Repository(format!("not found: employee {id}"))),
                None => {
                    state.last_id += 1;
                    state.last_id
                }
            };
            employee.id = Some(id);
            state.rows.insert(id, employee.clone());
            Ok(employee)
        }

        async fn delete_by_id(&self, id: i32) -> Result<(), EmployeeError> {
            self.state()?.rows.remove(&id);
            Ok(())
        }

        async fn delete_all(&self) -> Result<(), EmployeeError> {
            self.state()?.rows.clear();
            Ok(())
        }
    }

}
