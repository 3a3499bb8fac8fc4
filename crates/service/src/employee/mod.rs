//! Employee module: three-layer architecture (domain, repository, service).
//!
//! `repository` defines the storage port and an in-memory mock, `repo` holds
//! the SeaORM adapter and `query` binds the raw-SQL name lookups.

pub mod domain;
pub mod errors;
pub mod query;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::Employee;
pub use errors::EmployeeError;
pub use query::{NameQuery, ParamStyle};
pub use repository::EmployeeRepository;
pub use service::EmployeeService;
