//! Service layer providing the employee business rules on top of models.
//! - Separates business logic from data access through `EmployeeRepository`.
//! - Reuses entity definitions in the `models` crate.
//! - Not-found is reported as `None`; rule violations as `EmployeeError`.

pub mod employee;
#[cfg(test)]
pub mod test_support;
