use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use service::employee::{Employee, NameQuery};
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NameSearch {
    pub first_name: String,
    pub last_name: String,
    /// `positional` (default), `named`, `native` or `native-named`
    #[serde(default)]
    pub query: Option<String>,
}

#[utoipa::path(
    get, path = "/api/employees", tag = "employees",
    responses(
        (status = 200, description = "List OK", body = [crate::openapi::EmployeeDoc]),
        (status = 500, description = "List Failed")
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Employee>>, JsonApiError> {
    let list = state.employees.list_employees().await?;
    info!(count = list.len(), "list employees");
    Ok(Json(list))
}

#[utoipa::path(
    post, path = "/api/employees", tag = "employees",
    request_body = crate::openapi::EmployeeInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EmployeeDoc),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Create Failed")
    )
)]
pub async fn create(State(state): State<ServerState>, Json(input): Json<Employee>) -> Result<(StatusCode, Json<Employee>), JsonApiError> {
    let created = state.employees.create_employee(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<Json<Employee>, JsonApiError> {
    state
        .employees
        .get_employee_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("employee {id}")))
}

#[utoipa::path(
    put, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = crate::openapi::EmployeeInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Update Failed")
    )
)]
pub async fn update(State(state): State<ServerState>, Path(id): Path<i32>, Json(input): Json<Employee>) -> Result<Json<Employee>, JsonApiError> {
    let existing = state
        .employees
        .get_employee_by_id(id)
        .await?
        .ok_or_else(|| JsonApiError::not_found(format!("employee {id}")))?;
    let updated = state.employees.update_employee(existing, input).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/employees/{id}", tag = "employees",
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Deleted (also when the id did not exist)"),
        (status = 500, description = "Delete Failed")
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i32>) -> Result<(StatusCode, &'static str), JsonApiError> {
    state.employees.delete_employee_by_id(id).await?;
    Ok((StatusCode::OK, "Employee deleted successfully"))
}

#[utoipa::path(
    get, path = "/api/employees/search", tag = "employees",
    params(NameSearch),
    responses(
        (status = 200, description = "OK", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Unknown query style"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Several employees share the name")
    )
)]
pub async fn search(State(state): State<ServerState>, Query(q): Query<NameSearch>) -> Result<Json<Employee>, JsonApiError> {
    let style: NameQuery = q.query.as_deref().unwrap_or_default().parse()?;
    state
        .employees
        .find_employee_by_name(&q.first_name, &q.last_name, style)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("employee '{} {}'", q.first_name, q.last_name)))
}
