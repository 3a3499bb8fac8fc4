use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::employee::EmployeeError;
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "message": <detail>, "code": <code>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub message: Option<String>,
    pub code: Option<u16>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, message: Option<String>) -> Self {
        Self { status, title, message, code: None }
    }

    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("{what} not found")))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.title, "message": self.message, "code": self.code});
        (self.status, Json(body)).into_response()
    }
}

impl From<EmployeeError> for JsonApiError {
    fn from(e: EmployeeError) -> Self {
        let (status, title) = match &e {
            EmployeeError::DuplicateEmail { .. } | EmployeeError::NonUniqueName { .. } => (StatusCode::CONFLICT, "Conflict"),
            EmployeeError::Query(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            EmployeeError::Repository(_) => {
                error!(err = %e, code = e.code(), "employee repository failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        Self { status, title, message: Some(e.to_string()), code: Some(e.code()) }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let dup: JsonApiError = EmployeeError::DuplicateEmail { email: "a@b.c".into() }.into();
        assert_eq!(dup.status, StatusCode::CONFLICT);
        assert_eq!(dup.code, Some(1002));

        let bad: JsonApiError = EmployeeError::Query("unknown".into()).into();
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);

        let infra: JsonApiError = EmployeeError::Repository("down".into()).into();
        assert_eq!(infra.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
