use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored employee as returned by the API.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDoc {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Create/update payload; `id` is ignored.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInputDoc {
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::employees::list,
        crate::routes::employees::create,
        crate::routes::employees::get,
        crate::routes::employees::update,
        crate::routes::employees::delete,
        crate::routes::employees::search,
    ),
    components(
        schemas(
            HealthResponse,
            EmployeeDoc,
            EmployeeInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "employees")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_employee_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in ["/health", "/api/employees", "/api/employees/{id}", "/api/employees/search"] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }

    #[test]
    fn employee_schemas_use_camel_case_fields() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        for schema in ["EmployeeDoc", "EmployeeInputDoc"] {
            let props = &doc["components"]["schemas"][schema]["properties"];
            for field in ["id", "firstName", "lastName", "email"] {
                assert!(props[field].is_object(), "{schema} lacks {field}");
            }
            assert!(props["first_name"].is_null());
        }
    }
}
