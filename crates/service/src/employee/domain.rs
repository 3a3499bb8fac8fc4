use serde::{Deserialize, Serialize};

/// Domain employee (business view).
///
/// `id` is `None` until the store assigns one on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Employee {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id: None, first_name: first_name.into(), last_name: last_name.into(), email: email.into() }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<models::employee::Model> for Employee {
    fn from(m: models::employee::Model) -> Self {
        Self { id: Some(m.id), first_name: m.first_name, last_name: m.last_name, email: m.email }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_and_optional_id() {
        let e: Employee = serde_json::from_str(r#"{"firstName":"Mihail","lastName":"Cepraga","email":"mcepraga@mail.com"}"#).unwrap();
        assert_eq!(e, Employee::new("Mihail", "Cepraga", "mcepraga@mail.com"));

        let out = serde_json::to_value(e.with_id(7)).unwrap();
        assert_eq!(out["id"], 7);
        assert_eq!(out["firstName"], "Mihail");
        assert_eq!(out["lastName"], "Cepraga");
    }

    #[test]
    fn unsaved_employee_omits_id() {
        let out = serde_json::to_value(Employee::new("a", "b", "c@d.e")).unwrap();
        assert!(out.get("id").is_none());
    }
}
