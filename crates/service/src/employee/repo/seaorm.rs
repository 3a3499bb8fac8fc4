use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, Value};
use tracing::debug;

use models::employee;

use crate::employee::domain::Employee;
use crate::employee::errors::EmployeeError;
use crate::employee::query::{bind_named, bind_positional, BoundSql, NameQuery, ParamStyle};
use crate::employee::repository::{single_match, EmployeeRepository};

const PORTABLE_POSITIONAL: &str =
    "SELECT id, first_name, last_name, email FROM employee WHERE first_name = ?1 AND last_name = ?2 ORDER BY id";

const PORTABLE_NAMED: &str =
    "SELECT id, first_name, last_name, email FROM employee WHERE first_name = :first_name AND last_name = :last_name ORDER BY id";

/// Name lookup written in the backend's own dialect (identifier quoting).
fn native_template(backend: DbBackend, style: ParamStyle) -> String {
    let q = match backend {
        DbBackend::MySql => '`',
        _ => '"',
    };
    let (first, last) = match style {
        ParamStyle::Positional => ("?1", "?2"),
        ParamStyle::Named => (":first_name", ":last_name"),
    };
    format!(
        "SELECT e.{q}id{q}, e.{q}first_name{q}, e.{q}last_name{q}, e.{q}email{q} \
         FROM {q}employee{q} AS e \
         WHERE e.{q}first_name{q} = {first} AND e.{q}last_name{q} = {last} \
         ORDER BY e.{q}id{q}"
    )
}

/// Bind the name lookup for `backend` in the requested variant.
pub fn name_statement(backend: DbBackend, query: NameQuery, first_name: &str, last_name: &str) -> Result<BoundSql, EmployeeError> {
    let positional = [Value::from(first_name), Value::from(last_name)];
    let named = [("first_name", Value::from(first_name)), ("last_name", Value::from(last_name))];
    match query {
        NameQuery::Positional => bind_positional(PORTABLE_POSITIONAL, &positional, backend),
        NameQuery::Named => bind_named(PORTABLE_NAMED, &named, backend),
        NameQuery::Native(ParamStyle::Positional) => {
            bind_positional(&native_template(backend, ParamStyle::Positional), &positional, backend)
        }
        NameQuery::Native(ParamStyle::Named) => bind_named(&native_template(backend, ParamStyle::Named), &named, backend),
    }
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn find_all(&self) -> Result<Vec<Employee>, EmployeeError> {
        let rows = employee::list(&self.db).await?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>, EmployeeError> {
        let res = employee::Entity::find_by_id(id).one(&self.db).await?;
        Ok(res.map(Employee::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, EmployeeError> {
        let res = employee::find_by_email(&self.db, email).await?;
        Ok(res.map(Employee::from))
    }

    async fn find_by_name(&self, first_name: &str, last_name: &str, query: NameQuery) -> Result<Option<Employee>, EmployeeError> {
        let bound = name_statement(self.db.get_database_backend(), query, first_name, last_name)?;
        debug!(query = %query, sql = %bound.sql, "employee_name_lookup");
        let rows = employee::Entity::find()
            .from_raw_sql(bound.into_statement())
            .all(&self.db)
            .await?;
        single_match(first_name, last_name, rows.into_iter().map(Employee::from).collect())
    }

    async fn save(&self, e: Employee) -> Result<Employee, EmployeeError> {
        let saved = match e.id {
            None => employee::insert(&self.db, &e.first_name, &e.last_name, &e.email).await?,
            Some(id) => employee::update(&self.db, id, &e.first_name, &e.last_name, &e.email).await?,
        };
        Ok(saved.into())
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), EmployeeError> {
        employee::hard_delete(&self.db, id).await?;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), EmployeeError> {
        employee::delete_all(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    async fn repo() -> Result<SeaOrmEmployeeRepository, anyhow::Error> {
        Ok(SeaOrmEmployeeRepository::new(get_db().await?))
    }

    #[test]
    fn native_postgres_statement_uses_quoted_identifiers() {
        let bound = name_statement(DbBackend::Postgres, NameQuery::Native(ParamStyle::Named), "Mihail", "Cepraga").unwrap();
        assert!(bound.sql.contains(r#"FROM "employee" AS e"#));
        assert!(bound.sql.contains(r#"e."first_name" = $1 AND e."last_name" = $2"#));
        assert_eq!(bound.values, vec![Value::from("Mihail"), Value::from("Cepraga")]);
    }

    #[test]
    fn native_mysql_statement_uses_backticks() {
        let bound = name_statement(DbBackend::MySql, NameQuery::Native(ParamStyle::Positional), "a", "b").unwrap();
        assert!(bound.sql.contains("FROM `employee` AS e"));
        assert!(bound.sql.contains("e.`first_name` = ? AND e.`last_name` = ?"));
    }

    #[test]
    fn portable_statements_bind_the_same_values() {
        for query in [NameQuery::Positional, NameQuery::Named] {
            let bound = name_statement(DbBackend::Postgres, query, "Mihail", "Cepraga").unwrap();
            assert!(bound.sql.ends_with("WHERE first_name = $1 AND last_name = $2 ORDER BY id"));
            assert_eq!(bound.values, vec![Value::from("Mihail"), Value::from("Cepraga")]);
        }
    }

    #[tokio::test]
    async fn employee_crud_repository() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let repo = repo().await?;

        assert!(repo.find_all().await?.is_empty());

        let saved = repo.save(Employee::new("Mihail", "Cepraga", "mcepraga@mail.com")).await?;
        let id = saved.id.expect("id assigned on insert");
        assert_eq!(repo.find_by_id(id).await?, Some(saved.clone()));
        assert_eq!(repo.find_by_email("mcepraga@mail.com").await?, Some(saved.clone()));
        assert_eq!(repo.find_by_email("nobody@mail.com").await?, None);

        let updated = repo.save(Employee::new("Mihail1", "Cepraga1", "mcepraga1@mail.com").with_id(id)).await?;
        assert_eq!(updated.id, Some(id));
        assert_eq!(repo.find_all().await?, vec![updated]);

        repo.delete_by_id(id).await?;
        repo.delete_by_id(id).await?;
        assert_eq!(repo.find_by_id(id).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn every_name_query_variant_finds_the_same_row() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let repo = repo().await?;
        repo.save(Employee::new("Ion", "Popescu", "ion@mail.com")).await?;
        let target = repo.save(Employee::new("Mihail", "Cepraga", "mcepraga@mail.com")).await?;

        for query in NameQuery::ALL {
            let found = repo.find_by_name("Mihail", "Cepraga", query).await?;
            assert_eq!(found.as_ref(), Some(&target), "variant {query}");
            assert_eq!(repo.find_by_name("Mihail", "Popescu", query).await?, None, "variant {query}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_names_are_reported() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let repo = repo().await?;
        repo.save(Employee::new("Ana", "Rusu", "ana1@mail.com")).await?;
        repo.save(Employee::new("Ana", "Rusu", "ana2@mail.com")).await?;

        for query in NameQuery::ALL {
            let err = repo.find_by_name("Ana", "Rusu", query).await.unwrap_err();
            assert!(matches!(err, EmployeeError::NonUniqueName { matches: 2, .. }), "variant {query}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn schema_unique_key_surfaces_as_repository_error() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let repo = repo().await?;
        repo.save(Employee::new("A", "One", "same@mail.com")).await?;
        let err = repo.save(Employee::new("B", "Two", "same@mail.com")).await.unwrap_err();
        assert!(matches!(err, EmployeeError::Repository(_)));
        assert_eq!(repo.find_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn delete_all_resets_the_store() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let repo = repo().await?;
        for i in 0..3 {
            repo.save(Employee::new("N", format!("L{i}"), format!("n{i}@mail.com"))).await?;
        }
        assert_eq!(repo.find_all().await?.len(), 3);
        repo.delete_all().await?;
        assert!(repo.find_all().await?.is_empty());
        Ok(())
    }
}
