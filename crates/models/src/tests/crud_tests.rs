use crate::employee;
use crate::errors::ModelError;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use anyhow::Result;
use uuid::Uuid;

use super::setup_test_db;

/// Test employee CRUD operations
#[tokio::test]
async fn test_employee_crud() -> Result<()> {
    let db = setup_test_db().await?;

    // Create
    let email = format!("emp_{}@example.com", Uuid::new_v4());
    let created = employee::insert(&db, "Mihail", "Cepraga", &email).await?;
    assert!(created.id > 0);
    assert_eq!(created.first_name, "Mihail");
    assert_eq!(created.last_name, "Cepraga");
    assert_eq!(created.email, email);

    // Read
    let found = employee::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let by_email = employee::find_by_email(&db, &email).await?;
    assert_eq!(by_email.map(|e| e.id), Some(created.id));

    // Update
    let updated = employee::update(&db, created.id, "Mihail1", "Cepraga1", "mcepraga1@mail.com").await?;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.first_name, "Mihail1");
    assert_eq!(updated.email, "mcepraga1@mail.com");

    // Delete
    assert!(employee::hard_delete(&db, created.id).await?);
    assert!(!employee::hard_delete(&db, created.id).await?);
    assert!(employee::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_update_missing_employee_is_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let err = employee::update(&db, 4242, "a", "b", "c@example.com").await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));
    Ok(())
}

/// The schema-level unique key rejects a second row with the same email
#[tokio::test]
async fn test_email_unique_key() -> Result<()> {
    let db = setup_test_db().await?;
    employee::insert(&db, "Ann", "Lee", "ann@example.com").await?;
    let err = employee::insert(&db, "Other", "Person", "ann@example.com").await.unwrap_err();
    assert!(matches!(err, ModelError::Db(_)));
    assert_eq!(employee::list(&db).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_list_is_ordered_and_delete_all_clears() -> Result<()> {
    let db = setup_test_db().await?;
    let a = employee::insert(&db, "A", "One", "a@example.com").await?;
    let b = employee::insert(&db, "B", "Two", "b@example.com").await?;
    let c = employee::insert(&db, "C", "Three", "c@example.com").await?;

    let ids: Vec<i32> = employee::list(&db).await?.into_iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![a.id, b.id, c.id]);

    let by_name = employee::Entity::find()
        .filter(employee::Column::FirstName.eq("B"))
        .filter(employee::Column::LastName.eq("Two"))
        .all(&db)
        .await?;
    assert_eq!(by_name.len(), 1);

    assert_eq!(employee::delete_all(&db).await?, 3);
    assert!(employee::list(&db).await?.is_empty());
    Ok(())
}

/// Ids are never reused after deletion
#[tokio::test]
async fn test_ids_are_not_reused() -> Result<()> {
    let db = setup_test_db().await?;
    let first = employee::insert(&db, "A", "One", "a@example.com").await?;
    employee::hard_delete(&db, first.id).await?;
    let second = employee::insert(&db, "B", "Two", "b@example.com").await?;
    assert!(second.id > first.id);
    Ok(())
}
