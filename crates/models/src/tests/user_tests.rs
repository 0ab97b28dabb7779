use crate::errors::ModelError;
use crate::user;
use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn create_assigns_id_and_lists_back() -> Result<()> {
    let db = super::migrated_db().await?;

    let created = user::create(&db, "Alice", "alice@example.com").await?;
    assert!(created.id > 0);
    assert_eq!(created.name, "Alice");
    assert_eq!(created.email, "alice@example.com");

    let all = user::list_all(&db).await?;
    let matching: Vec<_> = all
        .iter()
        .filter(|u| u.name == "Alice" && u.email == "alice@example.com")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, created.id);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_and_adds_no_row() -> Result<()> {
    let db = super::migrated_db().await?;

    user::create(&db, "Bob", "bob@example.com").await?;
    let err = user::create(&db, "Robert", "bob@example.com").await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");

    let count = user::Entity::find().count(&db).await?;
    assert_eq!(count, 1);
    Ok(())
}

#[tokio::test]
async fn empty_strings_are_accepted() -> Result<()> {
    let db = super::migrated_db().await?;
    let u = user::create(&db, "", "").await?;
    assert_eq!(u.name, "");
    Ok(())
}

#[tokio::test]
async fn ids_are_distinct_and_listing_is_ordered() -> Result<()> {
    let db = super::migrated_db().await?;
    let a = user::create(&db, "A", "a@example.com").await?;
    let b = user::create(&db, "B", "b@example.com").await?;
    assert_ne!(a.id, b.id);

    let ids: Vec<i32> = user::list_all(&db).await?.into_iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
    Ok(())
}

#[tokio::test]
async fn find_by_id_hits_and_misses() -> Result<()> {
    let db = super::migrated_db().await?;
    let u = user::create(&db, "Carol", "carol@example.com").await?;

    assert_eq!(user::find_by_id(&db, u.id).await?, Some(u.clone()));
    assert_eq!(user::find_by_id(&db, u.id + 1000).await?, None);
    Ok(())
}

#[tokio::test]
async fn empty_table_lists_nothing() -> Result<()> {
    let db = super::migrated_db().await?;
    assert!(user::list_all(&db).await?.is_empty());
    Ok(())
}
