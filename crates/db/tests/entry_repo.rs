//! Integration tests for `EntryRepo` against an in-memory SQLite database.

use cgshare_core::entry::EntryType;
use cgshare_db::models::entry::CreateEntry;
use cgshare_db::repositories::EntryRepo;
use cgshare_db::{create_memory_pool, health_check, DbPool};

async fn pool() -> DbPool {
    create_memory_pool().await.expect("in-memory pool")
}

fn row<'a>(id: &'a str, created: i64) -> CreateEntry<'a> {
    CreateEntry {
        id,
        created,
        entry_type: EntryType::Session,
        password_hash: None,
        data: b"{}",
    }
}

#[tokio::test]
async fn health_check_passes_on_fresh_pool() {
    let pool = pool().await;
    health_check(&pool).await.unwrap();
    assert_eq!(EntryRepo::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn created_row_is_found_while_live() {
    let pool = pool().await;
    let input = CreateEntry {
        id: "aB3dE5gH",
        created: 1_000,
        entry_type: EntryType::Spectate,
        password_hash: Some("$argon2id$fake"),
        data: br#"{"game_url":"10.0.0.1"}"#,
    };
    EntryRepo::create(&pool, &input).await.unwrap();

    let entry = EntryRepo::find_live(&pool, "aB3dE5gH", 999)
        .await
        .unwrap()
        .expect("row should be live");
    assert_eq!(entry.id, "aB3dE5gH");
    assert_eq!(entry.created, 1_000);
    assert_eq!(entry.kind(), Some(EntryType::Spectate));
    assert_eq!(entry.password_hash.as_deref(), Some("$argon2id$fake"));
    assert_eq!(entry.data, br#"{"game_url":"10.0.0.1"}"#.to_vec());
}

#[tokio::test]
async fn lookup_hides_rows_at_or_before_cutoff() {
    let pool = pool().await;
    EntryRepo::create(&pool, &row("boundary", 1_000)).await.unwrap();

    assert!(EntryRepo::find_live(&pool, "boundary", 1_000)
        .await
        .unwrap()
        .is_none());
    assert!(EntryRepo::find_live(&pool, "boundary", 999)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn sweep_removes_only_expired_rows() {
    let pool = pool().await;
    EntryRepo::create(&pool, &row("old00001", 100)).await.unwrap();
    EntryRepo::create(&pool, &row("old00002", 200)).await.unwrap();
    EntryRepo::create(&pool, &row("fresh001", 201)).await.unwrap();

    let removed = EntryRepo::sweep_expired(&pool, 200).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(EntryRepo::count(&pool).await.unwrap(), 1);
    assert!(EntryRepo::find_live(&pool, "fresh001", 200)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn duplicate_id_is_a_unique_violation() {
    let pool = pool().await;
    EntryRepo::create(&pool, &row("dupe0001", 100)).await.unwrap();

    let err = EntryRepo::create(&pool, &row("dupe0001", 200))
        .await
        .unwrap_err();
    let is_unique = matches!(&err, sqlx::Error::Database(db) if db.is_unique_violation());
    assert!(is_unique, "expected unique violation, got {err:?}");
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
    let pool = pool().await;
    EntryRepo::create(&pool, &row("gone0001", 100)).await.unwrap();

    assert!(EntryRepo::delete(&pool, "gone0001").await.unwrap());
    assert!(!EntryRepo::delete(&pool, "gone0001").await.unwrap());
}

#[tokio::test]
async fn unknown_type_code_is_rejected_by_schema() {
    let pool = pool().await;
    let result = sqlx::query(
        "INSERT INTO entries (id, created, type, password_hash, data) VALUES ('badtype1', 1, 7, NULL, x'00')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
