use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn missing_key_reads_as_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert_eq!(storage.get_value("timetable-data").await.expect("read"), None);
}

#[tokio::test]
async fn put_value_overwrites_previous_value() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.put_value("slot", "first").await.expect("first write");
    storage.put_value("slot", "second").await.expect("second write");

    let entry = storage
        .get_entry("slot")
        .await
        .expect("read")
        .expect("entry present");
    assert_eq!(entry.value, "second");
    assert!(entry.updated_at <= Utc::now());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
        .fetch_one(storage.pool())
        .await
        .expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("cache.sqlite3");

    let storage = Storage::new(&sqlite_url_for_path(&db_path))
        .await
        .expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn values_survive_reopening_the_file() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let url = sqlite_url_for_path(&temp_root.path().join("cache.sqlite3"));

    let storage = Storage::new(&url).await.expect("db");
    storage.put_value("slot", "{\"a\":1}").await.expect("write");
    storage.pool().close().await;

    let reopened = Storage::new(&url).await.expect("reopen");
    assert_eq!(
        reopened.get_value("slot").await.expect("read").as_deref(),
        Some("{\"a\":1}")
    );
}

#[test]
fn memory_urls_have_no_file_path() {
    assert_eq!(sqlite_path("sqlite::memory:"), None);
    assert_eq!(
        sqlite_path("sqlite://./data/cache.db?mode=rwc"),
        Some(PathBuf::from("./data/cache.db"))
    );
}
