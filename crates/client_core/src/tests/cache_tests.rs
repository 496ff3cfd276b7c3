use super::*;
use crate::test_support::sample_bundle;

async fn storage_cache(dir: &tempfile::TempDir) -> StorageScheduleCache {
    let url = storage::sqlite_url_for_path(&dir.path().join("cache.sqlite3"));
    StorageScheduleCache::new(Storage::new(&url).await.expect("db"))
}

#[tokio::test]
async fn cold_storage_cache_reads_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = storage_cache(&dir).await;
    assert_eq!(cache.read().await, None);
    assert_eq!(cache.last_written_at().await.expect("timestamp"), None);
}

#[tokio::test]
async fn storage_cache_round_trips_bundle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = storage_cache(&dir).await;
    let bundle = sample_bundle("https://x/d/abc123/", "BCS-6A, BCS-6G");

    cache.write(&bundle).await.expect("write");

    assert_eq!(cache.read().await, Some(bundle));
    assert!(cache.last_written_at().await.expect("timestamp").is_some());
}

#[tokio::test]
async fn round_trip_keeps_empty_section_set() {
    let cache = MemoryScheduleCache::new();
    let bundle = sample_bundle("https://x/d/abc123/", "");

    cache.write(&bundle).await.expect("write");

    let read = cache.read().await.expect("cached");
    assert!(read.sections().is_empty());
    assert_eq!(read, bundle);
}

#[tokio::test]
async fn second_write_replaces_first() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cache = storage_cache(&dir).await;
    cache
        .write(&sample_bundle("https://x/d/first/", "A"))
        .await
        .expect("first");
    let second = sample_bundle("https://x/d/second/", "B");
    cache.write(&second).await.expect("second");

    assert_eq!(cache.read().await, Some(second));
}

#[tokio::test]
async fn malformed_json_reads_as_absent() {
    let cache = MemoryScheduleCache::with_raw("{not json");
    assert_eq!(cache.read().await, None);
}

#[tokio::test]
async fn record_with_wrong_day_count_reads_as_absent() {
    let mut value =
        serde_json::to_value(sample_bundle("https://x/d/abc/", "A")).expect("json");
    value["free_classes"]
        .as_array_mut()
        .expect("free classes")
        .pop();
    let cache = MemoryScheduleCache::with_raw(value.to_string());

    assert_eq!(cache.read().await, None);
}

#[tokio::test]
async fn malformed_persisted_record_reads_as_absent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = storage::sqlite_url_for_path(&dir.path().join("cache.sqlite3"));
    let storage = Storage::new(&url).await.expect("db");
    storage
        .put_value(CACHE_KEY, r#"{"time_table": 3}"#)
        .await
        .expect("seed");

    let cache = StorageScheduleCache::new(storage);
    assert_eq!(cache.read().await, None);
}
