//! Single-slot persistence for the last fetched schedule bundle.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::domain::ScheduleBundle;
use storage::Storage;
use tokio::sync::Mutex;
use tracing::warn;

/// Fixed key of the one cached record.
pub const CACHE_KEY: &str = "timetable-data";

#[async_trait]
pub trait ScheduleCache: Send + Sync {
    /// Last stored bundle. Unreadable or malformed records read as `None`.
    async fn read(&self) -> Option<ScheduleBundle>;
    /// Replaces the stored bundle.
    async fn write(&self, bundle: &ScheduleBundle) -> Result<()>;
}

fn decode_record(raw: &str) -> Option<ScheduleBundle> {
    match serde_json::from_str::<ScheduleBundle>(raw) {
        Ok(bundle) => Some(bundle),
        Err(err) => {
            warn!(error = %err, "cache: discarding malformed timetable record");
            None
        }
    }
}

/// Cache kept in the local SQLite store.
#[derive(Clone)]
pub struct StorageScheduleCache {
    storage: Storage,
}

impl StorageScheduleCache {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// When the current record was written, if there is one.
    pub async fn last_written_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self
            .storage
            .get_entry(CACHE_KEY)
            .await?
            .map(|entry| entry.updated_at))
    }
}

#[async_trait]
impl ScheduleCache for StorageScheduleCache {
    async fn read(&self) -> Option<ScheduleBundle> {
        match self.storage.get_value(CACHE_KEY).await {
            Ok(Some(raw)) => decode_record(&raw),
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "cache: failed to read timetable record");
                None
            }
        }
    }

    async fn write(&self, bundle: &ScheduleBundle) -> Result<()> {
        let raw = serde_json::to_string(bundle).context("failed to serialize timetable")?;
        self.storage.put_value(CACHE_KEY, &raw).await
    }
}

/// Process-local cache. Holds the serialized form so reads go through the
/// same decoding path as the persistent cache.
#[derive(Default)]
pub struct MemoryScheduleCache {
    slot: Mutex<Option<String>>,
}

impl MemoryScheduleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with raw text, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub async fn raw(&self) -> Option<String> {
        self.slot.lock().await.clone()
    }
}

#[async_trait]
impl ScheduleCache for MemoryScheduleCache {
    async fn read(&self) -> Option<ScheduleBundle> {
        let guard = self.slot.lock().await;
        guard.as_deref().and_then(decode_record)
    }

    async fn write(&self, bundle: &ScheduleBundle) -> Result<()> {
        let raw = serde_json::to_string(bundle).context("failed to serialize timetable")?;
        *self.slot.lock().await = Some(raw);
        Ok(())
    }
}

#[async_trait]
impl<T: ScheduleCache + ?Sized> ScheduleCache for std::sync::Arc<T> {
    async fn read(&self) -> Option<ScheduleBundle> {
        (**self).read().await
    }

    async fn write(&self, bundle: &ScheduleBundle) -> Result<()> {
        (**self).write(bundle).await
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
