//! Cache-or-fetch decisions and the fetch state machine.

use shared::domain::{ScheduleBundle, SectionSet};
use tracing::{info, warn};

use crate::{
    cache::ScheduleCache, sheet_id::extract_sheet_id, FetchError, FetchRequest, TimetableSource,
};

/// Sheet id sent when the user's link has none; the server rejects it.
pub const UNRESOLVED_SHEET_ID: &str = "null";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Cold,
    Loading,
    Ready,
    Error,
}

/// An explicit user-submitted update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleUpdate {
    pub source_url: String,
    pub sections: SectionSet,
}

impl ScheduleUpdate {
    fn to_request(&self) -> FetchRequest {
        let sheet_id = match extract_sheet_id(&self.source_url) {
            Some(id) => id.to_string(),
            None => {
                warn!(url = %self.source_url, "timetable: no sheet id in link");
                UNRESOLVED_SHEET_ID.to_string()
            }
        };
        FetchRequest {
            sections: self.sections.to_vec(),
            sheet_id: Some(sheet_id),
        }
    }
}

/// Owns the displayed bundle and decides when the network is used.
///
/// Every operation that fetches takes `&mut self` for the whole request, so
/// a second fetch cannot start while one is in flight.
pub struct ScheduleOrchestrator<S, C> {
    source: S,
    cache: C,
    state: FetchState,
    bundle: Option<ScheduleBundle>,
    error_message: Option<String>,
}

impl<S: TimetableSource, C: ScheduleCache> ScheduleOrchestrator<S, C> {
    pub fn new(source: S, cache: C) -> Self {
        Self {
            source,
            cache,
            state: FetchState::Cold,
            bundle: None,
            error_message: None,
        }
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn bundle(&self) -> Option<&ScheduleBundle> {
        self.bundle.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Submit actions must be disabled while this is false.
    pub fn can_submit(&self) -> bool {
        self.state != FetchState::Loading
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Initial load: a warm cache is used as is, a cold one triggers a
    /// fetch with the server's default sections. Later calls are no-ops.
    pub async fn mount(&mut self) -> FetchState {
        if self.state != FetchState::Cold {
            return self.state;
        }
        self.state = FetchState::Loading;

        if let Some(bundle) = self.cache.read().await {
            info!(url = bundle.source_url(), "timetable: using cached bundle");
            self.bundle = Some(bundle);
            self.error_message = None;
            self.state = FetchState::Ready;
            return self.state;
        }

        info!("timetable: cache miss, fetching");
        self.fetch(FetchRequest::default()).await
    }

    /// Fetches for a new source link and/or section list.
    pub async fn submit_update(&mut self, update: &ScheduleUpdate) -> FetchState {
        if !self.can_submit() {
            return self.state;
        }
        self.state = FetchState::Loading;
        self.fetch(update.to_request()).await
    }

    async fn fetch(&mut self, request: FetchRequest) -> FetchState {
        match self.source.fetch_timetable(&request).await {
            Ok(bundle) => self.accept(bundle).await,
            Err(err) => self.reject(err),
        }
        self.state
    }

    async fn accept(&mut self, bundle: ScheduleBundle) {
        self.state = FetchState::Ready;
        if let Err(err) = self.cache.write(&bundle).await {
            warn!(error = %err, "timetable: failed to persist bundle");
        }
        self.bundle = Some(bundle);
        self.error_message = None;
    }

    fn reject(&mut self, err: FetchError) {
        warn!(error = %err, "timetable: fetch failed");
        self.error_message = Some(err.user_message());
        self.state = FetchState::Error;
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
