use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::ScheduleBundle,
    error::ApiError,
    protocol::{TimetableRequest, TimetableResponse, SHEET_ID_PARAM, TIMETABLE_ROUTE},
};
use thiserror::Error;
use tracing::{debug, info};

pub mod app_state;
pub mod cache;
pub mod carousel;
pub mod day_index;
pub mod grouping;
pub mod orchestrator;
pub mod sheet_id;

pub use app_state::{ScheduleApp, UpdateForm};
pub use cache::{MemoryScheduleCache, ScheduleCache, StorageScheduleCache, CACHE_KEY};
pub use carousel::{CarouselEvent, CarouselSurface, DayCarouselController, DayIndicator};
pub use day_index::{default_day_index, today_day_index};
pub use grouping::{filter_by_query, group_by_sections, DayView, SectionGroup, ViewMode};
pub use orchestrator::{FetchState, ScheduleOrchestrator, ScheduleUpdate};
pub use sheet_id::extract_sheet_id;

/// Message shown for failures that never produced a usable response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server rejected timetable request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
    #[error("timetable request failed: {0}")]
    Transport(String),
    #[error("malformed timetable response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// The single line a user sees for this failure.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Rejected { detail, .. } => detail.clone(),
            FetchError::Transport(_) | FetchError::Malformed(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// One timetable fetch: the sections to build for and, for explicit
/// updates, the spreadsheet to build from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchRequest {
    pub sections: Vec<String>,
    pub sheet_id: Option<String>,
}

#[async_trait]
pub trait TimetableSource: Send + Sync {
    async fn fetch_timetable(&self, request: &FetchRequest) -> Result<ScheduleBundle, FetchError>;
}

#[async_trait]
impl<T: TimetableSource + ?Sized> TimetableSource for std::sync::Arc<T> {
    async fn fetch_timetable(&self, request: &FetchRequest) -> Result<ScheduleBundle, FetchError> {
        (**self).fetch_timetable(request).await
    }
}

/// HTTP client for the timetable endpoint.
#[derive(Clone)]
pub struct TimetableClient {
    http: Client,
    server_url: String,
}

impl TimetableClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), server_url)
    }

    pub fn with_http_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url: String = server_url.into();
        Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TimetableSource for TimetableClient {
    async fn fetch_timetable(&self, request: &FetchRequest) -> Result<ScheduleBundle, FetchError> {
        let mut builder = self
            .http
            .post(format!("{}{TIMETABLE_ROUTE}", self.server_url))
            .json(&TimetableRequest {
                sections: request.sections.clone(),
            });
        if let Some(sheet_id) = &request.sheet_id {
            builder = builder.query(&[(SHEET_ID_PARAM, sheet_id)]);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "timetable: response received");

        if !status.is_success() {
            let detail = serde_json::from_slice::<ApiError>(&body)
                .map(|err| err.detail)
                .unwrap_or_else(|_| format!("Request failed with status {}", status.as_u16()));
            return Err(FetchError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        let payload: TimetableResponse =
            serde_json::from_slice(&body).map_err(|e| FetchError::Malformed(e.to_string()))?;
        let bundle =
            ScheduleBundle::try_from(payload).map_err(|e| FetchError::Malformed(e.to_string()))?;
        info!(
            sections = bundle.sections().len(),
            url = bundle.source_url(),
            "timetable: fetched bundle"
        );
        Ok(bundle)
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
