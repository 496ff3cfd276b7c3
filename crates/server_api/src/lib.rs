pub mod builder;
pub mod source;

use shared::{
    domain::SectionSet,
    error::{ApiException, ErrorCode},
    protocol::TimetableResponse,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

pub use builder::{build_bundle, BuildError, SheetGrid, DAY_SHEETS};
pub use source::{is_valid_sheet_id, DirectorySheetSource, SheetSource, SheetSourceError};

/// Used when a request leaves the sheet id or the sections out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableDefaults {
    pub sheet_id: Option<String>,
    pub sections: Vec<String>,
}

pub struct TimetableService<S> {
    source: S,
    defaults: TimetableDefaults,
    last_built: RwLock<Option<TimetableResponse>>,
}

impl<S: SheetSource> TimetableService<S> {
    pub fn new(source: S, defaults: TimetableDefaults) -> Self {
        Self {
            source,
            defaults,
            last_built: RwLock::new(None),
        }
    }

    pub async fn last_built(&self) -> Result<TimetableResponse, ApiException> {
        self.last_built
            .read()
            .await
            .clone()
            .ok_or_else(|| ApiException::not_found("No timetable has been built yet"))
    }

    pub async fn build(
        &self,
        sheet_id: Option<&str>,
        sections: Vec<String>,
    ) -> Result<TimetableResponse, ApiException> {
        let sheet_id = sheet_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or(self.defaults.sheet_id.as_deref())
            .ok_or_else(|| ApiException::validation("Sheet id is required"))?;
        let sections: SectionSet = if sections.iter().all(|s| s.trim().is_empty()) {
            self.defaults.sections.iter().cloned().collect()
        } else {
            sections
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };

        let workbook = self
            .source
            .load_workbook(sheet_id)
            .await
            .map_err(source_error)?;
        let bundle = build_bundle(&workbook, &sections, &sheet_url(sheet_id)).map_err(|err| {
            warn!(sheet_id, error = %err, "timetable: build failed");
            ApiException::new(ErrorCode::Unprocessable, err.to_string())
        })?;
        info!(
            sheet_id,
            sections = %sections.joined(),
            "timetable: built"
        );

        let response = TimetableResponse::from(bundle);
        *self.last_built.write().await = Some(response.clone());
        Ok(response)
    }
}

pub fn sheet_url(sheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/edit")
}

fn source_error(err: SheetSourceError) -> ApiException {
    let code = match &err {
        SheetSourceError::NotFound(_) => ErrorCode::NotFound,
        SheetSourceError::InvalidId(_) => ErrorCode::Validation,
        SheetSourceError::MissingSheet { .. } | SheetSourceError::Parse { .. } => {
            ErrorCode::Unprocessable
        }
        SheetSourceError::Io(io) => {
            warn!(error = %io, "timetable: sheet read failed");
            ErrorCode::Internal
        }
    };
    ApiException::new(code, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
