//! Where spreadsheet grids come from.

use std::{
    collections::HashMap,
    io::ErrorKind,
    path::PathBuf,
};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::builder::{SheetGrid, DAY_SHEETS};

#[derive(Debug, Error)]
pub enum SheetSourceError {
    #[error("Spreadsheet '{0}' not found")]
    NotFound(String),
    #[error("Invalid spreadsheet id '{0}'")]
    InvalidId(String),
    #[error("Spreadsheet '{sheet_id}' has no '{sheet}' sheet")]
    MissingSheet { sheet_id: String, sheet: &'static str },
    #[error("Spreadsheet '{sheet_id}' could not be parsed: {reason}")]
    Parse { sheet_id: String, reason: String },
    #[error("Error retrieving sheet data")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait SheetSource: Send + Sync {
    /// The five day sheets of `sheet_id`, Monday first.
    async fn load_workbook(&self, sheet_id: &str) -> Result<Vec<SheetGrid>, SheetSourceError>;
}

pub fn is_valid_sheet_id(sheet_id: &str) -> bool {
    !sheet_id.is_empty()
        && sheet_id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// Reads `<root>/<sheet_id>.json`, a JSON object mapping sheet names to
/// grids. Sheet names are matched ignoring case and surrounding spaces.
#[derive(Debug, Clone)]
pub struct DirectorySheetSource {
    root: PathBuf,
}

impl DirectorySheetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn workbook_path(&self, sheet_id: &str) -> PathBuf {
        self.root.join(format!("{sheet_id}.json"))
    }
}

#[async_trait]
impl SheetSource for DirectorySheetSource {
    async fn load_workbook(&self, sheet_id: &str) -> Result<Vec<SheetGrid>, SheetSourceError> {
        if !is_valid_sheet_id(sheet_id) {
            return Err(SheetSourceError::InvalidId(sheet_id.to_string()));
        }

        let path = self.workbook_path(sheet_id);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(SheetSourceError::NotFound(sheet_id.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        debug!(path = %path.display(), "sheets: workbook loaded");

        let sheets: HashMap<String, SheetGrid> =
            serde_json::from_str(&raw).map_err(|e| SheetSourceError::Parse {
                sheet_id: sheet_id.to_string(),
                reason: e.to_string(),
            })?;
        let by_name: HashMap<String, SheetGrid> = sheets
            .into_iter()
            .map(|(name, grid)| (name.trim().to_uppercase(), grid))
            .collect();

        DAY_SHEETS
            .into_iter()
            .map(|sheet| {
                by_name
                    .get(sheet)
                    .cloned()
                    .ok_or_else(|| SheetSourceError::MissingSheet {
                        sheet_id: sheet_id.to_string(),
                        sheet,
                    })
            })
            .collect()
    }
}
