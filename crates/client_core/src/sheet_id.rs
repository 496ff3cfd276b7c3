//! Spreadsheet identifier extraction from share links.

use std::sync::LazyLock;

use regex::Regex;

static SHEET_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/d/([A-Za-z0-9_-]+)/").expect("sheet id pattern is valid")
});

/// Returns the document id in a link of the form `.../d/<id>/...`.
///
/// The id is the first run of `[A-Za-z0-9_-]` that directly follows a `/d/`
/// and is itself terminated by `/`. A link without that shape yields `None`.
pub fn extract_sheet_id(url: &str) -> Option<&str> {
    SHEET_ID
        .captures(url)?
        .get(1)
        .map(|id| id.as_str())
}
