use super::*;
use std::collections::HashMap;

use async_trait::async_trait;

#[derive(Default)]
struct FixedSheets {
    books: HashMap<String, Vec<SheetGrid>>,
}

impl FixedSheets {
    fn with(sheet_id: &str, book: Vec<SheetGrid>) -> Self {
        Self {
            books: HashMap::from([(sheet_id.to_string(), book)]),
        }
    }
}

#[async_trait]
impl SheetSource for FixedSheets {
    async fn load_workbook(&self, sheet_id: &str) -> Result<Vec<SheetGrid>, SheetSourceError> {
        if !is_valid_sheet_id(sheet_id) {
            return Err(SheetSourceError::InvalidId(sheet_id.to_string()));
        }
        self.books
            .get(sheet_id)
            .cloned()
            .ok_or_else(|| SheetSourceError::NotFound(sheet_id.to_string()))
    }
}

fn day_sheet(name: &str) -> SheetGrid {
    [
        vec![name],
        vec!["Slots", "1", "2"],
        vec!["Venues/time", "08:00-08:55", "09:00-09:55"],
        vec!["CLASSROOMS"],
        vec!["E-1", "SE BCS-6A", ""],
        vec!["E-2", "", "AI BCS-6G"],
    ]
    .into_iter()
    .map(|row| row.into_iter().map(String::from).collect())
    .collect()
}

fn week() -> Vec<SheetGrid> {
    DAY_SHEETS.iter().map(|name| day_sheet(name)).collect()
}

fn service(defaults: TimetableDefaults) -> TimetableService<FixedSheets> {
    TimetableService::new(FixedSheets::with("abc123", week()), defaults)
}

#[tokio::test]
async fn build_returns_bundle_with_canonical_url() {
    let svc = service(TimetableDefaults::default());

    let response = svc
        .build(Some("abc123"), vec!["BCS-6G".to_string()])
        .await
        .expect("built");

    assert_eq!(
        response.url,
        "https://docs.google.com/spreadsheets/d/abc123/edit"
    );
    assert_eq!(response.sections.to_vec(), vec!["BCS-6G"]);
    assert_eq!(response.time_table.len(), 5);
    assert_eq!(response.time_table[0].classes.len(), 1);
    assert_eq!(response.time_table[0].classes[0].room, "E-2");
    assert_eq!(response.free_classes[0].classes.len(), 2);
}

#[tokio::test]
async fn missing_sheet_id_and_sections_fall_back_to_defaults() {
    let svc = service(TimetableDefaults {
        sheet_id: Some("abc123".to_string()),
        sections: vec!["BCS-6A".to_string()],
    });

    let response = svc.build(None, Vec::new()).await.expect("built");

    assert_eq!(response.sections.to_vec(), vec!["BCS-6A"]);
    assert_eq!(response.time_table[2].classes[0].room, "E-1");
}

#[tokio::test]
async fn no_sheet_id_anywhere_is_a_validation_error() {
    let svc = service(TimetableDefaults::default());

    let err = svc.build(None, Vec::new()).await.expect_err("no id");

    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn source_errors_map_to_codes() {
    let svc = service(TimetableDefaults::default());

    let unknown = svc.build(Some("null"), Vec::new()).await.expect_err("404");
    assert_eq!(unknown.code, ErrorCode::NotFound);
    assert_eq!(unknown.message, "Spreadsheet 'null' not found");

    let invalid = svc.build(Some("a/b"), Vec::new()).await.expect_err("400");
    assert_eq!(invalid.code, ErrorCode::Validation);
}

#[tokio::test]
async fn short_workbook_is_unprocessable() {
    let mut book = week();
    book.truncate(3);
    let svc = TimetableService::new(
        FixedSheets::with("short", book),
        TimetableDefaults::default(),
    );

    let err = svc.build(Some("short"), Vec::new()).await.expect_err("422");

    assert_eq!(err.code, ErrorCode::Unprocessable);
}

#[tokio::test]
async fn last_built_tracks_the_latest_success() {
    let svc = service(TimetableDefaults::default());
    let err = svc.last_built().await.expect_err("nothing yet");
    assert_eq!(err.code, ErrorCode::NotFound);

    svc.build(Some("abc123"), vec!["BCS-6A".to_string()])
        .await
        .expect("first");
    svc.build(Some("missing"), Vec::new())
        .await
        .expect_err("second fails");

    let last = svc.last_built().await.expect("stored");
    assert_eq!(last.sections.to_vec(), vec!["BCS-6A"]);
}
