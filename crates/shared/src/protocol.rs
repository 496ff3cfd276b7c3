use serde::{Deserialize, Serialize};

use crate::domain::{ScheduleDay, SectionSet};

pub const TIMETABLE_ROUTE: &str = "/timetable";

/// Query parameter naming the spreadsheet to build from.
pub const SHEET_ID_PARAM: &str = "sheetId";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRequest {
    #[serde(default)]
    pub sections: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableQuery {
    #[serde(
        rename = "sheetId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sheet_id: Option<String>,
}

/// Body of a successful timetable fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub time_table: Vec<ScheduleDay>,
    pub free_classes: Vec<ScheduleDay>,
    pub sections: SectionSet,
    pub url: String,
}
