use server_api::{DirectorySheetSource, TimetableDefaults, TimetableService};

use crate::config::Settings;

pub(crate) struct AppState {
    pub(crate) timetable: TimetableService<DirectorySheetSource>,
}

impl AppState {
    pub(crate) fn from_settings(settings: &Settings) -> Self {
        Self {
            timetable: TimetableService::new(
                DirectorySheetSource::new(&settings.sheets_dir),
                TimetableDefaults {
                    sheet_id: settings.default_sheet_id.clone(),
                    sections: settings.default_sections.clone(),
                },
            ),
        }
    }
}
