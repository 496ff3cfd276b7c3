use chrono::{Datelike, Local, Weekday};
use shared::domain::DayIndex;

/// Default day to open on for `date`: Monday..Friday map to 0..4, weekends
/// open on Monday.
pub fn default_day_index(date: impl Datelike) -> DayIndex {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => DayIndex::MONDAY,
        weekday => DayIndex::new(weekday.num_days_from_monday() as usize)
            .unwrap_or(DayIndex::MONDAY),
    }
}

pub fn today_day_index() -> DayIndex {
    default_day_index(Local::now().date_naive())
}
