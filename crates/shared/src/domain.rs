use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::TimetableResponse;

/// Number of weekdays a bundle carries (Monday through Friday).
pub const WEEKDAY_COUNT: usize = 5;

/// Position of a weekday in a bundle, 0 = Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DayIndex(usize);

impl DayIndex {
    pub const MONDAY: DayIndex = DayIndex(0);

    pub fn new(position: usize) -> Option<Self> {
        (position < WEEKDAY_COUNT).then_some(Self(position))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn prev(self) -> Self {
        Self((self.0 + WEEKDAY_COUNT - 1) % WEEKDAY_COUNT)
    }

    pub fn next(self) -> Self {
        Self((self.0 + 1) % WEEKDAY_COUNT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    pub time: String,
    pub room: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub day: String,
    #[serde(rename = "class_data")]
    pub classes: Vec<ClassEntry>,
}

/// Ordered set of section labels. Insertion order is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SectionSet(Vec<String>);

impl SectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses form input such as `"BCS-5G, BCS-5H"`.
    pub fn parse(input: &str) -> Self {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns false when the label is empty or already present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        let label = label.into();
        if label.is_empty() || self.contains(&label) {
            return false;
        }
        self.0.push(label);
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|existing| existing == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    /// Comma separated form, the inverse of [`SectionSet::parse`].
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl FromIterator<String> for SectionSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut set = SectionSet::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

impl From<Vec<String>> for SectionSet {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<SectionSet> for Vec<String> {
    fn from(value: SectionSet) -> Self {
        value.0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BundleError {
    #[error("expected {expected} days in `{field}`, got {actual}")]
    WrongDayCount {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// A full fetched schedule: timetable and free-class views for one week.
///
/// Serialized with the wire field names so a cached record and a server
/// response share one format. Deserialization rejects anything that does
/// not carry exactly [`WEEKDAY_COUNT`] days in both views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimetableResponse", into = "TimetableResponse")]
pub struct ScheduleBundle {
    days: Vec<ScheduleDay>,
    free_classes: Vec<ScheduleDay>,
    sections: SectionSet,
    source_url: String,
}

impl ScheduleBundle {
    pub fn new(
        days: Vec<ScheduleDay>,
        free_classes: Vec<ScheduleDay>,
        sections: SectionSet,
        source_url: impl Into<String>,
    ) -> Result<Self, BundleError> {
        check_day_count("time_table", &days)?;
        check_day_count("free_classes", &free_classes)?;
        Ok(Self {
            days,
            free_classes,
            sections,
            source_url: source_url.into(),
        })
    }

    pub fn day(&self, index: DayIndex) -> &ScheduleDay {
        &self.days[index.get()]
    }

    pub fn free_day(&self, index: DayIndex) -> &ScheduleDay {
        &self.free_classes[index.get()]
    }

    pub fn days(&self) -> &[ScheduleDay] {
        &self.days
    }

    pub fn free_classes(&self) -> &[ScheduleDay] {
        &self.free_classes
    }

    pub fn sections(&self) -> &SectionSet {
        &self.sections
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}

fn check_day_count(field: &'static str, days: &[ScheduleDay]) -> Result<(), BundleError> {
    if days.len() != WEEKDAY_COUNT {
        return Err(BundleError::WrongDayCount {
            field,
            expected: WEEKDAY_COUNT,
            actual: days.len(),
        });
    }
    Ok(())
}

impl TryFrom<TimetableResponse> for ScheduleBundle {
    type Error = BundleError;

    fn try_from(value: TimetableResponse) -> Result<Self, Self::Error> {
        ScheduleBundle::new(
            value.time_table,
            value.free_classes,
            value.sections,
            value.url,
        )
    }
}

impl From<ScheduleBundle> for TimetableResponse {
    fn from(value: ScheduleBundle) -> Self {
        Self {
            time_table: value.days,
            free_classes: value.free_classes,
            sections: value.sections,
            url: value.source_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_week() -> Vec<ScheduleDay> {
        ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
            .into_iter()
            .map(|day| ScheduleDay {
                day: day.to_string(),
                classes: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn day_index_wraps_in_both_directions() {
        let monday = DayIndex::MONDAY;
        assert_eq!(monday.prev().get(), 4);
        assert_eq!(monday.prev().next(), monday);
        let friday = DayIndex::new(4).expect("friday");
        assert_eq!(friday.next(), monday);
        assert!(DayIndex::new(5).is_none());
    }

    #[test]
    fn section_set_parse_drops_blanks_and_duplicates() {
        let sections = SectionSet::parse(" BCS-5G,BCS-5H  BCS-5G,, ");
        assert_eq!(sections.to_vec(), vec!["BCS-5G", "BCS-5H"]);
        assert_eq!(sections.joined(), "BCS-5G, BCS-5H");
    }

    #[test]
    fn bundle_rejects_short_week() {
        let mut days = empty_week();
        days.pop();
        let err = ScheduleBundle::new(days, empty_week(), SectionSet::new(), "u")
            .expect_err("four days");
        assert_eq!(
            err,
            BundleError::WrongDayCount {
                field: "time_table",
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn bundle_uses_wire_field_names() {
        let bundle = ScheduleBundle::new(
            empty_week(),
            empty_week(),
            SectionSet::parse("BCS-6G"),
            "https://x/d/abc123/",
        )
        .expect("bundle");
        let value = serde_json::to_value(&bundle).expect("json");
        assert_eq!(value["url"], "https://x/d/abc123/");
        assert_eq!(value["sections"][0], "BCS-6G");
        assert_eq!(value["time_table"][0]["day"], "Monday");
        assert!(value["free_classes"][4]["class_data"].is_array());
    }

    #[test]
    fn free_class_entries_omit_course() {
        let entry = ClassEntry {
            course: None,
            time: "08:00 - 08:55 AM".to_string(),
            room: "E-1".to_string(),
        };
        let value = serde_json::to_value(&entry).expect("json");
        assert!(value.get("course").is_none());
        let back: ClassEntry = serde_json::from_value(value).expect("entry");
        assert_eq!(back, entry);
    }
}
