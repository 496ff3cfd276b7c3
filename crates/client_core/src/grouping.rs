//! Per-day views: classes grouped by section, or free rooms filtered by text.

use shared::domain::{ClassEntry, DayIndex, ScheduleBundle, SectionSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup<'a> {
    pub section: &'a str,
    pub entries: Vec<&'a ClassEntry>,
}

/// One group per section, in section order. A group keeps the entries whose
/// course contains the section label (case-sensitive) in their original
/// order, and is kept even when empty.
pub fn group_by_sections<'a>(
    classes: &'a [ClassEntry],
    sections: &'a SectionSet,
) -> Vec<SectionGroup<'a>> {
    sections
        .iter()
        .map(|section| SectionGroup {
            section,
            entries: classes
                .iter()
                .filter(|entry| {
                    entry
                        .course
                        .as_deref()
                        .is_some_and(|course| course.contains(section))
                })
                .collect(),
        })
        .collect()
}

/// Entries whose time or room contains `query`, ignoring case.
pub fn filter_by_query<'a>(classes: &'a [ClassEntry], query: &str) -> Vec<&'a ClassEntry> {
    let query = query.to_lowercase();
    classes
        .iter()
        .filter(|entry| {
            query.is_empty()
                || entry.time.to_lowercase().contains(&query)
                || entry.room.to_lowercase().contains(&query)
        })
        .collect()
}

/// Which of the two views is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Timetable grouped by the bundle's sections.
    #[default]
    Sections,
    /// Free classes filtered by a search string.
    Search { query: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayView<'a> {
    Grouped(Vec<SectionGroup<'a>>),
    Filtered(Vec<&'a ClassEntry>),
}

impl DayView<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            DayView::Grouped(groups) => groups.iter().all(|group| group.entries.is_empty()),
            DayView::Filtered(entries) => entries.is_empty(),
        }
    }
}

impl ViewMode {
    pub fn search(query: impl Into<String>) -> Self {
        ViewMode::Search {
            query: query.into(),
        }
    }

    pub fn render_day<'a>(
        &self,
        bundle: &'a ScheduleBundle,
        sections: &'a SectionSet,
        day: DayIndex,
    ) -> DayView<'a> {
        match self {
            ViewMode::Sections => {
                DayView::Grouped(group_by_sections(&bundle.day(day).classes, sections))
            }
            ViewMode::Search { query } => {
                DayView::Filtered(filter_by_query(&bundle.free_day(day).classes, query))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/grouping_tests.rs"]
mod tests;
