use client_core::{DayView, ViewMode};
use shared::domain::{ClassEntry, SectionSet};

/// Text for one day page, one line per row, newline terminated.
pub fn render_day(label: &str, mode: &ViewMode, sections: &SectionSet, view: &DayView<'_>) -> String {
    let mut lines = vec![match mode {
        ViewMode::Sections => format!("== {label} ==  sections: {}", sections.joined()),
        ViewMode::Search { query } => format!("== {label} ==  free rooms matching '{query}'"),
    }];

    match view {
        DayView::Grouped(groups) => {
            if groups.is_empty() {
                lines.push("  no sections selected".to_string());
            }
            for group in groups {
                lines.push(format!("[{}]", group.section));
                if group.entries.is_empty() {
                    lines.push("  no classes".to_string());
                }
                lines.extend(group.entries.iter().map(|entry| entry_line(entry)));
            }
        }
        DayView::Filtered(entries) => {
            if entries.is_empty() {
                lines.push("  no free rooms".to_string());
            }
            lines.extend(entries.iter().map(|entry| entry_line(entry)));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn entry_line(entry: &ClassEntry) -> String {
    match entry.course.as_deref() {
        Some(course) => format!(
            "  {:<20} {:<24} {}",
            entry.time,
            entry.room,
            course.replace('\n', " / ")
        ),
        None => format!("  {:<20} {}", entry.time, entry.room),
    }
}
