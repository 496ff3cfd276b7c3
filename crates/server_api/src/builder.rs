//! Spreadsheet grid to schedule bundle conversion.
//!
//! Each day sheet is a grid of strings: row 2 holds the slot times
//! (`"08:00-08:55"`), rows from 4 on hold one room each with the room name in
//! column 0 and one cell per slot. A class cell names its course and section;
//! lab cells occupy three consecutive slots but only the first one is filled.

use shared::domain::{
    BundleError, ClassEntry, ScheduleBundle, ScheduleDay, SectionSet, WEEKDAY_COUNT,
};
use thiserror::Error;

pub type SheetGrid = Vec<Vec<String>>;

/// Sheet names of a timetable workbook, Monday first.
pub const DAY_SHEETS: [&str; WEEKDAY_COUNT] = ["MONDAY", "TUESDAY", "WEDNESDAY", "THURSDAY", "FRIDAY"];

const SLOT_ROW: usize = 2;
const FIRST_ROOM_ROW: usize = 4;
/// Offsets (from the first room row) of the "LABS" heading rows.
const LAB_HEADING_ROW: usize = 46;
const FRIDAY_LAB_HEADING_ROW: usize = 47;
const LAB_CELL_SPAN: usize = 3;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("workbook has {actual} day sheets, expected {expected}")]
    WrongSheetCount { expected: usize, actual: usize },
    #[error("sheet {0} has no time slot row")]
    MissingSlotRow(&'static str),
    #[error(transparent)]
    Bundle(#[from] BundleError),
}

pub fn build_bundle(
    workbook: &[SheetGrid],
    sections: &SectionSet,
    source_url: &str,
) -> Result<ScheduleBundle, BuildError> {
    if workbook.len() != WEEKDAY_COUNT {
        return Err(BuildError::WrongSheetCount {
            expected: WEEKDAY_COUNT,
            actual: workbook.len(),
        });
    }

    let mut days = Vec::with_capacity(WEEKDAY_COUNT);
    let mut free_classes = Vec::with_capacity(WEEKDAY_COUNT);
    for (sheet, grid) in DAY_SHEETS.into_iter().zip(workbook) {
        let slots = grid.get(SLOT_ROW).ok_or(BuildError::MissingSlotRow(sheet))?;
        days.push(ScheduleDay {
            day: day_label(sheet),
            classes: section_classes(grid, slots, sections),
        });
        free_classes.push(ScheduleDay {
            day: day_label(sheet),
            classes: free_rooms(sheet, grid, slots),
        });
    }

    Ok(ScheduleBundle::new(
        days,
        free_classes,
        sections.clone(),
        source_url,
    )?)
}

fn day_label(sheet: &str) -> String {
    let mut chars = sheet.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn is_lab(cell: &str) -> bool {
    cell.to_lowercase().contains("lab")
}

fn room_rows(grid: &SheetGrid) -> impl Iterator<Item = (usize, &str, &[String])> {
    grid.iter()
        .skip(FIRST_ROOM_ROW)
        .enumerate()
        .filter_map(|(offset, row)| {
            let (room, cells) = row.split_first()?;
            Some((offset, room.as_str(), cells))
        })
}

fn section_classes(grid: &SheetGrid, slots: &[String], sections: &SectionSet) -> Vec<ClassEntry> {
    let mut entries = Vec::new();
    for (_, room, cells) in room_rows(grid) {
        for (i, cell) in cells.iter().enumerate() {
            let col = i + 1;
            if !sections.iter().any(|section| cell.contains(section)) {
                continue;
            }
            let Some(slot) = slots.get(col) else {
                continue;
            };
            let time = match slots.get(col + LAB_CELL_SPAN - 1) {
                Some(last) if is_lab(cell) => span_range(slot, last),
                _ => slot.clone(),
            };
            entries.push(ClassEntry {
                course: Some(cell.clone()),
                time,
                room: room.to_string(),
            });
        }
    }
    finish(entries)
}

fn free_rooms(sheet: &str, grid: &SheetGrid, slots: &[String]) -> Vec<ClassEntry> {
    let mut entries = Vec::new();
    for (offset, room, cells) in room_rows(grid) {
        if offset == LAB_HEADING_ROW || (sheet == "FRIDAY" && offset == FRIDAY_LAB_HEADING_ROW) {
            continue;
        }
        for (i, cell) in cells.iter().enumerate() {
            let col = i + 1;
            if !cell.trim().is_empty() || covered_by_lab(cells, i) {
                continue;
            }
            let Some(slot) = slots.get(col).filter(|slot| !slot.trim().is_empty()) else {
                continue;
            };
            entries.push(ClassEntry {
                course: None,
                time: slot.clone(),
                room: room.to_string(),
            });
        }
    }
    finish(entries)
}

/// Whether slot `i` is one of the trailing cells of a lab started earlier.
fn covered_by_lab(cells: &[String], i: usize) -> bool {
    (1..LAB_CELL_SPAN).any(|back| i >= back && is_lab(&cells[i - back]))
}

/// Sorts chronologically by start time and formats times for display.
fn finish(mut entries: Vec<ClassEntry>) -> Vec<ClassEntry> {
    entries.sort_by_key(|entry| start_minutes(&entry.time).unwrap_or(u32::MAX));
    for entry in &mut entries {
        entry.time = format_time(&entry.time);
    }
    entries
}

fn split_range(range: &str) -> (&str, &str) {
    range.split_once('-').unwrap_or((range, ""))
}

/// `"08:00-08:55"` and `"09:00-09:55"` become `"08:00-09:55"`.
fn span_range(first: &str, last: &str) -> String {
    let (start, _) = split_range(first);
    let (_, end) = split_range(last);
    format!("{start}-{end}")
}

fn parse_start(range: &str) -> Option<(u32, u32)> {
    let (start, _) = split_range(range);
    let start = start.trim().trim_end_matches(':');
    let (hour, minute) = start.split_once(':')?;
    Some((hour.trim().parse().ok()?, minute.trim().parse().ok()?))
}

/// Slot times are written on a 12-hour clock without a marker: classes run
/// from 6 AM to before 6 PM.
fn meridiem(hour: u32) -> Option<&'static str> {
    match hour {
        12 | 0..=5 => Some("PM"),
        6..=11 => Some("AM"),
        _ => None,
    }
}

fn start_minutes(range: &str) -> Option<u32> {
    let (hour, minute) = parse_start(range)?;
    let hour = match meridiem(hour) {
        Some("PM") if hour != 12 => hour + 12,
        _ => hour,
    };
    Some(hour * 60 + minute)
}

fn format_time(range: &str) -> String {
    let spaced = range.replace('-', " - ");
    match parse_start(range).and_then(|(hour, _)| meridiem(hour)) {
        Some(marker) => format!("{spaced} {marker}"),
        None => spaced,
    }
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
