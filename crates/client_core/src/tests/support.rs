use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use shared::domain::{ClassEntry, DayIndex, ScheduleBundle, ScheduleDay, SectionSet};
use tokio::sync::Mutex;

use crate::{
    carousel::{CarouselSurface, DayIndicator},
    FetchError, FetchRequest, TimetableSource,
};

pub const WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub fn class(course: &str, time: &str, room: &str) -> ClassEntry {
    ClassEntry {
        course: Some(course.to_string()),
        time: time.to_string(),
        room: room.to_string(),
    }
}

pub fn free(time: &str, room: &str) -> ClassEntry {
    ClassEntry {
        course: None,
        time: time.to_string(),
        room: room.to_string(),
    }
}

pub fn week(classes: impl Fn(usize) -> Vec<ClassEntry>) -> Vec<ScheduleDay> {
    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, day)| ScheduleDay {
            day: day.to_string(),
            classes: classes(i),
        })
        .collect()
}

pub fn sample_bundle(url: &str, sections: &str) -> ScheduleBundle {
    ScheduleBundle::new(
        week(|i| {
            vec![
                class(
                    &format!("SE BCS-6A\nDay {i}"),
                    "08:00 - 08:55 AM",
                    "E-1 Academic Block I",
                ),
                class(&format!("AI BCS-6G\nDay {i}"), "10:00 - 10:55 AM", "Room 101"),
            ]
        }),
        week(|_| vec![free("09:00 - 09:55 AM", "Room 101"), free("12:00 - 12:55 PM", "Room 202")]),
        SectionSet::parse(sections),
        url,
    )
    .expect("five day bundle")
}

/// Source that replays queued results and records every request.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    responses: Arc<Mutex<VecDeque<Result<ScheduleBundle, FetchError>>>>,
    pub requests: Arc<Mutex<Vec<FetchRequest>>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<ScheduleBundle, FetchError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub async fn calls(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl TimetableSource for ScriptedSource {
    async fn fetch_timetable(&self, request: &FetchRequest) -> Result<ScheduleBundle, FetchError> {
        self.requests.lock().await.push(request.clone());
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no scripted response".to_string())))
    }
}

#[derive(Debug, Default)]
pub struct RecordingCarousel {
    pub jumps: Vec<DayIndex>,
}

impl RecordingCarousel {
    pub fn position(&self) -> Option<DayIndex> {
        self.jumps.last().copied()
    }
}

impl CarouselSurface for RecordingCarousel {
    fn jump_to(&mut self, index: DayIndex) {
        self.jumps.push(index);
    }
}

#[derive(Debug, Default)]
pub struct RecordingIndicator {
    pub shown: Vec<DayIndex>,
}

impl RecordingIndicator {
    pub fn current(&self) -> Option<DayIndex> {
        self.shown.last().copied()
    }
}

impl DayIndicator for RecordingIndicator {
    fn show_day(&mut self, index: DayIndex) {
        self.shown.push(index);
    }
}

pub fn day(position: usize) -> DayIndex {
    DayIndex::new(position).expect("weekday index")
}
