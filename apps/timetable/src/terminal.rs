//! Terminal stand-ins for the two day surfaces.

use client_core::{CarouselSurface, DayIndicator};
use shared::domain::DayIndex;

const DAY_NAMES: [&str; 5] = ["monday", "tuesday", "wednesday", "thursday", "friday"];

/// Page the "carousel" is resting on. The terminal has no animation, so a
/// jump lands immediately.
#[derive(Debug, Default)]
pub struct TerminalCarousel {
    page: Option<DayIndex>,
}

impl TerminalCarousel {
    pub fn page(&self) -> Option<DayIndex> {
        self.page
    }

    /// Moves the page as a user swipe would, without telling anyone.
    pub fn swipe_to(&mut self, index: DayIndex) {
        self.page = Some(index);
    }
}

impl CarouselSurface for TerminalCarousel {
    fn jump_to(&mut self, index: DayIndex) {
        self.page = Some(index);
    }
}

#[derive(Debug, Default)]
pub struct TerminalIndicator {
    shown: Option<DayIndex>,
}

impl TerminalIndicator {
    pub fn shown(&self) -> Option<DayIndex> {
        self.shown
    }
}

impl DayIndicator for TerminalIndicator {
    fn show_day(&mut self, index: DayIndex) {
        self.shown = Some(index);
    }
}

/// Accepts `1`-`5`, full weekday names and three letter prefixes.
pub fn parse_day(input: &str) -> Option<DayIndex> {
    let input = input.trim().to_lowercase();
    if let Ok(number) = input.parse::<usize>() {
        return number.checked_sub(1).and_then(DayIndex::new);
    }
    if input.len() < 3 {
        return None;
    }
    DAY_NAMES
        .iter()
        .position(|name| name.starts_with(&input))
        .and_then(DayIndex::new)
}
