//! Current-day ownership and synchronization of the day surfaces.
//!
//! Two surfaces show the current day: a swipeable carousel and a discrete
//! indicator between the prev/next buttons. Neither mutates the day itself.
//! Buttons call [`DayCarouselController::prev`]/[`DayCarouselController::next`],
//! the carousel reports [`CarouselEvent`]s, and the controller pushes every
//! resulting change back out to both surfaces.

use shared::domain::DayIndex;
use tracing::debug;

/// A swipe view that can be moved programmatically.
pub trait CarouselSurface {
    fn jump_to(&mut self, index: DayIndex);
}

/// Whatever shows the current day label.
pub trait DayIndicator {
    fn show_day(&mut self, index: DayIndex);
}

/// Notifications emitted by a carousel surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// The surface finished its own setup and accepts `jump_to`.
    Ready,
    /// A swipe came to rest on a page.
    Settled(DayIndex),
}

pub struct DayCarouselController<C, I> {
    index: DayIndex,
    carousel: C,
    indicator: I,
    carousel_ready: bool,
}

impl<C: CarouselSurface, I: DayIndicator> DayCarouselController<C, I> {
    pub fn new(initial: DayIndex, carousel: C, mut indicator: I) -> Self {
        indicator.show_day(initial);
        Self {
            index: initial,
            carousel,
            indicator,
            carousel_ready: false,
        }
    }

    pub fn index(&self) -> DayIndex {
        self.index
    }

    pub fn is_carousel_ready(&self) -> bool {
        self.carousel_ready
    }

    pub fn carousel(&self) -> &C {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut C {
        &mut self.carousel
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    pub fn prev(&mut self) -> DayIndex {
        self.select(self.index.prev())
    }

    pub fn next(&mut self) -> DayIndex {
        self.select(self.index.next())
    }

    /// Moves to `index` on behalf of a discrete control and syncs both surfaces.
    pub fn select(&mut self, index: DayIndex) -> DayIndex {
        self.index = index;
        self.indicator.show_day(index);
        if self.carousel_ready {
            debug!(day = index.get(), "carousel: jumping to selected day");
            self.carousel.jump_to(index);
        } else {
            debug!(day = index.get(), "carousel: not ready, jump deferred");
        }
        index
    }

    pub fn handle_event(&mut self, event: CarouselEvent) -> DayIndex {
        match event {
            CarouselEvent::Ready => self.on_carousel_ready(),
            CarouselEvent::Settled(index) => self.on_swipe_settled(index),
        }
    }

    /// First synchronization happens here, never before.
    pub fn on_carousel_ready(&mut self) -> DayIndex {
        self.carousel_ready = true;
        debug!(day = self.index.get(), "carousel: ready, syncing");
        self.carousel.jump_to(self.index);
        self.index
    }

    /// The carousel already shows `index`; only the indicator needs moving.
    pub fn on_swipe_settled(&mut self, index: DayIndex) -> DayIndex {
        self.index = index;
        self.indicator.show_day(index);
        index
    }
}

#[cfg(test)]
#[path = "tests/carousel_tests.rs"]
mod tests;
