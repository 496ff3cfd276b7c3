//! Top-level application state shared by front ends.

use shared::domain::{DayIndex, ScheduleBundle, SectionSet};

use crate::{
    cache::ScheduleCache,
    carousel::{CarouselEvent, CarouselSurface, DayCarouselController, DayIndicator},
    grouping::{DayView, ViewMode},
    orchestrator::{FetchState, ScheduleOrchestrator, ScheduleUpdate},
    TimetableSource,
};

/// Editable inputs of the update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateForm {
    pub sheet_link: String,
    pub sections_input: String,
}

impl UpdateForm {
    fn from_bundle(bundle: &ScheduleBundle) -> Self {
        Self {
            sheet_link: bundle.source_url().to_string(),
            sections_input: bundle.sections().joined(),
        }
    }

    pub fn to_update(&self) -> ScheduleUpdate {
        ScheduleUpdate {
            source_url: self.sheet_link.trim().to_string(),
            sections: SectionSet::parse(&self.sections_input),
        }
    }
}

pub struct ScheduleApp<S, C, V, I> {
    orchestrator: ScheduleOrchestrator<S, C>,
    days: DayCarouselController<V, I>,
    view_mode: ViewMode,
    pub form: UpdateForm,
    /// Sections of the bundle on screen; changes only when a fetch succeeds.
    displayed_sections: SectionSet,
}

impl<S, C, V, I> ScheduleApp<S, C, V, I>
where
    S: TimetableSource,
    C: ScheduleCache,
    V: CarouselSurface,
    I: DayIndicator,
{
    pub fn new(
        orchestrator: ScheduleOrchestrator<S, C>,
        days: DayCarouselController<V, I>,
    ) -> Self {
        Self {
            orchestrator,
            days,
            view_mode: ViewMode::default(),
            form: UpdateForm::default(),
            displayed_sections: SectionSet::new(),
        }
    }

    pub async fn start(&mut self) -> FetchState {
        let state = self.orchestrator.mount().await;
        self.sync_from_bundle(state);
        state
    }

    /// Submits the form. Ignored while a fetch is running.
    pub async fn submit(&mut self) -> FetchState {
        if !self.orchestrator.can_submit() {
            return self.orchestrator.state();
        }
        let update = self.form.to_update();
        let state = self.orchestrator.submit_update(&update).await;
        self.sync_from_bundle(state);
        state
    }

    fn sync_from_bundle(&mut self, state: FetchState) {
        if state != FetchState::Ready {
            return;
        }
        if let Some(bundle) = self.orchestrator.bundle() {
            self.displayed_sections = bundle.sections().clone();
            self.form = UpdateForm::from_bundle(bundle);
        }
    }

    pub fn state(&self) -> FetchState {
        self.orchestrator.state()
    }

    pub fn can_submit(&self) -> bool {
        self.orchestrator.can_submit()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.orchestrator.error_message()
    }

    pub fn bundle(&self) -> Option<&ScheduleBundle> {
        self.orchestrator.bundle()
    }

    pub fn orchestrator(&self) -> &ScheduleOrchestrator<S, C> {
        &self.orchestrator
    }

    pub fn displayed_sections(&self) -> &SectionSet {
        &self.displayed_sections
    }

    pub fn days(&self) -> &DayCarouselController<V, I> {
        &self.days
    }

    pub fn days_mut(&mut self) -> &mut DayCarouselController<V, I> {
        &mut self.days
    }

    pub fn day_index(&self) -> DayIndex {
        self.days.index()
    }

    pub fn prev_day(&mut self) -> DayIndex {
        self.days.prev()
    }

    pub fn next_day(&mut self) -> DayIndex {
        self.days.next()
    }

    pub fn carousel_event(&mut self, event: CarouselEvent) -> DayIndex {
        self.days.handle_event(event)
    }

    pub fn view_mode(&self) -> &ViewMode {
        &self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Label of the current day, if a bundle is loaded.
    pub fn day_label(&self) -> Option<&str> {
        self.bundle()
            .map(|bundle| bundle.day(self.days.index()).day.as_str())
    }

    pub fn current_view(&self) -> Option<DayView<'_>> {
        let bundle = self.orchestrator.bundle()?;
        Some(
            self.view_mode
                .render_day(bundle, &self.displayed_sections, self.days.index()),
        )
    }
}

#[cfg(test)]
#[path = "tests/app_state_tests.rs"]
mod tests;
