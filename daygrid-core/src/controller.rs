//! Navigation and selection state.
//!
//! Two independent values: the month anchor (always set) and the selected
//! day (optional). The transitions are small pure functions so they can be
//! tested without a controller.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::clock::Clock;
use crate::date_math::{self, is_same_day};
use crate::event::Event;
use crate::event_index::EventIndex;
use crate::grid::{GridCell, MonthGrid};
use crate::month::YearMonth;
use crate::storage::KeyValueStore;
use crate::view::{CellView, cell_views};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarState {
    /// Any day in the displayed month. Only year and month matter downstream.
    pub current_month_anchor: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub view_mode: ViewMode,
}

/// Selecting the already-selected day clears the selection; any other day replaces it.
pub fn toggle_selection(selected: Option<NaiveDate>, date: NaiveDate) -> Option<NaiveDate> {
    match selected {
        Some(current) if is_same_day(&current, &date) => None,
        _ => Some(date),
    }
}

/// Move `anchor` by whole months, keeping the day of month where it exists
/// and clamping to the last day otherwise.
pub fn shift_month(anchor: NaiveDate, months: i32) -> NaiveDate {
    let target = YearMonth::of(&anchor).offset(months);
    let day = anchor.day().min(target.len_days());
    target.first_day().with_day(day).unwrap_or(target.first_day())
}

/// Holds `CalendarState` and the grid derived from it.
///
/// The grid is rebuilt after every transition that moves the anchor.
pub struct CalendarController {
    state: CalendarState,
    grid: MonthGrid,
    clock: Arc<dyn Clock>,
}

impl CalendarController {
    /// Start on today's month with nothing selected.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let today = clock.today();
        Self::with_anchor(today, clock)
    }

    pub fn with_anchor(anchor: NaiveDate, clock: Arc<dyn Clock>) -> Self {
        let grid = MonthGrid::build(YearMonth::of(&anchor), clock.as_ref());
        CalendarController {
            state: CalendarState {
                current_month_anchor: anchor,
                selected_date: None,
                view_mode: ViewMode::default(),
            },
            grid,
            clock,
        }
    }

    pub fn state(&self) -> CalendarState {
        self.state
    }

    pub fn current_month_anchor(&self) -> NaiveDate {
        self.state.current_month_anchor
    }

    pub fn current_month(&self) -> YearMonth {
        YearMonth::of(&self.state.current_month_anchor)
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.state.selected_date
    }

    pub fn view_mode(&self) -> ViewMode {
        self.state.view_mode
    }

    pub fn grid(&self) -> &MonthGrid {
        &self.grid
    }

    fn set_anchor(&mut self, anchor: NaiveDate) {
        self.state.current_month_anchor = anchor;
        self.grid = MonthGrid::build(YearMonth::of(&anchor), self.clock.as_ref());
        debug!(month = %self.current_month(), "Moved calendar");
    }

    pub fn go_to_previous_month(&mut self) {
        self.set_anchor(shift_month(self.state.current_month_anchor, -1));
    }

    pub fn go_to_next_month(&mut self) {
        self.set_anchor(shift_month(self.state.current_month_anchor, 1));
    }

    pub fn go_to_today(&mut self) {
        self.set_anchor(self.clock.today());
    }

    /// Jump straight to `date`'s month, e.g. to show an event.
    pub fn go_to_date(&mut self, date: NaiveDate) {
        self.set_anchor(date);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.state.selected_date = toggle_selection(self.state.selected_date, date);
        debug!(selected = ?self.state.selected_date, "Selection changed");
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_date = None;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
    }

    pub fn is_selected_date_today(&self) -> bool {
        self.state
            .selected_date
            .is_some_and(|d| date_math::is_today(&d, self.clock.as_ref()))
    }

    /// Every date of the displayed month.
    pub fn month_days(&self) -> Vec<NaiveDate> {
        date_math::month_days(self.state.current_month_anchor)
    }

    /// The whole grid in month mode; in week mode, the grid row holding the
    /// selected day if it is on the grid, otherwise the anchor's row.
    pub fn visible_cells(&self) -> &[GridCell] {
        match self.state.view_mode {
            ViewMode::Month => self.grid.cells(),
            ViewMode::Week => self
                .state
                .selected_date
                .and_then(|d| self.grid.week_of(d))
                .or_else(|| self.grid.week_of(self.state.current_month_anchor))
                .unwrap_or(self.grid.cells()),
        }
    }

    /// Visible cells annotated with selection and events.
    pub fn cell_views<'a, S: KeyValueStore>(&self, index: &'a EventIndex<S>) -> Vec<CellView<'a>> {
        cell_views(self.visible_cells(), self.state.selected_date, index)
    }

    /// Events of the selected day; empty when nothing is selected.
    pub fn selected_events<'a, S: KeyValueStore>(&self, index: &'a EventIndex<S>) -> Vec<&'a Event> {
        match self.state.selected_date {
            Some(date) => index.for_date(&date),
            None => Vec::new(),
        }
    }
}
