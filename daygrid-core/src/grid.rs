//! The fixed six-week month grid.

use chrono::{Datelike, NaiveDate};

use crate::clock::Clock;
use crate::constants::{DAYS_PER_WEEK, GRID_CELLS};
use crate::date_math;
use crate::month::YearMonth;

/// One day slot of a rendered month. Rebuilt on every render, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_weekend: bool,
    /// 0 = Sunday
    pub day_of_week: u32,
}

impl GridCell {
    pub fn describe(date: NaiveDate, month: YearMonth, clock: &dyn Clock) -> Self {
        GridCell {
            date,
            is_current_month: month.contains(&date),
            is_today: date_math::is_today(&date, clock),
            is_weekend: date_math::is_weekend(&date),
            day_of_week: date_math::weekday_index(&date),
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// 0-based month of the cell's own date.
    pub fn month0(&self) -> u32 {
        self.date.month0()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// 42 consecutive days starting on the Sunday on or before the 1st of `month`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: YearMonth,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(month: YearMonth, clock: &dyn Clock) -> Self {
        let start = date_math::week_start(month.first_day());

        let cells = start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| GridCell::describe(date, month, clock))
            .collect();

        MonthGrid { month, cells }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn first(&self) -> Option<&GridCell> {
        self.cells.first()
    }

    pub fn last(&self) -> Option<&GridCell> {
        self.cells.last()
    }

    /// Rows of seven, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    /// The row containing `date`, if it is on the grid.
    pub fn week_of(&self, date: NaiveDate) -> Option<&[GridCell]> {
        self.weeks().find(|week| week.iter().any(|c| c.date == date))
    }

    pub fn find(&self, date: NaiveDate) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.date == date)
    }
}
